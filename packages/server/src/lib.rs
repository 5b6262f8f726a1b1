#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for street-level crime statistics.
//!
//! Exposes `/api/crime-stats`, which validates a point, fetches incidents
//! and categories from the configured [`CrimeDataSource`], and returns
//! per-area, per-category counts. The request pipeline itself lives in
//! [`report`] so it can be driven without HTTP.

mod handlers;
pub mod report;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use crime_reports_source::CrimeDataSource;
use crime_reports_source::police_uk::PoliceUkClient;

/// Shared application state.
pub struct AppState {
    /// Upstream incident and category provider.
    pub source: Arc<dyn CrimeDataSource>,
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/crime-stats", web::get().to(handlers::crime_stats))
            .route("/categories", web::get().to(handlers::categories)),
    );
}

/// Reads `BIND_ADDR` (default `127.0.0.1`) and `PORT` (default `8080`).
#[must_use]
pub fn bind_config_from_env() -> (String, u16) {
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    (bind_addr, port)
}

/// Starts the API server backed by `source`.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(
    source: Arc<dyn CrimeDataSource>,
    bind_addr: &str,
    port: u16,
) -> std::io::Result<()> {
    log::info!(
        "Starting server on {bind_addr}:{port} (source: {})",
        source.name()
    );

    let state = web::Data::new(AppState { source });

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

/// Starts the API server against `data.police.uk`, configured from the
/// environment.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the source configuration is
/// invalid, or if the HTTP server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server_from_env() -> std::io::Result<()> {
    let client = PoliceUkClient::from_env().map_err(std::io::Error::other)?;
    let (bind_addr, port) = bind_config_from_env();
    run_server(Arc::new(client), &bind_addr, port).await
}
