#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street-level crime data source trait and the `data.police.uk` client.
//!
//! Callers depend on [`CrimeDataSource`] rather than on a concrete HTTP
//! client, so the request pipeline can be driven by an in-memory source
//! in tests. [`police_uk::PoliceUkClient`] is the production
//! implementation.

pub mod police_uk;
pub mod service;

use async_trait::async_trait;
use crime_reports_report_models::{CategoryDescriptor, IncidentRecord, ReportMonth};

/// Errors that can occur while fetching from a data source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (connection, TLS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a status that is neither success nor
    /// "no data".
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// The source has nothing for the requested location or month.
    #[error("No data available")]
    NoData,

    /// Source configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}

impl FetchError {
    /// Returns `true` if this is a "valid request, nothing to show"
    /// outcome rather than a failure.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// A provider of street-level incidents and the matching category table.
#[async_trait]
pub trait CrimeDataSource: Send + Sync {
    /// Returns a unique identifier for this source (e.g., `"police_uk"`).
    fn id(&self) -> &str;

    /// Returns the human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetches all incidents reported near a point. `None` for `month`
    /// means the latest month the source has published.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the source has no
    /// data for the request.
    async fn fetch_incidents(
        &self,
        latitude: f64,
        longitude: f64,
        month: Option<ReportMonth>,
    ) -> Result<Vec<IncidentRecord>, FetchError>;

    /// Fetches the category table valid for `month`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the source has no
    /// data for the request.
    async fn fetch_categories(
        &self,
        month: Option<ReportMonth>,
    ) -> Result<Vec<CategoryDescriptor>, FetchError>;
}
