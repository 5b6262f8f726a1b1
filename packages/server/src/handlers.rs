//! HTTP handler functions for the crime reports API.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use crime_reports_report_models::ReportMonth;
use crime_reports_server_models::{
    ApiError, ApiHealth, CategoriesQueryParams, CrimeStatsQueryParams, CrimeStatsResponse,
};
use crime_reports_source::FetchError;

use crate::AppState;
use crate::report;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.source.id().to_string(),
    })
}

/// `GET /api/crime-stats`
///
/// Validates `lat`/`lng`, fetches incidents for the point and month, and
/// returns per-area, per-category counts. The body is always a
/// [`CrimeStatsResponse`]; the HTTP status reflects which variant it is.
pub async fn crime_stats(
    state: web::Data<AppState>,
    params: web::Query<CrimeStatsQueryParams>,
) -> HttpResponse {
    let month = match parse_month(params.date.as_deref()) {
        Ok(month) => month,
        Err(response) => return response,
    };

    let outcome = report::crime_stats(
        state.source.as_ref(),
        params.lat.as_deref().unwrap_or_default(),
        params.lng.as_deref().unwrap_or_default(),
        month,
    )
    .await;

    let response = CrimeStatsResponse::from(outcome);
    HttpResponse::build(status_for(&response)).json(response)
}

/// `GET /api/categories`
///
/// Returns the source's category table for the given month.
pub async fn categories(
    state: web::Data<AppState>,
    params: web::Query<CategoriesQueryParams>,
) -> HttpResponse {
    let month = match parse_month(params.date.as_deref()) {
        Ok(month) => month,
        Err(response) => return response,
    };

    match state.source.fetch_categories(month).await {
        Ok(categories) if !categories.is_empty() => HttpResponse::Ok().json(categories),
        Ok(_) | Err(FetchError::NoData) => HttpResponse::NotFound().json(ApiError {
            error: "No categories available".to_string(),
        }),
        Err(e) => {
            log::error!("Failed to fetch categories: {e}");
            HttpResponse::BadGateway().json(ApiError {
                error: "Failed to fetch categories".to_string(),
            })
        }
    }
}

/// Parses an optional `YYYY-MM` query value. A blank value means "latest".
fn parse_month(date: Option<&str>) -> Result<Option<ReportMonth>, HttpResponse> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(None),
        Some(d) => d.parse::<ReportMonth>().map(Some).map_err(|e| {
            HttpResponse::BadRequest().json(ApiError {
                error: e.to_string(),
            })
        }),
    }
}

const fn status_for(response: &CrimeStatsResponse) -> StatusCode {
    match response {
        CrimeStatsResponse::Summary { .. } | CrimeStatsResponse::NoDataAvailable => StatusCode::OK,
        CrimeStatsResponse::OutOfBounds | CrimeStatsResponse::InvalidCoordinates => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CrimeStatsResponse::FetchException { .. } => StatusCode::BAD_GATEWAY,
    }
}
