#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the crime reports server.
//!
//! These types are serialized to JSON for the REST API. They are kept
//! separate from the report models so the API contract can evolve on its
//! own.

use crime_reports_report_models::{FrequencySummary, UnresolvedCategoryError};
use serde::{Deserialize, Serialize};

/// Query parameters for the crime statistics endpoint.
///
/// Coordinates are taken as raw text so that malformed values reach the
/// validator and come back as an `INVALID_COORDINATES` outcome instead of
/// a query-string rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrimeStatsQueryParams {
    /// Latitude in decimal degrees.
    pub lat: Option<String>,
    /// Longitude in decimal degrees.
    pub lng: Option<String>,
    /// Month as `YYYY-MM`. Omit for the latest available month.
    pub date: Option<String>,
}

/// Query parameters for the categories endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesQueryParams {
    /// Month as `YYYY-MM`. Omit for the latest available month.
    pub date: Option<String>,
}

/// Response from the crime statistics endpoint, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeStatsResponse {
    /// Incidents were found and aggregated.
    #[serde(rename_all = "camelCase")]
    Summary {
        /// Counts by area, then by category display name.
        summary: FrequencySummary,
        /// Sum of all counts in `summary`.
        total_count: u64,
        /// Number of distinct areas in `summary`.
        area_count: usize,
        /// Incidents left out because their category was unknown.
        unresolved: Vec<UnresolvedCategoryError>,
    },
    /// Coordinates parsed but fall outside the supported area.
    OutOfBounds,
    /// Coordinates could not be parsed as numbers.
    InvalidCoordinates,
    /// Valid request, but the source has nothing to show.
    NoDataAvailable,
    /// The data source could not be reached or returned garbage.
    FetchException {
        /// Human-readable failure description.
        message: String,
    },
}

/// Generic error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error description.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Identifier of the configured data source.
    pub source: String,
}
