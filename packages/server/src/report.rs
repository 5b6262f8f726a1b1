//! Crime statistics request pipeline.
//!
//! Validates the requested point, fetches incidents and then categories
//! from a [`CrimeDataSource`], and aggregates them. Every way a request
//! can end is a [`CrimeStatsOutcome`] variant; nothing here returns
//! `Err`.

use crime_reports_report_models::{CoordinateCheckResult, ReportMonth};
use crime_reports_server_models::CrimeStatsResponse;
use crime_reports_source::{CrimeDataSource, FetchError};
use crime_reports_summary::Aggregation;

/// How a crime statistics request ended.
#[derive(Debug)]
pub enum CrimeStatsOutcome {
    /// Incidents were fetched and aggregated.
    Summary(Aggregation),
    /// Coordinates are outside the supported area.
    OutOfBounds,
    /// Coordinates are not numbers.
    InvalidCoordinates,
    /// The source has no incidents (or no category table) for the request.
    NoDataAvailable,
    /// The source failed.
    FetchException(FetchError),
}

impl From<FetchError> for CrimeStatsOutcome {
    fn from(e: FetchError) -> Self {
        if e.is_no_data() {
            Self::NoDataAvailable
        } else {
            Self::FetchException(e)
        }
    }
}

impl From<CrimeStatsOutcome> for CrimeStatsResponse {
    fn from(outcome: CrimeStatsOutcome) -> Self {
        match outcome {
            CrimeStatsOutcome::Summary(Aggregation {
                summary,
                unresolved,
            }) => Self::Summary {
                total_count: summary.total(),
                area_count: summary.area_count(),
                summary,
                unresolved,
            },
            CrimeStatsOutcome::OutOfBounds => Self::OutOfBounds,
            CrimeStatsOutcome::InvalidCoordinates => Self::InvalidCoordinates,
            CrimeStatsOutcome::NoDataAvailable => Self::NoDataAvailable,
            CrimeStatsOutcome::FetchException(e) => Self::FetchException {
                message: e.to_string(),
            },
        }
    }
}

/// Runs the full pipeline for one request.
///
/// Categories are only fetched once a non-empty incident list has come
/// back. An empty incident list or an empty category table is reported as
/// [`CrimeStatsOutcome::NoDataAvailable`].
pub async fn crime_stats(
    source: &dyn CrimeDataSource,
    latitude: &str,
    longitude: &str,
    month: Option<ReportMonth>,
) -> CrimeStatsOutcome {
    let (lat, lng) = match crime_reports_summary::coordinates::check(latitude, longitude) {
        Ok(point) => point,
        Err(CoordinateCheckResult::Unparsable) => {
            log::info!("Rejected unparsable coordinates ({latitude:?}, {longitude:?})");
            return CrimeStatsOutcome::InvalidCoordinates;
        }
        Err(_) => {
            log::info!("Rejected out-of-bounds coordinates ({latitude}, {longitude})");
            return CrimeStatsOutcome::OutOfBounds;
        }
    };

    let incidents = match source.fetch_incidents(lat, lng, month).await {
        Ok(incidents) if incidents.is_empty() => return CrimeStatsOutcome::NoDataAvailable,
        Ok(incidents) => incidents,
        Err(e) => {
            log::warn!("[{}] Incident fetch failed: {e}", source.id());
            return e.into();
        }
    };

    let categories = match source.fetch_categories(month).await {
        Ok(categories) if categories.is_empty() => return CrimeStatsOutcome::NoDataAvailable,
        Ok(categories) => categories,
        Err(e) => {
            log::warn!("[{}] Category fetch failed: {e}", source.id());
            return e.into();
        }
    };

    CrimeStatsOutcome::Summary(crime_reports_summary::aggregate(&incidents, &categories))
}
