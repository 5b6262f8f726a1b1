//! In-memory [`CrimeDataSource`] for pipeline and handler tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use crime_reports_report_models::{CategoryDescriptor, IncidentRecord, ReportMonth};
use crime_reports_source::{CrimeDataSource, FetchError};

/// Canned responses plus call counters. Errors are stored as constructors
/// because [`FetchError`] is not `Clone`.
pub struct StubSource {
    pub incidents: Result<Vec<IncidentRecord>, fn() -> FetchError>,
    pub categories: Result<Vec<CategoryDescriptor>, fn() -> FetchError>,
    pub incident_calls: AtomicUsize,
    pub category_calls: AtomicUsize,
    pub last_month: Mutex<Option<ReportMonth>>,
    pub last_point: Mutex<Option<(f64, f64)>>,
}

impl StubSource {
    pub fn sample() -> Self {
        Self {
            incidents: Ok(vec![
                IncidentRecord::new("High St", "burglary"),
                IncidentRecord::new("High St", "burglary"),
                IncidentRecord::new("Low St", "theft"),
            ]),
            categories: Ok(vec![
                CategoryDescriptor::new("burglary", "Burglary"),
                CategoryDescriptor::new("theft", "Theft"),
            ]),
            incident_calls: AtomicUsize::new(0),
            category_calls: AtomicUsize::new(0),
            last_month: Mutex::new(None),
            last_point: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CrimeDataSource for StubSource {
    fn id(&self) -> &str {
        "stub"
    }

    fn name(&self) -> &str {
        "Stub source"
    }

    async fn fetch_incidents(
        &self,
        latitude: f64,
        longitude: f64,
        month: Option<ReportMonth>,
    ) -> Result<Vec<IncidentRecord>, FetchError> {
        self.incident_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_month.lock().unwrap() = month;
        *self.last_point.lock().unwrap() = Some((latitude, longitude));
        self.incidents.clone().map_err(|make| make())
    }

    async fn fetch_categories(
        &self,
        _month: Option<ReportMonth>,
    ) -> Result<Vec<CategoryDescriptor>, FetchError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        self.categories.clone().map_err(|make| make())
    }
}
