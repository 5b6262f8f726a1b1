//! `data.police.uk` street-level crime API client.
//!
//! Two endpoints are used:
//!
//! * `GET /crimes-street/all-crime?lat=&lng=&date=` returns every incident
//!   within a one-mile radius of the point.
//! * `GET /crime-categories?date=` returns the key/name table for the
//!   categories in use that month.
//!
//! The API answers `404` when it has no data for the requested month,
//! which is mapped to [`FetchError::NoData`].
//!
//! See <https://data.police.uk/docs/>

use std::time::Duration;

use async_trait::async_trait;
use crime_reports_report_models::{CategoryDescriptor, IncidentRecord, ReportMonth};
use serde::de::DeserializeOwned;

use crate::service::ServiceConfig;
use crate::{CrimeDataSource, FetchError};

/// HTTP client for the `data.police.uk` API.
#[derive(Debug, Clone)]
pub struct PoliceUkClient {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl PoliceUkClient {
    /// Creates a client for the given service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying HTTP client cannot be
    /// built (e.g. TLS backend initialisation failure).
    pub fn new(config: ServiceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("crime-reports/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client from the embedded configuration plus environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if an override is invalid or the HTTP client
    /// cannot be built.
    pub fn from_env() -> Result<Self, FetchError> {
        Self::new(crate::service::police_uk_from_env()?)
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, FetchError> {
        let url = self.endpoint(path);
        log::debug!("GET {url} {query:?}");

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .inspect_err(|e| log::error!("Request to {url} failed: {e}"))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            log::info!("No data at {url} for {query:?}");
            return Err(FetchError::NoData);
        }
        if !status.is_success() {
            log::error!("HTTP {status} from {url}");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }

        let text = resp.text().await?;
        parse_list(&text)
            .inspect_err(|e| log::error!("Failed to decode response from {url}: {e}"))
    }
}

#[async_trait]
impl CrimeDataSource for PoliceUkClient {
    fn id(&self) -> &str {
        &self.config.id
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    async fn fetch_incidents(
        &self,
        latitude: f64,
        longitude: f64,
        month: Option<ReportMonth>,
    ) -> Result<Vec<IncidentRecord>, FetchError> {
        let query = incidents_query(latitude, longitude, month);
        let incidents: Vec<IncidentRecord> =
            self.get_list("crimes-street/all-crime", &query).await?;
        log::info!(
            "[{}] {} incidents near ({latitude}, {longitude})",
            self.config.id,
            incidents.len()
        );
        Ok(incidents)
    }

    async fn fetch_categories(
        &self,
        month: Option<ReportMonth>,
    ) -> Result<Vec<CategoryDescriptor>, FetchError> {
        let query = categories_query(month);
        let categories: Vec<CategoryDescriptor> =
            self.get_list("crime-categories", &query).await?;
        log::debug!("[{}] {} categories", self.config.id, categories.len());
        Ok(categories)
    }
}

fn incidents_query(
    latitude: f64,
    longitude: f64,
    month: Option<ReportMonth>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("lat", latitude.to_string()),
        ("lng", longitude.to_string()),
    ];
    if let Some(month) = month {
        query.push(("date", month.to_string()));
    }
    query
}

fn categories_query(month: Option<ReportMonth>) -> Vec<(&'static str, String)> {
    month
        .map(|m| vec![("date", m.to_string())])
        .unwrap_or_default()
}

/// Parses a JSON array body. A literal `null` body is treated as empty.
fn parse_list<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, FetchError> {
    let list: Option<Vec<T>> = serde_json::from_str(text)?;
    Ok(list.unwrap_or_default())
}
