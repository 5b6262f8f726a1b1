//! Compile-time embedded configuration for the upstream crime API.
//!
//! The defaults live in `services/police_uk.toml`. Deployments can point
//! at a mirror or change the request timeout through environment
//! variables without rebuilding.

use serde::Deserialize;

use crate::FetchError;

/// Overrides [`ServiceConfig::base_url`].
pub const API_URL_ENV: &str = "CRIME_REPORTS_API_URL";

/// Overrides [`ServiceConfig::timeout_secs`].
pub const TIMEOUT_ENV: &str = "CRIME_REPORTS_TIMEOUT_SECS";

/// A crime API service configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// Unique identifier (e.g., `"police_uk"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

const POLICE_UK_TOML: &str = include_str!("../services/police_uk.toml");

/// Returns the embedded `data.police.uk` configuration.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed. Since it is a compile-time
/// constant, a parse failure is a development error caught by tests.
#[must_use]
pub fn police_uk() -> ServiceConfig {
    toml::de::from_str(POLICE_UK_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse crime API service 'police_uk': {e}"))
}

/// Returns the `data.police.uk` configuration with environment overrides
/// applied.
///
/// # Errors
///
/// Returns [`FetchError::Config`] if an override is present but invalid.
pub fn police_uk_from_env() -> Result<ServiceConfig, FetchError> {
    apply_overrides(police_uk(), |key| std::env::var(key).ok())
}

/// Applies [`API_URL_ENV`] and [`TIMEOUT_ENV`] overrides read through
/// `lookup`.
///
/// # Errors
///
/// Returns [`FetchError::Config`] if the URL override is blank or the
/// timeout override is not a positive integer.
pub fn apply_overrides<F>(mut config: ServiceConfig, lookup: F) -> Result<ServiceConfig, FetchError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_ENV) {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(FetchError::Config {
                message: format!("{API_URL_ENV} is set but empty"),
            });
        }
        log::info!("Using crime API base URL from {API_URL_ENV}: {url}");
        url.clone_into(&mut config.base_url);
    }

    if let Some(raw) = lookup(TIMEOUT_ENV) {
        config.timeout_secs = raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|&secs| secs > 0)
            .ok_or_else(|| FetchError::Config {
                message: format!("{TIMEOUT_ENV} must be a positive integer, got {raw:?}"),
            })?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn loads_embedded_config() {
        let config = police_uk();
        assert_eq!(config.id, "police_uk");
        assert!(!config.name.is_empty());
        assert!(config.base_url.starts_with("https://"));
        assert!(!config.base_url.ends_with('/'));
        assert!(config.timeout_secs > 0);
    }

    #[test]
    fn no_overrides_keeps_defaults() {
        let config = apply_overrides(police_uk(), |_| None).unwrap();
        assert_eq!(config, police_uk());
    }

    #[test]
    fn overrides_url_and_timeout() {
        let vars = env(&[
            (API_URL_ENV, "http://localhost:9000/api/"),
            (TIMEOUT_ENV, "5"),
        ]);
        let config = apply_overrides(police_uk(), |k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/api");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn rejects_invalid_overrides() {
        for (key, value) in [(TIMEOUT_ENV, "0"), (TIMEOUT_ENV, "soon"), (API_URL_ENV, "  ")] {
            let vars = env(&[(key, value)]);
            let result = apply_overrides(police_uk(), |k| vars.get(k).cloned());
            assert!(
                matches!(result, Err(FetchError::Config { .. })),
                "{key}={value:?} should be rejected"
            );
        }
    }
}
