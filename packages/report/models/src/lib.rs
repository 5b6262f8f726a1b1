#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street-level crime report types shared across the crime-reports system.
//!
//! [`IncidentRecord`] and [`CategoryDescriptor`] mirror the JSON shapes
//! returned by the `data.police.uk` API. [`FrequencySummary`] is the
//! per-area, per-category count produced from them, and
//! [`CoordinateCheckResult`] classifies a requested point before any data
//! is fetched.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Placeholder used when the source does not name a street or category.
pub const UNSPECIFIED: &str = "Unspecified";

/// Classification of a requested latitude/longitude pair.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CoordinateCheckResult {
    /// Both values parsed and fall inside the supported bounding box.
    InBounds,
    /// Both values parsed but the point is outside the bounding box.
    OutOfBounds,
    /// At least one value is not a decimal number.
    Unparsable,
}

impl CoordinateCheckResult {
    /// Returns `true` if the coordinates may be used for a fetch.
    #[must_use]
    pub const fn is_in_bounds(self) -> bool {
        matches!(self, Self::InBounds)
    }
}

/// A calendar month in `YYYY-MM` form, as accepted by the crime API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportMonth(NaiveDate);

impl ReportMonth {
    /// Creates a month from a year and a 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns an error if `month` is not in the range 1-12.
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidMonthError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| InvalidMonthError {
                value: format!("{year:04}-{month:02}"),
            })
    }

    /// Returns the first day of this month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }
}

impl FromStr for ReportMonth {
    type Err = InvalidMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // `%Y` alone accepts signs and long years, so pin the shape first.
        let well_formed = trimmed.len() == 7
            && trimmed.as_bytes()[4] == b'-'
            && trimmed
                .bytes()
                .enumerate()
                .all(|(i, b)| i == 4 || b.is_ascii_digit());
        if !well_formed {
            return Err(InvalidMonthError {
                value: s.to_string(),
            });
        }
        NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| InvalidMonthError {
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl Serialize for ReportMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReportMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when a month string is not a valid `YYYY-MM` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMonthError {
    /// The rejected input.
    pub value: String,
}

impl std::fmt::Display for InvalidMonthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month {:?}: expected YYYY-MM", self.value)
    }
}

impl std::error::Error for InvalidMonthError {}

/// Street reference attached to an incident location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Street {
    /// Upstream street identifier.
    pub id: Option<i64>,
    /// Street or area description (e.g. "On or near High Street").
    pub name: Option<String>,
}

/// Approximate location of an incident. Coordinates are kept as the
/// strings the API returns them as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentLocation {
    /// Latitude (WGS84).
    pub latitude: Option<String>,
    /// Longitude (WGS84).
    pub longitude: Option<String>,
    /// Street the incident was snapped to.
    pub street: Option<Street>,
}

/// Latest recorded outcome for an incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeStatus {
    /// Outcome description (e.g. "Investigation complete; no suspect identified").
    pub category: Option<String>,
    /// Month the outcome was recorded, `YYYY-MM`.
    pub date: Option<String>,
}

/// One reported street-level crime.
///
/// Only [`category_key`](Self::category_key) and
/// [`area_name`](Self::area_name) take part in aggregation; the other
/// fields are carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Category key, joined against [`CategoryDescriptor::key`].
    pub category: Option<String>,
    /// Location type (e.g. "Force", "BTP").
    pub location_type: Option<String>,
    /// Approximate location.
    pub location: Option<IncidentLocation>,
    /// Free-text context supplied by the force.
    pub context: Option<String>,
    /// Latest outcome, if any.
    pub outcome_status: Option<OutcomeStatus>,
    /// Stable identifier across monthly releases.
    pub persistent_id: Option<String>,
    /// Upstream record ID.
    pub id: Option<i64>,
    /// Location subtype (e.g. station name for BTP records).
    pub location_subtype: Option<String>,
    /// Month of the incident, `YYYY-MM`.
    pub month: Option<String>,
}

impl IncidentRecord {
    /// Creates a record with only the fields that aggregation reads.
    #[must_use]
    pub fn new(area_name: &str, category_key: &str) -> Self {
        Self {
            category: Some(category_key.to_string()),
            location_type: None,
            location: Some(IncidentLocation {
                latitude: None,
                longitude: None,
                street: Some(Street {
                    id: None,
                    name: Some(area_name.to_string()),
                }),
            }),
            context: None,
            outcome_status: None,
            persistent_id: None,
            id: None,
            location_subtype: None,
            month: None,
        }
    }

    /// The category key, or [`UNSPECIFIED`] when the source omitted it.
    #[must_use]
    pub fn category_key(&self) -> &str {
        self.category.as_deref().unwrap_or(UNSPECIFIED)
    }

    /// The street/area name, or [`UNSPECIFIED`] when the source has no
    /// location for this incident.
    #[must_use]
    pub fn area_name(&self) -> &str {
        self.location
            .as_ref()
            .and_then(|l| l.street.as_ref())
            .and_then(|s| s.name.as_deref())
            .unwrap_or(UNSPECIFIED)
    }
}

/// Maps a category key to its human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    /// Join key (the API calls this `url`, e.g. `"anti-social-behaviour"`).
    #[serde(rename = "url")]
    pub key: String,
    /// Display name (e.g. "Anti-social behaviour").
    #[serde(rename = "name")]
    pub display_name: String,
}

impl CategoryDescriptor {
    /// Creates a new descriptor.
    #[must_use]
    pub fn new(key: &str, display_name: &str) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// An incident whose category key is missing from the category table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedCategoryError {
    /// The key that failed to resolve.
    pub category_key: String,
    /// Upstream ID of the skipped incident, when known.
    pub incident_id: Option<i64>,
}

impl std::fmt::Display for UnresolvedCategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unresolved crime category {:?}", self.category_key)?;
        if let Some(id) = self.incident_id {
            write!(f, " (incident {id})")?;
        }
        Ok(())
    }
}

impl std::error::Error for UnresolvedCategoryError {}

/// Incident counts keyed by area name, then by category display name.
///
/// Area names are unique, and category names are unique within an area.
/// Every stored count is at least 1. Iteration is in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencySummary {
    areas: BTreeMap<String, BTreeMap<String, u64>>,
}

impl FrequencySummary {
    /// Creates an empty summary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            areas: BTreeMap::new(),
        }
    }

    /// Adds one occurrence of `category` in `area`.
    pub fn increment(&mut self, area: &str, category: &str) {
        *self
            .areas
            .entry(area.to_string())
            .or_default()
            .entry(category.to_string())
            .or_insert(0) += 1;
    }

    /// Returns the count for an area/category pair, if any incident matched.
    #[must_use]
    pub fn get(&self, area: &str, category: &str) -> Option<u64> {
        self.areas.get(area)?.get(category).copied()
    }

    /// Returns the category counts for a single area.
    #[must_use]
    pub fn area(&self, area: &str) -> Option<&BTreeMap<String, u64>> {
        self.areas.get(area)
    }

    /// Iterates over areas and their category counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, u64>)> {
        self.areas.iter().map(|(area, counts)| (area.as_str(), counts))
    }

    /// Number of distinct areas.
    #[must_use]
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Sum of every count in the summary.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.areas.values().flat_map(BTreeMap::values).sum()
    }

    /// Whether no incident has been counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

impl<'a> IntoIterator for &'a FrequencySummary {
    type Item = (&'a String, &'a BTreeMap<String, u64>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, BTreeMap<String, u64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.areas.iter()
    }
}
