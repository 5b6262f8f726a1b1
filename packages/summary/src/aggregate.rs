//! Per-area, per-category incident counting.
//!
//! Incidents reference categories by key, and the summary is keyed by
//! display name, so every record goes through a single category lookup
//! built up front. Records whose key is not in the table are skipped and
//! reported back as [`UnresolvedCategoryError`]s; they never abort the
//! rest of the aggregation.

use std::collections::BTreeMap;

use crime_reports_report_models::{
    CategoryDescriptor, FrequencySummary, IncidentRecord, UnresolvedCategoryError,
};

/// Result of an aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Counts for every record with a resolvable category.
    pub summary: FrequencySummary,
    /// One entry per skipped record, in input order.
    pub unresolved: Vec<UnresolvedCategoryError>,
}

/// Key-to-display-name lookup over a category table.
///
/// When a key appears more than once, the first descriptor wins.
#[derive(Debug, Clone, Default)]
pub struct CategoryLookup<'a> {
    names: BTreeMap<&'a str, &'a str>,
}

impl<'a> CategoryLookup<'a> {
    /// Builds a lookup from a category table.
    #[must_use]
    pub fn new(categories: &'a [CategoryDescriptor]) -> Self {
        let mut names = BTreeMap::new();
        for category in categories {
            names
                .entry(category.key.as_str())
                .or_insert(category.display_name.as_str());
        }
        Self { names }
    }

    /// Returns the display name for `key`, if the table has one.
    #[must_use]
    pub fn display_name(&self, key: &str) -> Option<&'a str> {
        self.names.get(key).copied()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table had no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Counts incidents by area name and category display name.
///
/// Records are processed in input order. A record whose category key is
/// absent from `categories` is excluded from the summary, logged at
/// `warn`, and listed in [`Aggregation::unresolved`]. An empty `records`
/// slice yields an empty summary.
#[must_use]
pub fn aggregate(records: &[IncidentRecord], categories: &[CategoryDescriptor]) -> Aggregation {
    let lookup = CategoryLookup::new(categories);
    let mut aggregation = Aggregation::default();

    for record in records {
        let key = record.category_key();
        let Some(display_name) = lookup.display_name(key) else {
            let error = UnresolvedCategoryError {
                category_key: key.to_string(),
                incident_id: record.id,
            };
            log::warn!("Skipping incident: {error}");
            aggregation.unresolved.push(error);
            continue;
        };

        aggregation
            .summary
            .increment(record.area_name(), display_name);
    }

    log::debug!(
        "Aggregated {} of {} incidents into {} areas ({} categories known, {} unresolved)",
        aggregation.summary.total(),
        records.len(),
        aggregation.summary.area_count(),
        lookup.len(),
        aggregation.unresolved.len(),
    );

    aggregation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_reports_report_models::UNSPECIFIED;

    fn categories() -> Vec<CategoryDescriptor> {
        vec![
            CategoryDescriptor::new("burglary", "Burglary"),
            CategoryDescriptor::new("theft", "Theft"),
            CategoryDescriptor::new("anti-social-behaviour", "Anti-social behaviour"),
        ]
    }

    fn sample_records() -> Vec<IncidentRecord> {
        vec![
            IncidentRecord::new("High St", "burglary"),
            IncidentRecord::new("High St", "burglary"),
            IncidentRecord::new("Low St", "theft"),
        ]
    }

    #[test]
    fn groups_by_area_then_category() {
        let result = aggregate(&sample_records(), &categories());

        assert!(result.unresolved.is_empty());
        assert_eq!(result.summary.area_count(), 2);
        assert_eq!(result.summary.get("High St", "Burglary"), Some(2));
        assert_eq!(result.summary.get("Low St", "Theft"), Some(1));
        assert_eq!(result.summary.area("High St").map(BTreeMap::len), Some(1));
        assert_eq!(result.summary.area("Low St").map(BTreeMap::len), Some(1));
    }

    #[test]
    fn empty_records_give_empty_summary() {
        let result = aggregate(&[], &categories());
        assert!(result.summary.is_empty());
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn total_matches_record_count_when_all_resolve() {
        let areas = ["A", "B", "C", "D"];
        let keys = ["burglary", "theft", "anti-social-behaviour"];
        let records: Vec<IncidentRecord> = (0..97)
            .map(|i| IncidentRecord::new(areas[i % areas.len()], keys[i % keys.len()]))
            .collect();

        let result = aggregate(&records, &categories());
        assert_eq!(result.summary.total(), records.len() as u64);
        for (_, counts) in &result.summary {
            assert!(counts.values().all(|&c| c >= 1));
        }
    }

    #[test]
    fn order_does_not_change_result() {
        let mut records = vec![
            IncidentRecord::new("High St", "burglary"),
            IncidentRecord::new("Low St", "theft"),
            IncidentRecord::new("High St", "theft"),
            IncidentRecord::new("Mill Lane", "anti-social-behaviour"),
            IncidentRecord::new("High St", "burglary"),
            IncidentRecord::new("Low St", "theft"),
        ];
        let forward = aggregate(&records, &categories());

        records.reverse();
        let reversed = aggregate(&records, &categories());
        assert_eq!(forward, reversed);

        records.rotate_left(2);
        let rotated = aggregate(&records, &categories());
        assert_eq!(forward, rotated);
    }

    #[test]
    fn unresolved_category_is_skipped_and_reported_once() {
        let mut unknown = IncidentRecord::new("High St", "vehicle-crime");
        unknown.id = Some(42);
        let mut records = sample_records();
        records.insert(1, unknown);

        let result = aggregate(&records, &categories());

        assert_eq!(
            result.unresolved,
            vec![UnresolvedCategoryError {
                category_key: "vehicle-crime".to_string(),
                incident_id: Some(42),
            }]
        );
        assert_eq!(result.summary.total(), 3);
        assert_eq!(result.summary.get("High St", "Burglary"), Some(2));
        assert_eq!(result.summary.get("Low St", "Theft"), Some(1));
    }

    #[test]
    fn unspecified_area_is_its_own_bucket() {
        let mut no_location = IncidentRecord::new("ignored", "theft");
        no_location.location = None;
        let records = vec![no_location, IncidentRecord::new(UNSPECIFIED, "theft")];

        let result = aggregate(&records, &categories());
        assert_eq!(result.summary.get(UNSPECIFIED, "Theft"), Some(2));
        assert_eq!(result.summary.area_count(), 1);
    }

    #[test]
    fn missing_category_key_is_unresolved() {
        let mut record = IncidentRecord::new("High St", "theft");
        record.category = None;

        let result = aggregate(&[record], &categories());
        assert!(result.summary.is_empty());
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].category_key, UNSPECIFIED);
    }

    #[test]
    fn categories_sharing_a_display_name_merge() {
        let categories = vec![
            CategoryDescriptor::new("theft-from-the-person", "Theft"),
            CategoryDescriptor::new("other-theft", "Theft"),
        ];
        let records = vec![
            IncidentRecord::new("High St", "theft-from-the-person"),
            IncidentRecord::new("High St", "other-theft"),
        ];

        let result = aggregate(&records, &categories);
        assert_eq!(result.summary.get("High St", "Theft"), Some(2));
    }

    #[test]
    fn duplicate_keys_resolve_to_first_descriptor() {
        let categories = vec![
            CategoryDescriptor::new("burglary", "Burglary"),
            CategoryDescriptor::new("burglary", "Break-in"),
        ];
        let lookup = CategoryLookup::new(&categories);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.display_name("burglary"), Some("Burglary"));
        assert_eq!(lookup.display_name("theft"), None);
    }
}
