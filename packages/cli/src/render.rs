//! Plain-text rendering for CLI output.

use std::fmt::Write as _;

use crime_reports_report_models::{CategoryDescriptor, FrequencySummary};

/// Renders a summary as one block per area, categories indented beneath,
/// busiest category first.
pub fn summary_table(summary: &FrequencySummary) -> String {
    let mut out = String::new();
    let width = summary
        .iter()
        .flat_map(|(_, counts)| counts.keys())
        .map(String::len)
        .max()
        .unwrap_or(0);

    for (area, counts) in summary {
        let area_total: u64 = counts.values().sum();
        let _ = writeln!(out, "{area} ({area_total})");

        let mut rows: Vec<(&String, &u64)> = counts.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (category, count) in rows {
            let _ = writeln!(out, "  {category:<width$}  {count:>5}");
        }
    }

    let _ = writeln!(
        out,
        "{} incidents across {} areas",
        summary.total(),
        summary.area_count()
    );
    out
}

/// Renders the category table as `KEY  NAME` rows.
pub fn category_table(categories: &[CategoryDescriptor]) -> String {
    let mut out = String::new();
    let width = categories
        .iter()
        .map(|c| c.key.len())
        .max()
        .unwrap_or(0)
        .max("KEY".len());

    let _ = writeln!(out, "{:<width$}  NAME", "KEY");
    let _ = writeln!(out, "{}", "-".repeat(width + 30));
    for category in categories {
        let _ = writeln!(out, "{:<width$}  {}", category.key, category.display_name);
    }
    out
}
