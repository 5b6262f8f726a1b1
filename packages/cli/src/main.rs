#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for street-level crime statistics.

mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use crime_reports_report_models::{CategoryDescriptor, ReportMonth};
use crime_reports_server::report::{self, CrimeStatsOutcome};
use crime_reports_source::police_uk::PoliceUkClient;
use crime_reports_source::{CrimeDataSource, FetchError};

#[derive(Parser)]
#[command(name = "crime_reports_cli", about = "Street-level crime statistics for Great Britain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise crimes near a point, grouped by street and category
    Stats {
        /// Latitude in decimal degrees (e.g. "51.5")
        #[arg(long, allow_hyphen_values = true)]
        lat: String,
        /// Longitude in decimal degrees (e.g. "-0.12")
        #[arg(long, allow_hyphen_values = true)]
        lng: String,
        /// Month as YYYY-MM. Defaults to the latest published month.
        #[arg(long)]
        date: Option<ReportMonth>,
    },
    /// List the crime categories in use for a month
    Categories {
        /// Month as YYYY-MM. Defaults to the latest published month.
        #[arg(long)]
        date: Option<ReportMonth>,
    },
    /// Start the HTTP API server (reads `BIND_ADDR` and `PORT`)
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { lat, lng, date } => {
            let client = PoliceUkClient::from_env()?;
            let outcome = report::crime_stats(&client, &lat, &lng, date).await;
            print!("{}", stats_output(outcome, &lat, &lng, client.name())?);
        }
        Commands::Categories { date } => {
            let client = PoliceUkClient::from_env()?;
            print!("{}", categories_output(client.fetch_categories(date).await)?);
        }
        Commands::Serve => {
            let client: Arc<dyn CrimeDataSource> = Arc::new(PoliceUkClient::from_env()?);
            let (bind_addr, port) = crime_reports_server::bind_config_from_env();
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(crime_reports_server::run_server(
                    client, &bind_addr, port,
                ))
            })
            .await??;
        }
    }

    Ok(())
}

/// Renders a stats outcome as CLI output. Rejected coordinates and source
/// failures become the command's error.
fn stats_output(
    outcome: CrimeStatsOutcome,
    lat: &str,
    lng: &str,
    source_name: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    match outcome {
        CrimeStatsOutcome::Summary(aggregation) => {
            for unresolved in &aggregation.unresolved {
                log::warn!("Skipped incident: {unresolved}");
            }
            Ok(render::summary_table(&aggregation.summary))
        }
        CrimeStatsOutcome::NoDataAvailable => {
            Ok("No crimes recorded for this location and month.\n".to_string())
        }
        CrimeStatsOutcome::OutOfBounds => {
            Err(format!("({lat}, {lng}) is outside the area covered by {source_name}").into())
        }
        CrimeStatsOutcome::InvalidCoordinates => {
            Err(format!("invalid coordinates: ({lat:?}, {lng:?})").into())
        }
        CrimeStatsOutcome::FetchException(e) => Err(e.into()),
    }
}

/// Renders a category fetch as CLI output. An empty table reads the same as
/// a month with no published data.
fn categories_output(
    result: Result<Vec<CategoryDescriptor>, FetchError>,
) -> Result<String, FetchError> {
    match result {
        Ok(categories) if !categories.is_empty() => Ok(render::category_table(&categories)),
        Ok(_) | Err(FetchError::NoData) => {
            log::info!("No categories returned");
            Ok("No categories published for this month.\n".to_string())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use crime_reports_report_models::{IncidentRecord, UnresolvedCategoryError};
    use crime_reports_summary::Aggregation;

    use super::*;

    fn sample_aggregation() -> Aggregation {
        crime_reports_summary::aggregate(
            &[
                IncidentRecord::new("High St", "burglary"),
                IncidentRecord::new("High St", "burglary"),
                IncidentRecord::new("Low St", "theft"),
                IncidentRecord::new("Low St", "arson"),
            ],
            &[
                CategoryDescriptor::new("burglary", "Burglary"),
                CategoryDescriptor::new("theft", "Theft"),
            ],
        )
    }

    #[test]
    fn summary_prints_table_and_skips_unresolved() {
        let aggregation = sample_aggregation();
        assert_eq!(
            aggregation.unresolved,
            vec![UnresolvedCategoryError {
                category_key: "arson".to_string(),
                incident_id: None,
            }]
        );

        let text = stats_output(
            CrimeStatsOutcome::Summary(aggregation),
            "51.5",
            "-0.12",
            "stub",
        )
        .unwrap();
        assert!(text.starts_with("High St (2)\n"));
        assert!(text.ends_with("3 incidents across 2 areas\n"));
    }

    #[test]
    fn no_data_is_not_an_error() {
        let text = stats_output(CrimeStatsOutcome::NoDataAvailable, "51.5", "-0.12", "stub");
        assert_eq!(
            text.unwrap(),
            "No crimes recorded for this location and month.\n"
        );
    }

    #[test]
    fn rejected_coordinates_are_errors() {
        let err = stats_output(CrimeStatsOutcome::OutOfBounds, "60.0", "-0.12", "stub")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "(60.0, -0.12) is outside the area covered by stub"
        );

        let err = stats_output(CrimeStatsOutcome::InvalidCoordinates, "abc", "", "stub")
            .unwrap_err();
        assert_eq!(err.to_string(), r#"invalid coordinates: ("abc", "")"#);
    }

    #[test]
    fn fetch_failure_is_error() {
        let outcome = CrimeStatsOutcome::FetchException(FetchError::Status {
            status: 503,
            url: "http://stub/crimes-street/all-crime".to_string(),
        });
        let err = stats_output(outcome, "51.5", "-0.12", "stub").unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn empty_category_table_reads_as_no_data() {
        let expected = "No categories published for this month.\n";
        assert_eq!(categories_output(Ok(Vec::new())).unwrap(), expected);
        assert_eq!(categories_output(Err(FetchError::NoData)).unwrap(), expected);

        let text =
            categories_output(Ok(vec![CategoryDescriptor::new("drugs", "Drugs")])).unwrap();
        assert!(text.contains("drugs  Drugs"));

        assert!(matches!(
            categories_output(Err(FetchError::Status {
                status: 500,
                url: "http://stub/crime-categories".to_string(),
            })),
            Err(FetchError::Status { status: 500, .. })
        ));
    }
}
