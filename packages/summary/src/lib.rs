#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Validation and aggregation engine for street-level crime reports.
//!
//! [`coordinates::classify`] decides whether a requested point can be
//! queried at all, and [`aggregate::aggregate`] turns a flat list of
//! incidents plus a category table into a [`FrequencySummary`].
//!
//! Both are pure, synchronous functions with no retained state, so they
//! can be called concurrently for independent requests.
//!
//! [`FrequencySummary`]: crime_reports_report_models::FrequencySummary

pub mod aggregate;
pub mod coordinates;

pub use aggregate::{Aggregation, aggregate};
pub use coordinates::{BoundingBox, GREAT_BRITAIN, classify};
