//! Coordinate parsing and bounding-box classification.

use crime_reports_report_models::CoordinateCheckResult;

/// An inclusive latitude/longitude rectangle in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern latitude boundary.
    pub min_latitude: f64,
    /// Northern latitude boundary.
    pub max_latitude: f64,
    /// Western longitude boundary.
    pub min_longitude: f64,
    /// Eastern longitude boundary.
    pub max_longitude: f64,
}

/// Mainland Great Britain, the coverage area of the street-level crime API.
pub const GREAT_BRITAIN: BoundingBox = BoundingBox::new(49.84, 58.67, -8.65, 1.76);

impl BoundingBox {
    /// Creates a new bounding box from the given limits.
    #[must_use]
    pub const fn new(
        min_latitude: f64,
        max_latitude: f64,
        min_longitude: f64,
        max_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// Returns `true` if the point lies inside the box, edges included.
    ///
    /// Both axes are checked against both of their limits.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }

    /// Parses a textual coordinate pair and checks it against this box.
    ///
    /// Returns the parsed pair when it is in bounds. Otherwise the error is
    /// the [`CoordinateCheckResult`] that explains the rejection.
    ///
    /// # Errors
    ///
    /// * [`CoordinateCheckResult::Unparsable`] if either value is not a
    ///   finite decimal number
    /// * [`CoordinateCheckResult::OutOfBounds`] if the point lies outside
    pub fn check(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<(f64, f64), CoordinateCheckResult> {
        let (lat, lng) =
            parse_coordinates(latitude, longitude).ok_or(CoordinateCheckResult::Unparsable)?;

        if self.contains(lat, lng) {
            Ok((lat, lng))
        } else {
            Err(CoordinateCheckResult::OutOfBounds)
        }
    }

    /// Parses and classifies a textual coordinate pair against this box.
    #[must_use]
    pub fn classify(&self, latitude: &str, longitude: &str) -> CoordinateCheckResult {
        self.check(latitude, longitude)
            .err()
            .unwrap_or(CoordinateCheckResult::InBounds)
    }
}

/// Classifies a coordinate pair against [`GREAT_BRITAIN`].
///
/// Parse failure is an ordinary outcome and is reported as
/// [`CoordinateCheckResult::Unparsable`], never as an error.
#[must_use]
pub fn classify(latitude: &str, longitude: &str) -> CoordinateCheckResult {
    let result = GREAT_BRITAIN.classify(latitude, longitude);
    log::trace!("classify: lat={latitude:?} lng={longitude:?} -> {result}");
    result
}

/// Like [`classify`], but hands back the parsed pair when it is in bounds so
/// callers do not parse the text a second time.
///
/// # Errors
///
/// Returns the rejecting [`CoordinateCheckResult`] (`OutOfBounds` or
/// `Unparsable`).
pub fn check(latitude: &str, longitude: &str) -> Result<(f64, f64), CoordinateCheckResult> {
    let result = GREAT_BRITAIN.check(latitude, longitude);
    log::trace!("check: lat={latitude:?} lng={longitude:?} -> {result:?}");
    result
}

/// Parses a textual latitude/longitude pair without any bounds check.
///
/// Returns `None` if either value is not a finite decimal number.
#[must_use]
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Option<(f64, f64)> {
    Some((parse_degrees(latitude)?, parse_degrees(longitude)?))
}

/// Parses a decimal degree value, ignoring surrounding whitespace.
///
/// `f64::from_str` does not depend on the process locale. `NaN` and the
/// infinities parse successfully there but are rejected here.
fn parse_degrees(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
