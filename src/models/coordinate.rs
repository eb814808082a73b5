//! Geographic coordinate used for search origins and place locations.

use serde::Serialize;

use super::ValidationError;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside geographic bounds
    pub fn new(lat: f64, lng: f64) -> Result<Self, ValidationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::LatitudeOutOfRange(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(ValidationError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Renders as `"<lat>,<lng>"`, the form the nearby-search `location` parameter expects.
///
/// `f64`'s `Display` is the shortest round-trip representation and never
/// switches to exponent notation.
impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_param_format() {
        let coord = Coordinate::new(37.4219999, -122.0840575).unwrap();
        assert_eq!(coord.to_string(), "37.4219999,-122.0840575");
    }

    #[test]
    fn test_small_values_stay_decimal() {
        let coord = Coordinate::new(0.0000001, -0.00000025).unwrap();
        assert_eq!(coord.to_string(), "0.0000001,-0.00000025");
    }

    #[test]
    fn test_whole_degrees() {
        let coord = Coordinate::new(1.0, 2.0).unwrap();
        assert_eq!(coord.to_string(), "1,2");
    }

    #[test]
    fn test_bounds_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(ValidationError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.1),
            Err(ValidationError::LongitudeOutOfRange(-180.1))
        );
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }
}
