//! Core data models for nearby searches.

pub mod coordinate;
pub mod place;
pub mod query;

pub use coordinate::Coordinate;
pub use place::{Marker, Place};
pub use query::{SearchQuery, DEFAULT_RADIUS_METERS};

use thiserror::Error;

/// Rejected input when building a coordinate or query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),
    #[error("radius must be greater than zero")]
    ZeroRadius,
    #[error("API key is missing")]
    MissingApiKey,
}
