//! Input to a single nearby search.

use super::{Coordinate, ValidationError};

/// Radius used when the caller does not pick one (meters)
pub const DEFAULT_RADIUS_METERS: u32 = 2000;

/// One nearby-search request.
///
/// An empty keyword is allowed; upstream treats it as "no keyword filter".
#[derive(Clone, PartialEq)]
pub struct SearchQuery {
    origin: Coordinate,
    radius_meters: u32,
    keyword: String,
    api_key: String,
}

impl SearchQuery {
    pub fn new(
        origin: Coordinate,
        radius_meters: u32,
        keyword: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if radius_meters == 0 {
            return Err(ValidationError::ZeroRadius);
        }

        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ValidationError::MissingApiKey);
        }

        Ok(Self {
            origin,
            radius_meters,
            keyword: keyword.into(),
            api_key,
        })
    }

    /// Query with [`DEFAULT_RADIUS_METERS`]
    pub fn with_default_radius(
        origin: Coordinate,
        keyword: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(origin, DEFAULT_RADIUS_METERS, keyword, api_key)
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn radius_meters(&self) -> u32 {
        self.radius_meters
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

// Keeps the key out of logs and panic messages.
impl std::fmt::Debug for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchQuery")
            .field("origin", &self.origin)
            .field("radius_meters", &self.radius_meters)
            .field("keyword", &self.keyword)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Coordinate {
        Coordinate::new(-23.55, -46.63).unwrap()
    }

    #[test]
    fn test_empty_keyword_allowed() {
        let query = SearchQuery::new(origin(), 500, "", "key").unwrap();
        assert_eq!(query.keyword(), "");
        assert_eq!(query.radius_meters(), 500);
    }

    #[test]
    fn test_zero_radius_rejected() {
        let err = SearchQuery::new(origin(), 0, "pizza", "key").unwrap_err();
        assert_eq!(err, ValidationError::ZeroRadius);
    }

    #[test]
    fn test_blank_key_rejected() {
        let err = SearchQuery::new(origin(), 100, "pizza", "  ").unwrap_err();
        assert_eq!(err, ValidationError::MissingApiKey);
    }

    #[test]
    fn test_default_radius() {
        let query = SearchQuery::with_default_radius(origin(), "bar", "key").unwrap();
        assert_eq!(query.radius_meters(), DEFAULT_RADIUS_METERS);
    }

    #[test]
    fn test_debug_redacts_key() {
        let query = SearchQuery::new(origin(), 100, "pizza", "super-secret").unwrap();
        let debug = format!("{:?}", query);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("pizza"));
    }
}
