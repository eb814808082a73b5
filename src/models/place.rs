//! Place records returned by a nearby search.

use serde::Serialize;

use super::Coordinate;

/// One point of interest returned by upstream.
///
/// Identity is `place_id`; two results describing the same place may differ
/// in their optional fields between searches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,

    /// Opaque upstream identifier
    pub place_id: String,

    pub location: Coordinate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,

    /// Short address, usually street and locality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,

    /// e.g. "OPERATIONAL", "CLOSED_TEMPORARILY"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_mask_base_uri: Option<String>,
}

/// What a map draws for one place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: Coordinate,
    pub title: String,
}

impl Place {
    /// Create a place with only the mandatory fields
    pub fn new(name: impl Into<String>, place_id: impl Into<String>, location: Coordinate) -> Self {
        Self {
            name: name.into(),
            place_id: place_id.into(),
            location,
            rating: None,
            user_ratings_total: None,
            vicinity: None,
            business_status: None,
            icon: None,
            icon_background_color: None,
            icon_mask_base_uri: None,
        }
    }

    pub fn same_place(&self, other: &Place) -> bool {
        self.place_id == other.place_id
    }

    pub fn marker(&self) -> Marker {
        Marker {
            position: self.location,
            title: self.name.clone(),
        }
    }
}
