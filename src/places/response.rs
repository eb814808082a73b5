//! Wire shape of the nearby-search JSON payload.
//!
//! Each place record is decoded on its own. A record missing `name`,
//! `place_id` or `geometry.location` is dropped while its siblings are kept;
//! everything else on a record is optional.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::models::{Coordinate, Place};

/// Logical outcome reported in the payload's `status` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Ok,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
    NotFound,
    /// Anything this crate does not know about, kept verbatim
    Other(String),
}

impl ApiStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "OK" => ApiStatus::Ok,
            "ZERO_RESULTS" => ApiStatus::ZeroResults,
            "OVER_QUERY_LIMIT" => ApiStatus::OverQueryLimit,
            "REQUEST_DENIED" => ApiStatus::RequestDenied,
            "INVALID_REQUEST" => ApiStatus::InvalidRequest,
            "UNKNOWN_ERROR" => ApiStatus::UnknownError,
            "NOT_FOUND" => ApiStatus::NotFound,
            other => ApiStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ApiStatus::Ok => "OK",
            ApiStatus::ZeroResults => "ZERO_RESULTS",
            ApiStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            ApiStatus::RequestDenied => "REQUEST_DENIED",
            ApiStatus::InvalidRequest => "INVALID_REQUEST",
            ApiStatus::UnknownError => "UNKNOWN_ERROR",
            ApiStatus::NotFound => "NOT_FOUND",
            ApiStatus::Other(raw) => raw,
        }
    }

    /// `OK` and `ZERO_RESULTS` both mean the search itself worked
    pub fn is_success(&self) -> bool {
        matches!(self, ApiStatus::Ok | ApiStatus::ZeroResults)
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    name: Option<String>,
    place_id: Option<String>,
    geometry: Option<RawGeometry>,
    #[serde(default, deserialize_with = "lenient")]
    rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    user_ratings_total: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    vicinity: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    business_status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    icon: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    icon_background_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    icon_mask_base_uri: Option<String>,
}

/// Optional fields never invalidate a record; a value of the wrong type reads as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    location: Option<RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    lat: Option<f64>,
    lng: Option<f64>,
}

impl RawPlace {
    fn into_place(self) -> Result<Place, String> {
        let name = self.name.ok_or("missing name")?;
        let place_id = self.place_id.ok_or("missing place_id")?;
        let location = self
            .geometry
            .and_then(|g| g.location)
            .ok_or("missing geometry.location")?;
        let (lat, lng) = match (location.lat, location.lng) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => return Err("missing geometry.location.lat/lng".to_string()),
        };
        let location = Coordinate::new(lat, lng).map_err(|e| e.to_string())?;

        Ok(Place {
            name,
            place_id,
            location,
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            vicinity: self.vicinity,
            business_status: self.business_status,
            icon: self.icon,
            icon_background_color: self.icon_background_color,
            icon_mask_base_uri: self.icon_mask_base_uri,
        })
    }
}

/// A decoded payload, before the outcome is classified
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearbyPayload {
    pub status: Option<ApiStatus>,
    pub error_message: Option<String>,
    /// Valid records in upstream order
    pub places: Vec<Place>,
    /// Records skipped for missing mandatory fields
    pub dropped: usize,
}

/// Decode a response body.
///
/// Fails only when the body is not a JSON object of the expected top-level
/// shape; bad individual records are counted in `dropped`.
pub(crate) fn decode_payload(body: &[u8]) -> Result<NearbyPayload, serde_json::Error> {
    let response: NearbySearchResponse = serde_json::from_slice(body)?;

    let records = response.results.unwrap_or_default();
    let total = records.len();
    let mut places = Vec::with_capacity(total);

    for (idx, record) in records.into_iter().enumerate() {
        let outcome = serde_json::from_value::<RawPlace>(record)
            .map_err(|e| e.to_string())
            .and_then(RawPlace::into_place);

        match outcome {
            Ok(place) => places.push(place),
            Err(reason) => warn!("Dropping place record {}: {}", idx, reason),
        }
    }

    Ok(NearbyPayload {
        status: response.status.as_deref().map(ApiStatus::parse),
        error_message: response.error_message.filter(|m| !m.trim().is_empty()),
        dropped: total - places.len(),
        places,
    })
}
