//! Nearby search endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use nearby::models::{Coordinate, Marker, Place, SearchQuery};

use crate::AppState;

#[derive(Deserialize)]
pub struct NearbyQueryParams {
    /// Origin latitude
    lat: f64,
    /// Origin longitude
    lng: f64,
    /// Free text filter, empty means none
    #[serde(default)]
    keyword: String,
    /// Search radius in meters (defaults to configured radius)
    radius: Option<u32>,
}

#[derive(Serialize)]
pub struct NearbyResponse {
    places: Vec<Place>,
    markers: Vec<Marker>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Search around a point and return places plus the markers to draw for them
pub async fn nearby_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<NearbyQueryParams>, QueryRejection>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let Query(params) =
        params.map_err(|rejection| error_response(StatusCode::BAD_REQUEST, rejection.body_text()))?;

    let origin = Coordinate::new(params.lat, params.lng)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;

    let query = SearchQuery::new(
        origin,
        params.radius.unwrap_or(state.default_radius),
        params.keyword,
        state.api_key.as_str(),
    )
    .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;

    let places = state.places.search(&query).await.map_err(|e| {
        tracing::error!("Nearby search failed: {}", e);
        error_response(StatusCode::BAD_GATEWAY, e)
    })?;

    let markers = places.iter().map(Place::marker).collect();

    Ok(Json(NearbyResponse { places, markers }))
}
