//! Nearby-search client for the places API.
//!
//! One call to [`PlacesClient::search`] sends one GET and resolves to either
//! the decoded places, in upstream order, or a single [`PlacesError`].

mod client;
mod error;
mod response;

pub use client::{PlacesClient, DEFAULT_BASE_URL};
pub use error::PlacesError;
pub use response::ApiStatus;

use crate::models::Place;

/// Outcome of one nearby search
pub type SearchResult = std::result::Result<Vec<Place>, PlacesError>;
