//! Nearby - a client for "nearby places" searches against a places API
//!
//! This library provides the search client and shared types used by the query gateway.

pub mod config;
pub mod models;
pub mod places;

pub use models::{Coordinate, Place, SearchQuery};
pub use places::{PlacesClient, PlacesError, SearchResult};
