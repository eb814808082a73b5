//! HTTP client for the nearby-search endpoint.

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, trace, warn};
use url::Url;

use super::error::PlacesError;
use super::response::decode_payload;
use super::SearchResult;
use crate::config::PlacesConfig;
use crate::models::SearchQuery;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";
const NEARBY_SEARCH_PATH: &str = "maps/api/place/nearbysearch/json";
const USER_AGENT: &str = concat!("nearby/", env!("CARGO_PKG_VERSION"));

/// Issues nearby searches. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: Client,
    endpoint: Url,
}

impl PlacesClient {
    /// Build a client with its own connection pool from config
    pub fn new(config: &PlacesConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Self::with_http_client(http, &config.base_url)
    }

    /// Wrap an existing reqwest client, e.g. one shared with other services
    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self> {
        let mut base =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;

        // Url::join replaces the last segment unless the base ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let endpoint = base
            .join(NEARBY_SEARCH_PATH)
            .context("Failed to build nearby search URL")?;

        Ok(Self { http, endpoint })
    }

    /// Nearby-search URL without query parameters
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL. Contains the API key: never log it.
    pub fn request_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("location", &query.origin().to_string())
            .append_pair("radius", &query.radius_meters().to_string())
            .append_pair("keyword", query.keyword())
            .append_pair("key", query.api_key());
        url
    }

    /// Run one nearby search. Exactly one request is sent; nothing is retried.
    pub async fn search(&self, query: &SearchQuery) -> SearchResult {
        debug!(
            "Nearby search at {} (radius {}m, keyword {:?})",
            query.origin(),
            query.radius_meters(),
            query.keyword()
        );

        let response = self
            .http
            .get(self.request_url(query))
            .send()
            .await
            .map_err(|e| {
                let err = PlacesError::from_transport(e);
                warn!("Nearby search request failed: {}", err);
                err
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            let err = PlacesError::from_transport(e);
            warn!("Failed to read nearby search response: {}", err);
            err
        })?;

        trace!("Response body: {}", String::from_utf8_lossy(&body));

        classify(status, &body)
    }
}

/// Turn a completed HTTP exchange into a search result
pub(crate) fn classify(http_status: StatusCode, body: &[u8]) -> SearchResult {
    if !http_status.is_success() {
        // Error bodies are often not JSON at all
        let payload = decode_payload(body).ok();
        let api_status = payload.as_ref().and_then(|p| p.status.clone());
        let message = payload
            .and_then(|p| p.error_message)
            .unwrap_or_else(|| format!("request failed with HTTP status {}", http_status));

        warn!("Nearby search failed with status {}: {}", http_status, message);
        return Err(PlacesError::Api {
            http_status: http_status.as_u16(),
            api_status,
            message,
        });
    }

    let payload = decode_payload(body).map_err(|e| {
        warn!("Failed to parse nearby search response: {}", e);
        PlacesError::Decode(e.to_string())
    })?;

    // HTTP 200 can still carry a logical failure
    if let Some(status) = payload.status.as_ref().filter(|s| !s.is_success()) {
        let message = payload
            .error_message
            .clone()
            .unwrap_or_else(|| format!("request failed with status {}", status));

        warn!("Nearby search rejected upstream ({}): {}", status, message);
        return Err(PlacesError::Api {
            http_status: http_status.as_u16(),
            api_status: Some(status.clone()),
            message,
        });
    }

    if payload.dropped > 0 {
        debug!("Dropped {} invalid place records", payload.dropped);
    }
    info!("Nearby search returned {} places", payload.places.len());

    Ok(payload.places)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use crate::places::ApiStatus;
    use std::collections::HashMap;

    fn query(keyword: &str) -> SearchQuery {
        let origin = Coordinate::new(37.4219999, -122.0840575).unwrap();
        SearchQuery::new(origin, 2000, keyword, "test-key").unwrap()
    }

    fn client(base: &str) -> PlacesClient {
        PlacesClient::with_http_client(Client::new(), base).unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            client("https://maps.googleapis.com/").endpoint().as_str(),
            "https://maps.googleapis.com/maps/api/place/nearbysearch/json"
        );
        assert_eq!(
            client("http://127.0.0.1:8080").endpoint().as_str(),
            "http://127.0.0.1:8080/maps/api/place/nearbysearch/json"
        );
        assert_eq!(
            client("http://proxy.local/google").endpoint().as_str(),
            "http://proxy.local/google/maps/api/place/nearbysearch/json"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(PlacesClient::with_http_client(Client::new(), "not a url").is_err());
    }

    #[test]
    fn test_request_params() {
        let url = client(DEFAULT_BASE_URL).request_url(&query("café & bar"));
        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(
            params,
            vec![
                ("location".to_string(), "37.4219999,-122.0840575".to_string()),
                ("radius".to_string(), "2000".to_string()),
                ("keyword".to_string(), "café & bar".to_string()),
                ("key".to_string(), "test-key".to_string()),
            ]
        );
        // The raw '&' in the keyword must not split into a fifth parameter
        let map: HashMap<_, _> = url.query_pairs().collect();
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_classify_zero_results() {
        let body = br#"{"html_attributions": [], "results": [], "status": "ZERO_RESULTS"}"#;
        assert_eq!(classify(StatusCode::OK, body), Ok(vec![]));
    }

    #[test]
    fn test_classify_forbidden_without_body() {
        let err = classify(StatusCode::FORBIDDEN, b"").unwrap_err();
        assert!(err.is_api());
        assert!(!err.to_string().is_empty());
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_classify_http_error_uses_upstream_message() {
        let body = br#"{"error_message": "Quota exceeded", "results": [], "status": "OVER_QUERY_LIMIT"}"#;
        let err = classify(StatusCode::TOO_MANY_REQUESTS, body).unwrap_err();
        assert_eq!(
            err,
            PlacesError::Api {
                http_status: 429,
                api_status: Some(ApiStatus::OverQueryLimit),
                message: "Quota exceeded".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_logical_failure_on_200() {
        let body = br#"{"error_message": "The provided API key is invalid.", "results": [], "status": "REQUEST_DENIED"}"#;
        let err = classify(StatusCode::OK, body).unwrap_err();
        assert_eq!(err.to_string(), "The provided API key is invalid.");
    }

    #[test]
    fn test_classify_logical_failure_without_message() {
        let body = br#"{"results": [], "status": "INVALID_REQUEST"}"#;
        let err = classify(StatusCode::OK, body).unwrap_err();
        assert_eq!(err.to_string(), "request failed with status INVALID_REQUEST");
    }

    #[test]
    fn test_classify_missing_status_is_lenient() {
        let body = br#"{"results": [{"name": "A", "place_id": "a", "geometry": {"location": {"lat": 0.5, "lng": 0.5}}}]}"#;
        let places = classify(StatusCode::OK, body).unwrap();
        assert_eq!(places.len(), 1);
    }

    #[test]
    fn test_classify_malformed_json() {
        let err = classify(StatusCode::OK, b"{\"results\": [").unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.to_string(), "could not parse response");
    }
}
