//! Query gateway for nearby place searches.
//!
//! Exposes the places client over HTTP so a map front end only has to send
//! its current location and a keyword.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{http::StatusCode, response::Json, routing::get, Router};
use clap::Parser;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use nearby::config::Config;
use nearby::places::PlacesClient;

mod nearby_search;
use nearby_search::nearby_handler;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Nearby places query gateway")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// Places API key (overrides config)
    #[arg(long)]
    api_key: Option<String>,

    /// Places API base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,
}

/// Application state shared across handlers
pub struct AppState {
    places: PlacesClient,
    api_key: String,
    default_radius: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(key) = args.api_key {
        config.places.api_key = Some(key);
    }
    if let Some(base_url) = args.base_url {
        config.places.base_url = base_url;
    }

    let api_key = config
        .places
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .context("No places API key configured (set places.api_key or pass --api-key)")?;

    info!("Nearby Query Gateway");
    info!("Places endpoint at {}", config.places.base_url);

    let places = PlacesClient::new(&config.places)?;

    let state = Arc::new(AppState {
        places,
        api_key,
        default_radius: config.places.radius_meters,
    });

    let app = router(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/nearby", get(nearby_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_handler() -> Result<Json<HealthResponse>, StatusCode> {
    Ok(Json(HealthResponse { status: "ok" }))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}
