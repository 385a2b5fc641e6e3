//! lotkeeper server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lotkeeper::api;
use lotkeeper::app_state::AppState;
use lotkeeper::config::FacilityConfig;
use lotkeeper::service::FacilityService;
use lotkeeper::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = FacilityConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting lotkeeper");

    // Build the facility stack
    let facility = Arc::new(FacilityService::from_config(&config)?);
    let event_bus = facility.event_bus().clone();
    tracing::info!(
        name = facility.name(),
        address = facility.address(),
        floors = config.floor_count,
        "facility ready"
    );

    // Build application state
    let app_state = AppState {
        facility,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
