//! System endpoints: health check, spot class catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Spot class info.
#[derive(Debug, Serialize, ToSchema)]
struct SpotClassInfo {
    spot_class: &'static str,
    description: &'static str,
    auto_assignable: bool,
}

/// `GET /config/spot-classes` — List supported spot classes.
#[utoipa::path(
    get,
    path = "/config/spot-classes",
    tag = "System",
    summary = "List supported spot classes",
    description = "Returns metadata for every spot class the facility can be configured with.",
    responses(
        (status = 200, description = "Spot class catalog", body = Vec<SpotClassInfo>),
    )
)]
pub async fn spot_classes_handler() -> impl IntoResponse {
    let classes = vec![
        SpotClassInfo {
            spot_class: "two_wheeler",
            description: "Motorcycle and scooter spots",
            auto_assignable: true,
        },
        SpotClassInfo {
            spot_class: "compact",
            description: "Standard car spots",
            auto_assignable: true,
        },
        SpotClassInfo {
            spot_class: "oversized",
            description: "Truck and bus spots",
            auto_assignable: true,
        },
        SpotClassInfo {
            spot_class: "electric",
            description: "Spots with a charging point",
            auto_assignable: true,
        },
        SpotClassInfo {
            spot_class: "accessible",
            description: "Accessible spots, assigned administratively",
            auto_assignable: false,
        },
    ];
    (StatusCode::OK, Json(classes))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/spot-classes", get(spot_classes_handler))
}
