//! Facility handlers: availability snapshot, revenue report, pricing control.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    AvailabilityResponse, PricingRequest, PricingResponse, PricingStrategyParam, RevenueParams,
    RevenueResponse,
};
use crate::app_state::AppState;
use crate::billing::{FlatRatePricing, HourlyPricing, HourlyRates, PricingStrategy};
use crate::error::{ErrorResponse, FacilityError};

/// `GET /availability` — Free spots per class.
///
/// Served from lock-free counters: the snapshot is weakly consistent
/// and may trail an in-flight transaction by one update.
///
/// # Errors
///
/// Returns [`FacilityError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/availability",
    tag = "Facility",
    summary = "Availability snapshot",
    description = "Returns the number of free spots per spot class across all floors, read without taking the facility-wide transaction lock.",
    responses(
        (status = 200, description = "Per-class free counts", body = AvailabilityResponse),
    )
)]
pub async fn availability(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, FacilityError> {
    Ok(Json(AvailabilityResponse {
        availability: state.facility.availability_by_class(),
        timestamp: Utc::now(),
    }))
}

/// `GET /revenue` — Settled revenue in a time window.
///
/// # Errors
///
/// Returns [`FacilityError::InvalidRequest`] if the window is inverted.
#[utoipa::path(
    get,
    path = "/api/v1/revenue",
    tag = "Facility",
    summary = "Revenue report",
    description = "Sums settled payment amounts for tickets closed with an exit time in [start, end).",
    params(
        ("start" = String, Query, description = "Window start, inclusive (ISO-8601)"),
        ("end" = String, Query, description = "Window end, exclusive (ISO-8601)"),
    ),
    responses(
        (status = 200, description = "Revenue total", body = RevenueResponse),
        (status = 400, description = "Invalid window", body = ErrorResponse),
    )
)]
pub async fn revenue(
    State(state): State<AppState>,
    Query(params): Query<RevenueParams>,
) -> Result<impl IntoResponse, FacilityError> {
    if params.end < params.start {
        return Err(FacilityError::InvalidRequest(
            "revenue window end precedes start".to_string(),
        ));
    }
    let total = state.facility.revenue(params.start, params.end).await;
    Ok(Json(RevenueResponse {
        total,
        start: params.start,
        end: params.end,
    }))
}

/// `PUT /pricing` — Swap the active pricing strategy.
///
/// The swap affects tickets priced after it: open sessions are billed
/// with whatever strategy is active when they close.
///
/// # Errors
///
/// Returns [`FacilityError::InvalidConfig`] on a negative rate or fare.
#[utoipa::path(
    put,
    path = "/api/v1/pricing",
    tag = "Facility",
    summary = "Swap pricing strategy",
    description = "Activates the hourly or flat-rate strategy, optionally with a custom rate card or fare. Open sessions are priced with the strategy active at close time.",
    request_body = PricingRequest,
    responses(
        (status = 200, description = "Strategy activated", body = PricingResponse),
        (status = 500, description = "Invalid rates", body = ErrorResponse),
    )
)]
pub async fn set_pricing(
    State(state): State<AppState>,
    Json(req): Json<PricingRequest>,
) -> Result<impl IntoResponse, FacilityError> {
    let strategy: Arc<dyn PricingStrategy> = match req.strategy {
        PricingStrategyParam::Hourly => {
            let rates = req.hourly_rates.map_or_else(HourlyRates::standard, |r| {
                HourlyRates {
                    two_wheeler: r.two_wheeler,
                    compact: r.compact,
                    oversized: r.oversized,
                    electric: r.electric,
                }
            });
            Arc::new(HourlyPricing::new(rates)?)
        }
        PricingStrategyParam::FlatRate => {
            let amount = req.flat_amount.unwrap_or(FlatRatePricing::DEFAULT_AMOUNT);
            Arc::new(FlatRatePricing::new(amount)?)
        }
    };

    let name = strategy.name();
    state.facility.set_pricing_strategy(strategy).await;
    Ok(Json(PricingResponse {
        strategy: name.to_string(),
    }))
}

/// Facility routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/availability", get(availability))
        .route("/revenue", get(revenue))
        .route("/pricing", put(set_pricing))
}
