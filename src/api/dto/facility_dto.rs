//! Facility-level DTOs: availability, revenue, and pricing control.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::spot::SpotClass;

/// Response body for `GET /availability`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    /// Free spots per class across all floors.
    pub availability: HashMap<SpotClass, u32>,
    /// Snapshot timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Query parameters for `GET /revenue`.
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueParams {
    /// Start of the reporting window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the reporting window (exclusive).
    pub end: DateTime<Utc>,
}

/// Response body for `GET /revenue`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueResponse {
    /// Sum of settled payment amounts in the window.
    pub total: f64,
    /// Start of the reporting window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the reporting window (exclusive).
    pub end: DateTime<Utc>,
}

/// Pricing strategy selector for `PUT /pricing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PricingStrategyParam {
    /// Per-class hourly rates, hours rounded up.
    Hourly,
    /// Constant fare regardless of duration.
    FlatRate,
}

/// Hourly rate card as provided by clients.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct HourlyRatesDto {
    /// Rate for two-wheelers.
    pub two_wheeler: f64,
    /// Rate for compact cars.
    pub compact: f64,
    /// Rate for oversized vehicles.
    pub oversized: f64,
    /// Rate for electric vehicles.
    pub electric: f64,
}

/// Request body for `PUT /pricing`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PricingRequest {
    /// Which strategy to activate.
    pub strategy: PricingStrategyParam,
    /// Custom hourly rate card; the standard card is used when absent.
    #[serde(default)]
    pub hourly_rates: Option<HourlyRatesDto>,
    /// Flat fare amount; the default fare is used when absent.
    #[serde(default)]
    pub flat_amount: Option<f64>,
}

/// Response body for `PUT /pricing`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PricingResponse {
    /// Name of the now-active strategy.
    pub strategy: String,
}
