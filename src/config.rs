//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with sensible defaults for local
//! development.

use std::net::SocketAddr;

use crate::domain::allocation::FloorLayout;
use crate::domain::spot::SpotClass;

/// Which pricing strategy the facility starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingKind {
    /// Per-class hourly rates, hours rounded up.
    Hourly,
    /// Constant fare regardless of duration.
    Flat,
}

/// Per-floor spot counts, one per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotsPerFloor {
    /// Two-wheeler spots per floor.
    pub two_wheeler: u16,
    /// Compact spots per floor.
    pub compact: u16,
    /// Oversized spots per floor.
    pub oversized: u16,
    /// Electric (charging) spots per floor.
    pub electric: u16,
    /// Accessible spots per floor (administrative assignment only).
    pub accessible: u16,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`FacilityConfig::from_env`].
#[derive(Debug, Clone)]
pub struct FacilityConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Facility display name.
    pub facility_name: String,

    /// Facility street address.
    pub facility_address: String,

    /// Number of identical floors.
    pub floor_count: u16,

    /// Spot counts per floor.
    pub spots_per_floor: SpotsPerFloor,

    /// Acceptance probability of the simulated payment gateway.
    pub payment_success_rate: f64,

    /// Pricing strategy active at startup.
    pub pricing: PricingKind,

    /// Fare used when the flat strategy is active.
    pub flat_rate_amount: f64,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,
}

impl FacilityConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let facility_name =
            std::env::var("FACILITY_NAME").unwrap_or_else(|_| "Smart Parking Complex".to_string());
        let facility_address =
            std::env::var("FACILITY_ADDRESS").unwrap_or_else(|_| "123 Main Street".to_string());

        let floor_count = parse_env("FACILITY_FLOORS", 2);
        let spots_per_floor = SpotsPerFloor {
            two_wheeler: parse_env("SPOTS_TWO_WHEELER_PER_FLOOR", 5),
            compact: parse_env("SPOTS_COMPACT_PER_FLOOR", 5),
            oversized: parse_env("SPOTS_OVERSIZED_PER_FLOOR", 3),
            electric: parse_env("SPOTS_ELECTRIC_PER_FLOOR", 2),
            accessible: parse_env("SPOTS_ACCESSIBLE_PER_FLOOR", 2),
        };

        let payment_success_rate = parse_env("PAYMENT_SUCCESS_RATE", 0.9);
        let pricing = match std::env::var("PRICING_STRATEGY").ok().as_deref() {
            Some("flat") | Some("FLAT") => PricingKind::Flat,
            _ => PricingKind::Hourly,
        };
        let flat_rate_amount = parse_env("FLAT_RATE_AMOUNT", 15.0);

        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 10_000);

        Ok(Self {
            listen_addr,
            facility_name,
            facility_address,
            floor_count,
            spots_per_floor,
            payment_success_rate,
            pricing,
            flat_rate_amount,
            event_bus_capacity,
        })
    }

    /// The per-floor layout in spot-numbering order.
    #[must_use]
    pub fn floor_layout(&self) -> FloorLayout {
        vec![
            (SpotClass::TwoWheeler, self.spots_per_floor.two_wheeler),
            (SpotClass::Compact, self.spots_per_floor.compact),
            (SpotClass::Oversized, self.spots_per_floor.oversized),
            (SpotClass::Electric, self.spots_per_floor.electric),
            (SpotClass::Accessible, self.spots_per_floor.accessible),
        ]
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn layout_preserves_numbering_order() {
        let config = FacilityConfig {
            listen_addr: "127.0.0.1:3000".parse().ok().unwrap_or_else(|| {
                panic!("bad addr");
            }),
            facility_name: "Test".to_string(),
            facility_address: "1 Test St".to_string(),
            floor_count: 1,
            spots_per_floor: SpotsPerFloor {
                two_wheeler: 1,
                compact: 2,
                oversized: 3,
                electric: 4,
                accessible: 5,
            },
            payment_success_rate: 0.9,
            pricing: PricingKind::Hourly,
            flat_rate_amount: 15.0,
            event_bus_capacity: 100,
        };

        let layout = config.floor_layout();
        assert_eq!(layout.first(), Some(&(SpotClass::TwoWheeler, 1)));
        assert_eq!(layout.last(), Some(&(SpotClass::Accessible, 5)));
    }
}
