//! Domain events reflecting facility state changes.
//!
//! Every park/unpark transition publishes a [`ParkingEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers
//! (per-floor display boards in spirit) in publish order.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::spot::{SpotClass, SpotId};
use super::vehicle::VehicleClass;

/// Domain event emitted at each well-defined publish point.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ParkingEvent {
    /// Emitted when a vehicle is assigned a spot.
    SpotOccupied {
        /// Spot identifier.
        spot_id: SpotId,
        /// Floor the spot lives on.
        floor: u16,
        /// Class of the assigned spot.
        spot_class: SpotClass,
        /// Plate of the parked vehicle.
        license_plate: String,
        /// Class of the parked vehicle.
        vehicle_class: VehicleClass,
        /// Assignment timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a spot is released back to the free pool.
    SpotFreed {
        /// Spot identifier.
        spot_id: SpotId,
        /// Floor the spot lives on.
        floor: u16,
        /// Class of the freed spot.
        spot_class: SpotClass,
        /// Release timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when no compatible spot exists for an arriving vehicle.
    LotFull {
        /// Class of the vehicle that was turned away.
        vehicle_class: VehicleClass,
        /// Rejection timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl ParkingEvent {
    /// The floor this event concerns, or `None` for facility-wide events.
    #[must_use]
    pub const fn floor(&self) -> Option<u16> {
        match self {
            Self::SpotOccupied { floor, .. } | Self::SpotFreed { floor, .. } => Some(*floor),
            Self::LotFull { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::SpotOccupied { .. } => "spot_occupied",
            Self::SpotFreed { .. } => "spot_freed",
            Self::LotFull { .. } => "lot_full",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn spot_occupied_serializes_with_tag() {
        let event = ParkingEvent::SpotOccupied {
            spot_id: SpotId::new(1, 0, 3),
            floor: 1,
            spot_class: SpotClass::Compact,
            license_plate: "CAR001".to_string(),
            vehicle_class: VehicleClass::Compact,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("spot_occupied"));
        assert!(json.contains("F1R0S3"));
        assert!(json.contains("CAR001"));
    }

    #[test]
    fn floor_accessor() {
        let freed = ParkingEvent::SpotFreed {
            spot_id: SpotId::new(2, 0, 1),
            floor: 2,
            spot_class: SpotClass::Electric,
            timestamp: Utc::now(),
        };
        assert_eq!(freed.floor(), Some(2));

        let full = ParkingEvent::LotFull {
            vehicle_class: VehicleClass::Oversized,
            timestamp: Utc::now(),
        };
        assert_eq!(full.floor(), None);
        assert_eq!(full.event_type_str(), "lot_full");
    }
}
