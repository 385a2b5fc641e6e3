//! Vehicle classes and the compatibility table driving spot allocation.
//!
//! Vehicle categories form a closed, rarely-changing set, so they are a
//! plain enum with a per-class capability lookup rather than a trait
//! hierarchy. The table lists acceptable spot classes in priority order:
//! the dedicated class first, then compatible larger classes.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::spot::SpotClass;

/// Category of a vehicle requesting a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    /// Motorcycles, scooters.
    TwoWheeler,
    /// Standard passenger cars.
    Compact,
    /// Trucks, buses, vans.
    Oversized,
    /// Electric vehicles preferring a charging spot.
    Electric,
}

impl VehicleClass {
    /// All vehicle classes, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::TwoWheeler,
        Self::Compact,
        Self::Oversized,
        Self::Electric,
    ];

    /// Spot classes this vehicle may occupy, in priority order.
    ///
    /// Accessible spots are reserved for administrative assignment and
    /// never appear in any row of this table.
    #[must_use]
    pub const fn compatible_spot_classes(self) -> &'static [SpotClass] {
        match self {
            Self::TwoWheeler => &[SpotClass::TwoWheeler, SpotClass::Compact, SpotClass::Oversized],
            Self::Compact => &[SpotClass::Compact, SpotClass::Oversized],
            Self::Oversized => &[SpotClass::Oversized],
            Self::Electric => &[SpotClass::Electric, SpotClass::Compact, SpotClass::Oversized],
        }
    }

    /// Snake-case name matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwoWheeler => "two_wheeler",
            Self::Compact => "compact",
            Self::Oversized => "oversized",
            Self::Electric => "electric",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle requesting or holding a parking session.
///
/// Immutable once created. The license plate is the session-unique key
/// a client uses to identify the vehicle; display attributes are carried
/// through to events untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    license_plate: String,
    class: VehicleClass,
    color: String,
}

impl Vehicle {
    /// Creates a new vehicle record.
    #[must_use]
    pub fn new(license_plate: impl Into<String>, class: VehicleClass, color: impl Into<String>) -> Self {
        Self {
            license_plate: license_plate.into(),
            class,
            color: color.into(),
        }
    }

    /// The vehicle's license plate.
    #[must_use]
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// The vehicle's class.
    #[must_use]
    pub const fn class(&self) -> VehicleClass {
        self.class
    }

    /// The vehicle's color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }
}
