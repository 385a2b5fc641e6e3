//! Parking spots: classes, identity, and occupancy state.
//!
//! A [`Spot`]'s status is derived from its occupant: `occupant.is_some()`
//! if and only if the spot is occupied, so the status/occupant invariant
//! holds structurally and cannot drift.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::vehicle::Vehicle;
use crate::error::FacilityError;

/// Category of a parking space with an implicit size capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpotClass {
    /// Motorcycle / scooter spots.
    TwoWheeler,
    /// Standard car spots.
    Compact,
    /// Truck / bus spots.
    Oversized,
    /// Spots with a charging point.
    Electric,
    /// Accessible spots; excluded from automatic allocation.
    Accessible,
}

impl SpotClass {
    /// All spot classes, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::TwoWheeler,
        Self::Compact,
        Self::Oversized,
        Self::Electric,
        Self::Accessible,
    ];

    /// Stable index into per-class counter arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::TwoWheeler => 0,
            Self::Compact => 1,
            Self::Oversized => 2,
            Self::Electric => 3,
            Self::Accessible => 4,
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
            Self::Accessible => "accessible",
        }
    }
}

impl fmt::Display for SpotClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occupancy status of a spot, derived from its occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpotStatus {
    /// No vehicle assigned.
    Free,
    /// A vehicle is parked here.
    Occupied,
}

/// Facility-unique spot identifier.
///
/// Human-readable label of the form `F<floor>R<row>S<number>`, assigned
/// once at facility build time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SpotId(String);

impl SpotId {
    /// Builds the label for a spot at the given floor, row, and number.
    #[must_use]
    pub fn new(floor: u16, row: u16, number: u16) -> Self {
        Self(format!("F{floor}R{row}S{number}"))
    }

    /// The label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location of a reserved spot, carried on tickets and events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssignedSpot {
    /// Spot identifier.
    pub id: SpotId,
    /// Floor index the spot lives on.
    pub floor: u16,
    /// Class of the spot (may differ from the vehicle's dedicated class).
    pub class: SpotClass,
}

/// A single parking space.
///
/// Created at facility build time and never destroyed; mutated only via
/// the allocation engine's reserve/release path.
#[derive(Debug, Clone)]
pub struct Spot {
    id: SpotId,
    class: SpotClass,
    floor: u16,
    row: u16,
    number: u16,
    occupant: Option<Vehicle>,
}

impl Spot {
    /// Creates a free spot at the given location.
    #[must_use]
    pub fn new(class: SpotClass, floor: u16, row: u16, number: u16) -> Self {
        Self {
            id: SpotId::new(floor, row, number),
            class,
            floor,
            row,
            number,
            occupant: None,
        }
    }

    /// Spot identifier.
    #[must_use]
    pub const fn id(&self) -> &SpotId {
        &self.id
    }

    /// Spot class.
    #[must_use]
    pub const fn class(&self) -> SpotClass {
        self.class
    }

    /// Floor index.
    #[must_use]
    pub const fn floor(&self) -> u16 {
        self.floor
    }

    /// Row within the floor.
    #[must_use]
    pub const fn row(&self) -> u16 {
        self.row
    }

    /// Slot number within the floor.
    #[must_use]
    pub const fn number(&self) -> u16 {
        self.number
    }

    /// Current occupancy status.
    #[must_use]
    pub const fn status(&self) -> SpotStatus {
        if self.occupant.is_some() {
            SpotStatus::Occupied
        } else {
            SpotStatus::Free
        }
    }

    /// Returns `true` if no vehicle is assigned.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// The parked vehicle, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<&Vehicle> {
        self.occupant.as_ref()
    }

    /// Assigns a vehicle to this spot.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::Internal`] if the spot is already
    /// occupied; the allocation engine checks availability inside the
    /// same critical section, so this indicates a caller bug.
    pub fn occupy(&mut self, vehicle: Vehicle) -> Result<(), FacilityError> {
        if self.occupant.is_some() {
            return Err(FacilityError::Internal(format!(
                "spot {} is already occupied",
                self.id
            )));
        }
        self.occupant = Some(vehicle);
        Ok(())
    }

    /// Clears the spot, returning the vehicle that occupied it.
    pub fn vacate(&mut self) -> Option<Vehicle> {
        self.occupant.take()
    }

    /// The assigned-spot reference for tickets and events.
    #[must_use]
    pub fn assigned(&self) -> AssignedSpot {
        AssignedSpot {
            id: self.id.clone(),
            floor: self.floor,
            class: self.class,
        }
    }
}
