//! Per-floor spot registry with free-count caching.
//!
//! Each [`Floor`] owns its spot collection grouped by class, preserving
//! creation order, plus a per-class free-count cache. The cache is kept
//! in sync inside [`Floor::reserve`] and [`Floor::release`], which are
//! only ever called while the facility-wide lock is held.

use std::collections::HashMap;

use super::spot::{AssignedSpot, Spot, SpotClass, SpotId};
use super::vehicle::Vehicle;
use crate::error::FacilityError;

/// One floor of the facility: spot storage plus availability counters.
#[derive(Debug)]
pub struct Floor {
    index: u16,
    spots_by_class: HashMap<SpotClass, Vec<Spot>>,
    locations: HashMap<SpotId, (SpotClass, usize)>,
    free: HashMap<SpotClass, u32>,
}

impl Floor {
    /// Creates an empty floor with zeroed counters for every spot class.
    #[must_use]
    pub fn new(index: u16) -> Self {
        let mut spots_by_class = HashMap::new();
        let mut free = HashMap::new();
        for class in SpotClass::ALL {
            spots_by_class.insert(class, Vec::new());
            free.insert(class, 0);
        }
        Self {
            index,
            spots_by_class,
            locations: HashMap::new(),
            free,
        }
    }

    /// Floor index.
    #[must_use]
    pub const fn index(&self) -> u16 {
        self.index
    }

    /// Adds a spot to this floor at facility build time.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::InvalidConfig`] if a spot with the same
    /// ID was already added, or if the spot belongs to a different floor.
    pub fn add_spot(&mut self, spot: Spot) -> Result<(), FacilityError> {
        if spot.floor() != self.index {
            return Err(FacilityError::InvalidConfig(format!(
                "spot {} belongs to floor {}, not floor {}",
                spot.id(),
                spot.floor(),
                self.index
            )));
        }
        if self.locations.contains_key(spot.id()) {
            return Err(FacilityError::InvalidConfig(format!(
                "duplicate spot id {}",
                spot.id()
            )));
        }

        let class = spot.class();
        let was_free = spot.is_free();
        let slots = self.spots_by_class.entry(class).or_default();
        self.locations
            .insert(spot.id().clone(), (class, slots.len()));
        slots.push(spot);
        if was_free {
            *self.free.entry(class).or_insert(0) += 1;
        }
        Ok(())
    }

    /// Finds and occupies the first compatible free spot for `vehicle`.
    ///
    /// Spot classes are tried in the vehicle's compatibility-priority
    /// order; within a class, spots are scanned in creation order. The
    /// free counter is decremented in the same call, so the cache never
    /// disagrees with spot state between operations.
    pub fn reserve(&mut self, vehicle: &Vehicle) -> Option<AssignedSpot> {
        for &class in vehicle.class().compatible_spot_classes() {
            if self.free.get(&class).copied().unwrap_or(0) == 0 {
                continue;
            }
            let Some(slots) = self.spots_by_class.get_mut(&class) else {
                continue;
            };
            if let Some(spot) = slots.iter_mut().find(|s| s.is_free()) {
                let assigned = spot.assigned();
                if spot.occupy(vehicle.clone()).is_err() {
                    continue;
                }
                if let Some(count) = self.free.get_mut(&class) {
                    *count = count.saturating_sub(1);
                }
                return Some(assigned);
            }
        }
        None
    }

    /// Frees the spot with the given ID, returning its occupant.
    ///
    /// Callers must guarantee exactly one release per successful
    /// reservation; releasing a spot that is already free is a
    /// programming error, not a tolerated no-op.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::Internal`] if the spot ID is unknown on
    /// this floor or the spot was already free.
    pub fn release(&mut self, id: &SpotId) -> Result<Vehicle, FacilityError> {
        let (class, slot_index) = self
            .locations
            .get(id)
            .copied()
            .ok_or_else(|| {
                FacilityError::Internal(format!("unknown spot {id} on floor {}", self.index))
            })?;

        let spot = self
            .spots_by_class
            .get_mut(&class)
            .and_then(|slots| slots.get_mut(slot_index))
            .ok_or_else(|| {
                FacilityError::Internal(format!("spot {id} missing from class storage"))
            })?;

        let vehicle = spot.vacate().ok_or_else(|| {
            FacilityError::Internal(format!("spot {id} was released while already free"))
        })?;

        if let Some(count) = self.free.get_mut(&class) {
            *count += 1;
        }
        Ok(vehicle)
    }

    /// The occupant of a spot, if the spot exists and is occupied.
    #[must_use]
    pub fn occupant(&self, id: &SpotId) -> Option<&Vehicle> {
        let (class, slot_index) = self.locations.get(id).copied()?;
        self.spots_by_class
            .get(&class)
            .and_then(|slots| slots.get(slot_index))
            .and_then(Spot::occupant)
    }

    /// Free spots of the given class on this floor.
    #[must_use]
    pub fn free_count(&self, class: SpotClass) -> u32 {
        self.free.get(&class).copied().unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::vehicle::VehicleClass;

    fn floor_with(spots: &[(SpotClass, u16)]) -> Floor {
        let mut floor = Floor::new(0);
        let mut number = 1;
        for &(class, count) in spots {
            for _ in 0..count {
                let spot = Spot::new(class, 0, number / 10, number);
                let Ok(()) = floor.add_spot(spot) else {
                    panic!("spot add failed");
                };
                number += 1;
            }
        }
        floor
    }

    #[test]
    fn reserve_prefers_dedicated_class() {
        let mut floor = floor_with(&[(SpotClass::Compact, 1), (SpotClass::Oversized, 1)]);
        let vehicle = Vehicle::new("CAR001", VehicleClass::Compact, "red");

        let assigned = floor.reserve(&vehicle);
        assert_eq!(assigned.map(|a| a.class), Some(SpotClass::Compact));
        assert_eq!(floor.free_count(SpotClass::Compact), 0);
        assert_eq!(floor.free_count(SpotClass::Oversized), 1);
    }

    #[test]
    fn reserve_overflows_to_larger_class() {
        let mut floor = floor_with(&[(SpotClass::Compact, 1), (SpotClass::Oversized, 1)]);
        let vehicle = Vehicle::new("CAR001", VehicleClass::Compact, "red");

        let first = floor.reserve(&vehicle);
        let second = floor.reserve(&vehicle);
        assert_eq!(first.map(|a| a.class), Some(SpotClass::Compact));
        assert_eq!(second.map(|a| a.class), Some(SpotClass::Oversized));
        assert!(floor.reserve(&vehicle).is_none());
    }

    #[test]
    fn two_wheeler_overflow_order() {
        let mut floor = floor_with(&[
            (SpotClass::TwoWheeler, 1),
            (SpotClass::Compact, 1),
            (SpotClass::Oversized, 1),
        ]);
        let bike = Vehicle::new("BIKE001", VehicleClass::TwoWheeler, "black");

        let classes: Vec<_> = (0..3)
            .filter_map(|_| floor.reserve(&bike).map(|a| a.class))
            .collect();
        assert_eq!(
            classes,
            vec![SpotClass::TwoWheeler, SpotClass::Compact, SpotClass::Oversized]
        );
    }

    #[test]
    fn accessible_spots_are_skipped() {
        let mut floor = floor_with(&[(SpotClass::Accessible, 2)]);
        for class in VehicleClass::ALL {
            let vehicle = Vehicle::new("ANY", class, "white");
            assert!(floor.reserve(&vehicle).is_none());
        }
        assert_eq!(floor.free_count(SpotClass::Accessible), 2);
    }

    #[test]
    fn release_restores_counter_and_returns_occupant() {
        let mut floor = floor_with(&[(SpotClass::Compact, 1)]);
        let vehicle = Vehicle::new("CAR001", VehicleClass::Compact, "red");

        let Some(assigned) = floor.reserve(&vehicle) else {
            panic!("expected a spot");
        };
        assert_eq!(floor.free_count(SpotClass::Compact), 0);

        let released = floor.release(&assigned.id);
        assert_eq!(
            released.ok().map(|v| v.license_plate().to_string()),
            Some("CAR001".to_string())
        );
        assert_eq!(floor.free_count(SpotClass::Compact), 1);
    }

    #[test]
    fn double_release_is_an_error() {
        let mut floor = floor_with(&[(SpotClass::Compact, 1)]);
        let vehicle = Vehicle::new("CAR001", VehicleClass::Compact, "red");

        let Some(assigned) = floor.reserve(&vehicle) else {
            panic!("expected a spot");
        };
        assert!(floor.release(&assigned.id).is_ok());
        assert!(floor.release(&assigned.id).is_err());
        assert_eq!(floor.free_count(SpotClass::Compact), 1);
    }

    #[test]
    fn duplicate_spot_id_is_rejected() {
        let mut floor = Floor::new(0);
        let Ok(()) = floor.add_spot(Spot::new(SpotClass::Compact, 0, 0, 1)) else {
            panic!("first add failed");
        };
        assert!(floor.add_spot(Spot::new(SpotClass::Compact, 0, 0, 1)).is_err());
    }

    #[test]
    fn zero_capacity_class_is_never_matched() {
        let mut floor = floor_with(&[(SpotClass::Oversized, 1)]);
        let bike = Vehicle::new("BIKE001", VehicleClass::TwoWheeler, "black");
        // No two-wheeler or compact spots configured; falls through to oversized.
        assert_eq!(
            floor.reserve(&bike).map(|a| a.class),
            Some(SpotClass::Oversized)
        );
    }
}
