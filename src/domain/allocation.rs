//! Cross-floor spot allocation: search, reserve, release.
//!
//! [`AllocationEngine`] owns every [`Floor`] and is the single writer of
//! spot state. It has no lock of its own: the service wraps it in the
//! facility-wide `Mutex`, so the search-and-occupy sequence in
//! [`AllocationEngine::find_and_reserve`] is one critical section and no
//! concurrent caller can observe a spot between check and reservation.
//!
//! # Determinism
//!
//! Floors are scanned in index order; within a floor, spot classes in
//! the vehicle's compatibility-priority order; within a class, spots in
//! creation order. A full facility yields `None`, never an error.

use std::sync::Arc;

use super::availability::AvailabilityBoard;
use super::floor::Floor;
use super::spot::{AssignedSpot, Spot, SpotClass};
use super::vehicle::Vehicle;
use crate::error::FacilityError;

/// Per-floor spot counts used to build the facility layout.
///
/// Classes are laid out in the order given, matching how the physical
/// facility numbers its spots.
pub type FloorLayout = Vec<(SpotClass, u16)>;

/// The facility's allocation engine: floors, spots, and counters.
#[derive(Debug)]
pub struct AllocationEngine {
    floors: Vec<Floor>,
    board: Arc<AvailabilityBoard>,
}

impl AllocationEngine {
    /// Builds an engine with `floor_count` identical floors laid out
    /// according to `layout`.
    ///
    /// Spot labels follow the `F<floor>R<row>S<number>` scheme with ten
    /// spots per row, numbering from 1 on each floor.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::InvalidConfig`] if the layout is empty
    /// or produces duplicate spot labels.
    pub fn build(floor_count: u16, layout: &FloorLayout) -> Result<Self, FacilityError> {
        if floor_count == 0 || layout.iter().all(|&(_, count)| count == 0) {
            return Err(FacilityError::InvalidConfig(
                "facility layout has no spots".to_string(),
            ));
        }

        let board = Arc::new(AvailabilityBoard::new());
        let mut floors = Vec::with_capacity(usize::from(floor_count));
        for floor_index in 0..floor_count {
            let mut floor = Floor::new(floor_index);
            let mut number: u16 = 1;
            for &(class, count) in layout {
                for _ in 0..count {
                    floor.add_spot(Spot::new(class, floor_index, number / 10, number))?;
                    number += 1;
                }
                board.add(class, u32::from(count));
            }
            floors.push(floor);
        }

        Ok(Self { floors, board })
    }

    /// The shared availability counters, readable without any lock.
    #[must_use]
    pub fn board(&self) -> &Arc<AvailabilityBoard> {
        &self.board
    }

    /// Number of floors in the facility.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Finds the first compatible free spot and occupies it.
    ///
    /// Returns `None` when no compatible spot is free anywhere; counters
    /// are untouched in that case.
    pub fn find_and_reserve(&mut self, vehicle: &Vehicle) -> Option<AssignedSpot> {
        for floor in &mut self.floors {
            if let Some(assigned) = floor.reserve(vehicle) {
                self.board.take(assigned.class);
                return Some(assigned);
            }
        }
        None
    }

    /// Frees a previously reserved spot, returning its occupant.
    ///
    /// Callers must guarantee exactly one release per successful
    /// reservation.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::Internal`] if the spot reference does
    /// not resolve or the spot was already free.
    pub fn release(&mut self, assigned: &AssignedSpot) -> Result<Vehicle, FacilityError> {
        let floor = self
            .floors
            .get_mut(usize::from(assigned.floor))
            .ok_or_else(|| {
                FacilityError::Internal(format!("unknown floor {}", assigned.floor))
            })?;
        let vehicle = floor.release(&assigned.id)?;
        self.board.add(assigned.class, 1);
        Ok(vehicle)
    }

    /// The occupant of a reserved spot, if any.
    #[must_use]
    pub fn occupant(&self, assigned: &AssignedSpot) -> Option<&Vehicle> {
        self.floors
            .get(usize::from(assigned.floor))
            .and_then(|floor| floor.occupant(&assigned.id))
    }
}
