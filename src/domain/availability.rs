//! Lock-free per-class availability counters.
//!
//! [`AvailabilityBoard`] mirrors the facility-wide free-spot totals in
//! atomics so that availability snapshots never contend with the
//! facility-wide transaction lock. Writers update the board inside the
//! reserve/release critical section; readers get a weakly-consistent
//! view that may trail an in-flight transaction by one update.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use super::spot::SpotClass;

/// Facility-wide free-spot counters, one per spot class.
#[derive(Debug, Default)]
pub struct AvailabilityBoard {
    counts: [AtomicU32; 5],
}

impl AvailabilityBoard {
    /// Creates a board with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current free count for a class.
    #[must_use]
    pub fn count(&self, class: SpotClass) -> u32 {
        self.counts
            .get(class.index())
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    /// Adds `n` free spots to a class counter (facility build, release).
    pub fn add(&self, class: SpotClass, n: u32) {
        if let Some(counter) = self.counts.get(class.index()) {
            counter.fetch_add(n, Ordering::Relaxed);
        }
    }

    /// Removes one free spot from a class counter (reservation).
    pub fn take(&self, class: SpotClass) {
        if let Some(counter) = self.counts.get(class.index()) {
            counter.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Snapshot of all counters, keyed by spot class.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<SpotClass, u32> {
        SpotClass::ALL
            .into_iter()
            .map(|class| (class, self.count(class)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let board = AvailabilityBoard::new();
        for class in SpotClass::ALL {
            assert_eq!(board.count(class), 0);
        }
    }

    #[test]
    fn add_and_take_round_trip() {
        let board = AvailabilityBoard::new();
        board.add(SpotClass::Compact, 3);
        assert_eq!(board.count(SpotClass::Compact), 3);

        board.take(SpotClass::Compact);
        assert_eq!(board.count(SpotClass::Compact), 2);

        board.add(SpotClass::Compact, 1);
        assert_eq!(board.count(SpotClass::Compact), 3);
    }

    #[test]
    fn snapshot_covers_every_class() {
        let board = AvailabilityBoard::new();
        board.add(SpotClass::Electric, 2);

        let snap = board.snapshot();
        assert_eq!(snap.len(), SpotClass::ALL.len());
        assert_eq!(snap.get(&SpotClass::Electric), Some(&2));
        assert_eq!(snap.get(&SpotClass::Oversized), Some(&0));
    }
}
