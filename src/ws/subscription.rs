//! Per-connection subscription manager.
//!
//! Tracks which floors a WebSocket client watches and provides
//! server-side event filtering, mirroring the per-floor display boards
//! of a physical facility. Facility-wide events (lot full) reach every
//! connection regardless of floor filters.

use std::collections::HashSet;

/// Manages the set of floor subscriptions for a single WebSocket
/// connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed floor indices. If `subscribe_all` is true, this set is
    /// ignored.
    floors: HashSet<u16>,
    /// Whether the client subscribes to all floors (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds floor indices to the subscription set. `wildcard` enables
    /// the catch-all subscription.
    pub fn subscribe(&mut self, floors: &[u16], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for floor in floors {
            self.floors.insert(*floor);
        }
    }

    /// Removes floor indices from the subscription set.
    pub fn unsubscribe(&mut self, floors: &[u16]) {
        for floor in floors {
            self.floors.remove(floor);
        }
    }

    /// Returns `true` if an event concerning the given floor matches the
    /// subscription filter. Events without a floor are facility-wide and
    /// always match.
    #[must_use]
    pub fn matches(&self, floor: Option<u16>) -> bool {
        match floor {
            None => true,
            Some(floor) => self.subscribe_all || self.floors.contains(&floor),
        }
    }

    /// Returns the number of explicitly subscribed floors.
    #[must_use]
    pub fn count(&self) -> usize {
        self.floors.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_only_facility_wide_events() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(Some(0)));
        assert!(mgr.matches(None));
    }

    #[test]
    fn subscribe_specific_floor() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[1], false);
        assert!(mgr.matches(Some(1)));
        assert!(!mgr.matches(Some(2)));
    }

    #[test]
    fn wildcard_matches_every_floor() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(Some(0)));
        assert!(mgr.matches(Some(7)));
    }

    #[test]
    fn unsubscribe_removes_floor() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[3], false);
        assert!(mgr.matches(Some(3)));
        mgr.unsubscribe(&[3]);
        assert!(!mgr.matches(Some(3)));
    }

    #[test]
    fn count_tracks_explicit() {
        let mut mgr = SubscriptionManager::new();
        assert_eq!(mgr.count(), 0);
        mgr.subscribe(&[0, 1], false);
        assert_eq!(mgr.count(), 2);
    }
}
