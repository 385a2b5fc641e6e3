//! Ticket storage: active sessions and closed history.
//!
//! [`TicketLedger`] keeps two `HashMap`s behind [`tokio::sync::RwLock`]s.
//! Mutation happens only inside the facility-wide transaction, so the
//! locks exist for lock-free administrative reads (ticket lookup,
//! revenue reporting), which tolerate momentary staleness.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::payment::Payment;
use super::spot::AssignedSpot;
use super::ticket::{Ticket, TicketSummary};
use super::ticket_id::TicketId;
use crate::error::FacilityError;

/// Filter for ticket list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketFilter {
    /// Every ticket, open or closed.
    All,
    /// Open sessions only.
    Active,
    /// Closed sessions only.
    Closed,
}

/// Store for all issued tickets.
#[derive(Debug, Default)]
pub struct TicketLedger {
    active: RwLock<HashMap<TicketId, Ticket>>,
    history: RwLock<HashMap<TicketId, Ticket>>,
}

impl TicketLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new active ticket for the given plate and spot.
    pub async fn issue(&self, license_plate: &str, spot: AssignedSpot) -> Ticket {
        let ticket = Ticket::new(license_plate, spot);
        let mut active = self.active.write().await;
        active.insert(ticket.ticket_id(), ticket.clone());
        ticket
    }

    /// Returns the active ticket with the given ID, if the session is open.
    pub async fn active_ticket(&self, ticket_id: TicketId) -> Option<Ticket> {
        self.active.read().await.get(&ticket_id).cloned()
    }

    /// Looks up a ticket by ID, checking the active set first, then history.
    pub async fn lookup(&self, ticket_id: TicketId) -> Option<Ticket> {
        if let Some(ticket) = self.active.read().await.get(&ticket_id) {
            return Some(ticket.clone());
        }
        self.history.read().await.get(&ticket_id).cloned()
    }

    /// Closes an active ticket exactly once, moving it to history.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::TicketAlreadyClosed`] if the ticket has
    /// already been closed, or [`FacilityError::TicketNotFound`] if the
    /// ID was never issued. A failed close mutates nothing.
    pub async fn close(
        &self,
        ticket_id: TicketId,
        exit_time: DateTime<Utc>,
        payment: Payment,
    ) -> Result<Ticket, FacilityError> {
        let mut active = self.active.write().await;
        let Some(mut ticket) = active.remove(&ticket_id) else {
            if self.history.read().await.contains_key(&ticket_id) {
                return Err(FacilityError::TicketAlreadyClosed(*ticket_id.as_uuid()));
            }
            return Err(FacilityError::TicketNotFound(*ticket_id.as_uuid()));
        };

        ticket.close(exit_time, payment);
        let mut history = self.history.write().await;
        history.insert(ticket_id, ticket.clone());
        Ok(ticket)
    }

    /// Sum of settled payment amounts for tickets closed with an exit
    /// time in `[start, end)`.
    pub async fn revenue(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
        let history = self.history.read().await;
        history
            .values()
            .filter_map(|ticket| {
                let exit = ticket.exit_time()?;
                if exit >= start && exit < end {
                    ticket.payment().map(Payment::amount)
                } else {
                    None
                }
            })
            .sum()
    }

    /// Summaries of stored tickets matching the filter, newest entry first.
    pub async fn list(&self, filter: TicketFilter) -> Vec<TicketSummary> {
        let mut summaries = Vec::new();
        if matches!(filter, TicketFilter::All | TicketFilter::Active) {
            let active = self.active.read().await;
            summaries.extend(active.values().map(TicketSummary::from));
        }
        if matches!(filter, TicketFilter::All | TicketFilter::Closed) {
            let history = self.history.read().await;
            summaries.extend(history.values().map(TicketSummary::from));
        }
        summaries.sort_by(|a, b| b.entry_time.cmp(&a.entry_time));
        summaries
    }

    /// Number of open sessions.
    pub async fn active_count(&self) -> usize {
        self.active.read().await.len()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentMethod;
    use crate::domain::spot::{SpotClass, SpotId};

    fn make_spot(number: u16) -> AssignedSpot {
        AssignedSpot {
            id: SpotId::new(0, 0, number),
            floor: 0,
            class: SpotClass::Compact,
        }
    }

    #[tokio::test]
    async fn issue_and_lookup() {
        let ledger = TicketLedger::new();
        let ticket = ledger.issue("CAR001", make_spot(1)).await;

        let found = ledger.lookup(ticket.ticket_id()).await;
        assert_eq!(found.map(|t| t.ticket_id()), Some(ticket.ticket_id()));
        assert_eq!(ledger.active_count().await, 1);
    }

    #[tokio::test]
    async fn lookup_unknown_returns_none() {
        let ledger = TicketLedger::new();
        assert!(ledger.lookup(TicketId::new()).await.is_none());
    }

    #[tokio::test]
    async fn close_moves_ticket_to_history() {
        let ledger = TicketLedger::new();
        let ticket = ledger.issue("CAR001", make_spot(1)).await;
        let payment = Payment::new(5.0, PaymentMethod::Cash).completed();

        let closed = ledger.close(ticket.ticket_id(), Utc::now(), payment).await;
        let Ok(closed) = closed else {
            panic!("close failed");
        };
        assert!(!closed.is_active());
        assert!(closed.payment().is_some());

        assert_eq!(ledger.active_count().await, 0);
        // Still reachable through lookup, now from history.
        assert!(ledger.lookup(ticket.ticket_id()).await.is_some());
        assert!(ledger.active_ticket(ticket.ticket_id()).await.is_none());
    }

    #[tokio::test]
    async fn second_close_fails_and_changes_nothing() {
        let ledger = TicketLedger::new();
        let ticket = ledger.issue("CAR001", make_spot(1)).await;
        let id = ticket.ticket_id();

        let first = ledger
            .close(id, Utc::now(), Payment::new(5.0, PaymentMethod::Cash).completed())
            .await;
        assert!(first.is_ok());

        let second = ledger
            .close(id, Utc::now(), Payment::new(5.0, PaymentMethod::Cash).completed())
            .await;
        assert!(matches!(
            second,
            Err(FacilityError::TicketAlreadyClosed(_))
        ));

        // The stored record still carries the first close.
        let stored = ledger.lookup(id).await;
        assert_eq!(stored.and_then(|t| t.payment().map(Payment::amount)), Some(5.0));
    }

    #[tokio::test]
    async fn close_unknown_is_not_found() {
        let ledger = TicketLedger::new();
        let result = ledger
            .close(
                TicketId::new(),
                Utc::now(),
                Payment::new(5.0, PaymentMethod::Cash).completed(),
            )
            .await;
        assert!(matches!(result, Err(FacilityError::TicketNotFound(_))));
    }

    #[tokio::test]
    async fn revenue_uses_half_open_window() {
        let ledger = TicketLedger::new();
        let start = Utc::now();

        let t1 = ledger.issue("CAR001", make_spot(1)).await;
        let t2 = ledger.issue("CAR002", make_spot(2)).await;

        let exit_inside = start + chrono::Duration::minutes(10);
        let exit_at_end = start + chrono::Duration::minutes(20);

        let _ = ledger
            .close(
                t1.ticket_id(),
                exit_inside,
                Payment::new(5.0, PaymentMethod::Cash).completed(),
            )
            .await;
        let _ = ledger
            .close(
                t2.ticket_id(),
                exit_at_end,
                Payment::new(8.0, PaymentMethod::Cash).completed(),
            )
            .await;

        // End boundary is exclusive: the ticket closed exactly at `end`
        // does not count.
        let total = ledger.revenue(start, exit_at_end).await;
        assert_eq!(total, 5.0);

        let total_all = ledger
            .revenue(start, exit_at_end + chrono::Duration::seconds(1))
            .await;
        assert_eq!(total_all, 13.0);
    }

    #[tokio::test]
    async fn list_filters_by_state() {
        let ledger = TicketLedger::new();
        let open = ledger.issue("CAR001", make_spot(1)).await;
        let closed = ledger.issue("CAR002", make_spot(2)).await;
        let _ = ledger
            .close(
                closed.ticket_id(),
                Utc::now(),
                Payment::new(5.0, PaymentMethod::Cash).completed(),
            )
            .await;

        assert_eq!(ledger.list(TicketFilter::All).await.len(), 2);

        let active = ledger.list(TicketFilter::Active).await;
        assert_eq!(
            active.first().map(|s| s.ticket_id),
            Some(open.ticket_id())
        );

        let history = ledger.list(TicketFilter::Closed).await;
        assert_eq!(
            history.first().map(|s| s.ticket_id),
            Some(closed.ticket_id())
        );
    }
}
