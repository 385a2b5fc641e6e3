//! Parking tickets and their lifecycle.
//!
//! A [`Ticket`] is issued `Active` at park time and closed exactly once
//! at exit, carrying the exit timestamp and the settled payment from
//! then on. The [`super::TicketLedger`] is the only owner; everything
//! handed out is a clone.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::payment::Payment;
use super::spot::AssignedSpot;
use super::ticket_id::TicketId;

/// Record binding a vehicle's parking session to its reserved spot and
/// billing outcome.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    ticket_id: TicketId,
    license_plate: String,
    spot: AssignedSpot,
    entry_time: DateTime<Utc>,
    exit_time: Option<DateTime<Utc>>,
    payment: Option<Payment>,
    active: bool,
}

impl Ticket {
    /// Issues a new active ticket for the given plate and spot.
    #[must_use]
    pub fn new(license_plate: impl Into<String>, spot: AssignedSpot) -> Self {
        Self {
            ticket_id: TicketId::new(),
            license_plate: license_plate.into(),
            spot,
            entry_time: Utc::now(),
            exit_time: None,
            payment: None,
            active: true,
        }
    }

    /// Ticket identifier.
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    /// License plate of the parked vehicle.
    #[must_use]
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// The reserved spot.
    #[must_use]
    pub const fn spot(&self) -> &AssignedSpot {
        &self.spot
    }

    /// Entry timestamp.
    #[must_use]
    pub const fn entry_time(&self) -> DateTime<Utc> {
        self.entry_time
    }

    /// Exit timestamp; `None` while the session is open.
    #[must_use]
    pub const fn exit_time(&self) -> Option<DateTime<Utc>> {
        self.exit_time
    }

    /// The settled payment; `None` while the session is open.
    #[must_use]
    pub const fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    /// Whether the session is still open.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Closes the ticket with an exit timestamp and settled payment.
    ///
    /// The ledger enforces exactly-once closing; this merely records the
    /// transition.
    pub(crate) fn close(&mut self, exit_time: DateTime<Utc>, payment: Payment) {
        self.exit_time = Some(exit_time);
        self.payment = Some(payment);
        self.active = false;
    }
}

/// Lightweight ticket summary for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct TicketSummary {
    /// Ticket identifier.
    pub ticket_id: TicketId,
    /// License plate.
    pub license_plate: String,
    /// Reserved spot reference.
    pub spot: AssignedSpot,
    /// Entry timestamp.
    pub entry_time: DateTime<Utc>,
    /// Whether the session is still open.
    pub active: bool,
}

impl From<&Ticket> for TicketSummary {
    fn from(ticket: &Ticket) -> Self {
        Self {
            ticket_id: ticket.ticket_id,
            license_plate: ticket.license_plate.clone(),
            spot: ticket.spot.clone(),
            entry_time: ticket.entry_time,
            active: ticket.active,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentMethod;
    use crate::domain::spot::{SpotClass, SpotId};

    fn make_spot() -> AssignedSpot {
        AssignedSpot {
            id: SpotId::new(0, 0, 1),
            floor: 0,
            class: SpotClass::Compact,
        }
    }

    #[test]
    fn new_ticket_is_active_and_unsettled() {
        let ticket = Ticket::new("CAR001", make_spot());
        assert!(ticket.is_active());
        assert!(ticket.exit_time().is_none());
        assert!(ticket.payment().is_none());
    }

    #[test]
    fn close_records_exit_and_payment() {
        let mut ticket = Ticket::new("CAR001", make_spot());
        let entry = ticket.entry_time();
        let exit = entry + chrono::Duration::minutes(90);

        ticket.close(exit, Payment::new(10.0, PaymentMethod::Cash).completed());

        assert!(!ticket.is_active());
        assert_eq!(ticket.exit_time(), Some(exit));
        assert!(ticket.entry_time() <= exit);
        assert!(ticket.payment().is_some());
    }

    #[test]
    fn summary_mirrors_the_ticket() {
        let ticket = Ticket::new("CAR001", make_spot());
        let summary = TicketSummary::from(&ticket);
        assert_eq!(summary.ticket_id, ticket.ticket_id());
        assert_eq!(summary.license_plate, "CAR001");
        assert!(summary.active);
    }
}
