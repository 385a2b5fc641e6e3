//! Domain layer: facility model, allocation engine, ticket ledger, and
//! event system.
//!
//! This module contains the server-side domain model: spot and vehicle
//! classes with their compatibility rules, per-floor spot registries,
//! the cross-floor allocation engine, ticket identity and lifecycle,
//! payment records, and the event bus for broadcasting state changes.

pub mod allocation;
pub mod availability;
pub mod event_bus;
pub mod floor;
pub mod ledger;
pub mod parking_event;
pub mod payment;
pub mod spot;
pub mod ticket;
pub mod ticket_id;
pub mod vehicle;

pub use allocation::AllocationEngine;
pub use availability::AvailabilityBoard;
pub use event_bus::EventBus;
pub use floor::Floor;
pub use ledger::{TicketFilter, TicketLedger};
pub use parking_event::ParkingEvent;
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use spot::{AssignedSpot, Spot, SpotClass, SpotStatus};
pub use ticket::{Ticket, TicketSummary};
pub use ticket_id::TicketId;
pub use vehicle::{Vehicle, VehicleClass};
