//! # lotkeeper
//!
//! REST API and WebSocket service for a multi-floor parking facility.
//!
//! This crate implements the facility's spot allocation and ticket
//! lifecycle engine — compatible-spot search under concurrent access,
//! atomic reservation, per-floor availability counters, and ticket and
//! payment reconciliation on exit — and fronts it with an HTTP and
//! WebSocket interface.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── FacilityService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── AllocationEngine + Floors (domain/)
//!     ├── TicketLedger (domain/)
//!     │
//!     └── billing/ (PricingStrategy, PaymentGateway)
//! ```

pub mod api;
pub mod app_state;
pub mod billing;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
