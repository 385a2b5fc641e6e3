//! Service layer: business logic orchestration.
//!
//! [`FacilityService`] coordinates park/unpark transactions across the
//! allocation engine, ticket ledger, pricing strategy, and payment
//! gateway, and emits events through the [`crate::domain::EventBus`].

pub mod facility_service;

pub use facility_service::FacilityService;
