//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::FacilityService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Facility service for all business logic.
    pub facility: Arc<FacilityService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
