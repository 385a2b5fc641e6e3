//! Facility service: orchestrates park/unpark transactions and emits events.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::billing::{
    ChargeOutcome, FlatRatePricing, HourlyPricing, PaymentGateway, PricingStrategy,
    SimulatedGateway,
};
use crate::config::{FacilityConfig, PricingKind};
use crate::domain::ledger::{TicketFilter, TicketLedger};
use crate::domain::parking_event::ParkingEvent;
use crate::domain::payment::{Payment, PaymentMethod};
use crate::domain::spot::SpotClass;
use crate::domain::ticket::{Ticket, TicketSummary};
use crate::domain::ticket_id::TicketId;
use crate::domain::vehicle::{Vehicle, VehicleClass};
use crate::domain::{AllocationEngine, AvailabilityBoard, EventBus};
use crate::error::FacilityError;

/// Orchestration layer for all parking transactions.
///
/// # Concurrency
///
/// `park` and `unpark` serialize on the facility-wide lock around the
/// [`AllocationEngine`]: the allocation decision, ticket mutation, and
/// counter updates form one atomic unit, so no caller can observe a
/// reserved spot without its ticket or claim a spot between check and
/// reservation. Administrative reads (availability snapshot, ticket
/// lookup, revenue) never take that lock and tolerate momentary
/// staleness.
#[derive(Debug)]
pub struct FacilityService {
    name: String,
    address: String,
    lot: Mutex<AllocationEngine>,
    ledger: TicketLedger,
    board: Arc<AvailabilityBoard>,
    pricing: RwLock<Arc<dyn PricingStrategy>>,
    gateway: Arc<dyn PaymentGateway>,
    event_bus: EventBus,
}

impl FacilityService {
    /// Creates a service over a pre-built allocation engine.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        engine: AllocationEngine,
        pricing: Arc<dyn PricingStrategy>,
        gateway: Arc<dyn PaymentGateway>,
        event_bus: EventBus,
    ) -> Self {
        let board = Arc::clone(engine.board());
        Self {
            name: name.into(),
            address: address.into(),
            lot: Mutex::new(engine),
            ledger: TicketLedger::new(),
            board,
            pricing: RwLock::new(pricing),
            gateway,
            event_bus,
        }
    }

    /// Builds the full service stack from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::InvalidConfig`] if the layout, pricing,
    /// or gateway settings are invalid.
    pub fn from_config(config: &FacilityConfig) -> Result<Self, FacilityError> {
        let engine = AllocationEngine::build(config.floor_count, &config.floor_layout())?;
        let pricing: Arc<dyn PricingStrategy> = match config.pricing {
            PricingKind::Hourly => Arc::new(HourlyPricing::standard()),
            PricingKind::Flat => Arc::new(FlatRatePricing::new(config.flat_rate_amount)?),
        };
        let gateway = Arc::new(SimulatedGateway::new(config.payment_success_rate)?);
        let event_bus = EventBus::new(config.event_bus_capacity);
        Ok(Self::new(
            config.facility_name.clone(),
            config.facility_address.clone(),
            engine,
            pricing,
            gateway,
            event_bus,
        ))
    }

    /// Facility name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Facility street address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Parks a vehicle: reserves a compatible spot and issues a ticket.
    ///
    /// Returns `Ok(None)` when no compatible spot is free anywhere; a
    /// `LotFull` event is published and nothing is allocated.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::InvalidRequest`] if the license plate is
    /// blank.
    pub async fn park(
        &self,
        class: VehicleClass,
        license_plate: &str,
        color: &str,
    ) -> Result<Option<Ticket>, FacilityError> {
        let plate = license_plate.trim();
        if plate.is_empty() {
            return Err(FacilityError::InvalidRequest(
                "license plate must not be blank".to_string(),
            ));
        }
        let vehicle = Vehicle::new(plate, class, color);

        let mut lot = self.lot.lock().await;
        let Some(assigned) = lot.find_and_reserve(&vehicle) else {
            tracing::info!(vehicle_class = %class, "no compatible spot free, turning vehicle away");
            let _ = self.event_bus.publish(ParkingEvent::LotFull {
                vehicle_class: class,
                timestamp: Utc::now(),
            });
            return Ok(None);
        };

        // Ticket issuance happens under the same critical section as the
        // reservation: a reserved spot without a ticket is never observable.
        let ticket = self.ledger.issue(vehicle.license_plate(), assigned.clone()).await;

        let _ = self.event_bus.publish(ParkingEvent::SpotOccupied {
            spot_id: assigned.id.clone(),
            floor: assigned.floor,
            spot_class: assigned.class,
            license_plate: vehicle.license_plate().to_string(),
            vehicle_class: class,
            timestamp: ticket.entry_time(),
        });

        tracing::info!(
            ticket_id = %ticket.ticket_id(),
            spot_id = %assigned.id,
            vehicle_class = %class,
            "vehicle parked"
        );
        Ok(Some(ticket))
    }

    /// Unparks a vehicle: prices the stay, charges the gateway, then
    /// releases the spot and closes the ticket.
    ///
    /// The transaction is all-or-nothing: the spot is released and the
    /// ticket closed only when the gateway accepts the charge. On a
    /// decline the session stays open for a later retry.
    ///
    /// # Errors
    ///
    /// - [`FacilityError::TicketNotFound`] for an unknown ticket ID.
    /// - [`FacilityError::TicketAlreadyClosed`] for a second close.
    /// - [`FacilityError::PaymentDeclined`] when the gateway declines.
    pub async fn unpark(
        &self,
        ticket_id: TicketId,
        method: PaymentMethod,
    ) -> Result<Ticket, FacilityError> {
        let mut lot = self.lot.lock().await;

        let Some(ticket) = self.ledger.active_ticket(ticket_id).await else {
            if self.ledger.lookup(ticket_id).await.is_some() {
                return Err(FacilityError::TicketAlreadyClosed(*ticket_id.as_uuid()));
            }
            return Err(FacilityError::TicketNotFound(*ticket_id.as_uuid()));
        };

        let vehicle_class = lot
            .occupant(ticket.spot())
            .map(Vehicle::class)
            .ok_or_else(|| {
                FacilityError::Internal(format!(
                    "active ticket {ticket_id} references unoccupied spot {}",
                    ticket.spot().id
                ))
            })?;

        let exit_time = Utc::now();
        let amount = {
            let pricing = self.pricing.read().await;
            pricing.price(ticket.entry_time(), exit_time, vehicle_class)
        };
        let payment = Payment::new(amount, method);
        let payment_id = payment.payment_id();

        match self.gateway.charge(&payment) {
            ChargeOutcome::Declined => {
                tracing::warn!(
                    ticket_id = %ticket_id,
                    payment_id = %payment_id,
                    amount,
                    "charge declined, session stays open"
                );
                Err(FacilityError::PaymentDeclined {
                    payment_id: *payment_id.as_uuid(),
                })
            }
            ChargeOutcome::Accepted => {
                let assigned = ticket.spot().clone();
                let _ = lot.release(&assigned)?;
                let closed = self
                    .ledger
                    .close(ticket_id, exit_time, payment.completed())
                    .await?;

                let _ = self.event_bus.publish(ParkingEvent::SpotFreed {
                    spot_id: assigned.id.clone(),
                    floor: assigned.floor,
                    spot_class: assigned.class,
                    timestamp: exit_time,
                });

                tracing::info!(
                    ticket_id = %ticket_id,
                    spot_id = %assigned.id,
                    amount,
                    "vehicle unparked"
                );
                Ok(closed)
            }
        }
    }

    /// Looks up a ticket by ID, active sessions first.
    pub async fn ticket(&self, ticket_id: TicketId) -> Option<Ticket> {
        self.ledger.lookup(ticket_id).await
    }

    /// Summaries of stored tickets matching the filter.
    pub async fn list_tickets(&self, filter: TicketFilter) -> Vec<TicketSummary> {
        self.ledger.list(filter).await
    }

    /// Weakly-consistent snapshot of free spots per class.
    ///
    /// Served from atomic counters without taking the facility-wide
    /// lock; may trail an in-flight transaction by one update.
    #[must_use]
    pub fn availability_by_class(&self) -> HashMap<SpotClass, u32> {
        self.board.snapshot()
    }

    /// Sum of settled payments for tickets closed with an exit time in
    /// `[start, end)`.
    pub async fn revenue(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
        self.ledger.revenue(start, end).await
    }

    /// Swaps the active pricing strategy.
    ///
    /// Takes effect for every ticket priced after the swap: an open
    /// session is billed with whatever strategy is active when it
    /// closes, not when it was issued.
    pub async fn set_pricing_strategy(&self, strategy: Arc<dyn PricingStrategy>) {
        let name = strategy.name();
        *self.pricing.write().await = strategy;
        tracing::info!(strategy = name, "pricing strategy swapped");
    }

    /// Name of the active pricing strategy.
    pub async fn pricing_strategy_name(&self) -> &'static str {
        self.pricing.read().await.name()
    }
}
