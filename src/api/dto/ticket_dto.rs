//! Ticket-related DTOs for park, exit, get, and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::payment::{Payment, PaymentId, PaymentMethod, PaymentStatus};
use crate::domain::spot::{SpotClass, SpotId};
use crate::domain::ticket::{Ticket, TicketSummary};
use crate::domain::ticket_id::TicketId;
use crate::domain::vehicle::VehicleClass;

/// Request body for `POST /tickets` (park a vehicle).
#[derive(Debug, Deserialize, ToSchema)]
pub struct ParkRequest {
    /// Class of the arriving vehicle.
    pub vehicle_class: VehicleClass,
    /// License plate (session-unique key).
    pub license_plate: String,
    /// Vehicle color for display boards.
    #[serde(default)]
    pub color: String,
}

/// Request body for `POST /tickets/{id}/exit` (unpark a vehicle).
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExitRequest {
    /// How the driver pays.
    pub payment_method: PaymentMethod,
}

/// Settled payment attached to a closed ticket.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentDto {
    /// Payment identifier.
    pub payment_id: PaymentId,
    /// Charged amount.
    pub amount: f64,
    /// Payment method.
    pub method: PaymentMethod,
    /// Settlement status.
    pub status: PaymentStatus,
    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,
}

impl From<&Payment> for PaymentDto {
    fn from(payment: &Payment) -> Self {
        Self {
            payment_id: payment.payment_id(),
            amount: payment.amount(),
            method: payment.method(),
            status: payment.status(),
            timestamp: payment.timestamp(),
        }
    }
}

/// Full ticket detail for park, exit, and get responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketResponse {
    /// Ticket identifier.
    pub ticket_id: TicketId,
    /// License plate of the parked vehicle.
    pub license_plate: String,
    /// Assigned spot label.
    pub spot_id: SpotId,
    /// Floor the spot lives on.
    pub floor: u16,
    /// Class of the assigned spot.
    pub spot_class: SpotClass,
    /// Entry timestamp.
    pub entry_time: DateTime<Utc>,
    /// Exit timestamp, present once closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<DateTime<Utc>>,
    /// Settled payment, present once closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentDto>,
    /// Whether the session is still open.
    pub active: bool,
}

impl From<&Ticket> for TicketResponse {
    fn from(ticket: &Ticket) -> Self {
        Self {
            ticket_id: ticket.ticket_id(),
            license_plate: ticket.license_plate().to_string(),
            spot_id: ticket.spot().id.clone(),
            floor: ticket.spot().floor,
            spot_class: ticket.spot().class,
            entry_time: ticket.entry_time(),
            exit_time: ticket.exit_time(),
            payment: ticket.payment().map(PaymentDto::from),
            active: ticket.is_active(),
        }
    }
}

/// Ticket state filter for list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketStateParam {
    /// Open sessions only.
    Active,
    /// Closed sessions only.
    Closed,
}

/// Query parameters for `GET /tickets`.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketListParams {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Optional state filter.
    #[serde(default)]
    pub state: Option<TicketStateParam>,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

/// Ticket summary for list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketSummaryDto {
    /// Ticket identifier.
    pub ticket_id: TicketId,
    /// License plate.
    pub license_plate: String,
    /// Assigned spot label.
    pub spot_id: SpotId,
    /// Floor the spot lives on.
    pub floor: u16,
    /// Entry timestamp.
    pub entry_time: DateTime<Utc>,
    /// Whether the session is still open.
    pub active: bool,
}

impl From<TicketSummary> for TicketSummaryDto {
    fn from(summary: TicketSummary) -> Self {
        Self {
            ticket_id: summary.ticket_id,
            license_plate: summary.license_plate,
            spot_id: summary.spot.id,
            floor: summary.spot.floor,
            entry_time: summary.entry_time,
            active: summary.active,
        }
    }
}

/// Paginated list response for `GET /tickets`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TicketListResponse {
    /// Ticket summaries.
    pub data: Vec<TicketSummaryDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
