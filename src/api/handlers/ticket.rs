//! Ticket handlers: park, exit, get, list.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ExitRequest, PaginationMeta, ParkRequest, TicketListParams, TicketListResponse,
    TicketResponse, TicketStateParam, TicketSummaryDto,
};
use crate::app_state::AppState;
use crate::domain::ledger::TicketFilter;
use crate::domain::ticket_id::TicketId;
use crate::error::{ErrorResponse, FacilityError};

/// `POST /tickets` — Park a vehicle and issue a ticket.
///
/// # Errors
///
/// Returns [`FacilityError::LotFull`] when no compatible spot is free
/// and [`FacilityError::InvalidRequest`] on a blank license plate.
#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    tag = "Tickets",
    summary = "Park a vehicle",
    description = "Reserves the first compatible free spot for the vehicle and issues an active ticket. Returns 409 when the facility has no compatible spot left.",
    request_body = ParkRequest,
    responses(
        (status = 201, description = "Vehicle parked, ticket issued", body = TicketResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "No compatible spot available", body = ErrorResponse),
    )
)]
pub async fn park_vehicle(
    State(state): State<AppState>,
    Json(req): Json<ParkRequest>,
) -> Result<impl IntoResponse, FacilityError> {
    let parked = state
        .facility
        .park(req.vehicle_class, &req.license_plate, &req.color)
        .await?;

    let Some(ticket) = parked else {
        return Err(FacilityError::LotFull(req.vehicle_class));
    };

    Ok((StatusCode::CREATED, Json(TicketResponse::from(&ticket))))
}

/// `POST /tickets/{id}/exit` — Unpark a vehicle and settle the fare.
///
/// # Errors
///
/// Returns [`FacilityError::TicketNotFound`],
/// [`FacilityError::TicketAlreadyClosed`], or
/// [`FacilityError::PaymentDeclined`]; a declined payment leaves the
/// session open for retry.
#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/exit",
    tag = "Tickets",
    summary = "Unpark a vehicle",
    description = "Prices the stay with the active strategy, charges the gateway, and on success releases the spot and closes the ticket. The transaction is all-or-nothing.",
    params(
        ("id" = uuid::Uuid, Path, description = "Ticket UUID"),
    ),
    request_body = ExitRequest,
    responses(
        (status = 200, description = "Vehicle unparked, ticket closed", body = TicketResponse),
        (status = 402, description = "Payment declined, session stays open", body = ErrorResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
        (status = 409, description = "Ticket already closed", body = ErrorResponse),
    )
)]
pub async fn exit_vehicle(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<ExitRequest>,
) -> Result<impl IntoResponse, FacilityError> {
    let ticket_id = TicketId::from_uuid(id);
    let closed = state.facility.unpark(ticket_id, req.payment_method).await?;
    Ok(Json(TicketResponse::from(&closed)))
}

/// `GET /tickets/{id}` — Get ticket details.
///
/// # Errors
///
/// Returns [`FacilityError::TicketNotFound`] if the ticket does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}",
    tag = "Tickets",
    summary = "Get ticket details",
    description = "Returns the ticket with the given ID, whether the session is still open or already closed.",
    params(
        ("id" = uuid::Uuid, Path, description = "Ticket UUID"),
    ),
    responses(
        (status = 200, description = "Ticket details", body = TicketResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
    )
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, FacilityError> {
    let ticket_id = TicketId::from_uuid(id);
    let ticket = state
        .facility
        .ticket(ticket_id)
        .await
        .ok_or(FacilityError::TicketNotFound(id))?;
    Ok(Json(TicketResponse::from(&ticket)))
}

/// `GET /tickets` — List tickets with pagination and optional state filter.
///
/// # Errors
///
/// Returns [`FacilityError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    tag = "Tickets",
    summary = "List tickets",
    description = "Returns a paginated list of tickets, optionally filtered to open or closed sessions.",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u32>, Query, description = "Items per page (max 100)"),
        ("state" = Option<String>, Query, description = "Filter: active or closed"),
    ),
    responses(
        (status = 200, description = "Paginated ticket list", body = TicketListResponse),
    )
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(params): Query<TicketListParams>,
) -> Result<impl IntoResponse, FacilityError> {
    let filter = match params.state {
        Some(TicketStateParam::Active) => TicketFilter::Active,
        Some(TicketStateParam::Closed) => TicketFilter::Closed,
        None => TicketFilter::All,
    };
    let summaries = state.facility.list_tickets(filter).await;

    let page = params.page.max(1);
    let per_page = params.per_page.clamp(1, 100);
    let total = summaries.len() as u32;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    let start = ((page - 1) * per_page) as usize;
    let data: Vec<TicketSummaryDto> = summaries
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .map(TicketSummaryDto::from)
        .collect();

    Ok(Json(TicketListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// Ticket routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tickets", post(park_vehicle).get(list_tickets))
        .route("/tickets/{id}", get(get_ticket))
        .route("/tickets/{id}/exit", post(exit_vehicle))
}
