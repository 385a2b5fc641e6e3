//! Facility error types with HTTP status code mapping.
//!
//! [`FacilityError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::vehicle::VehicleClass;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "ticket not found: ...",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 Internal Server Error  |
/// | 4000–4999 | Facility        | 409 Conflict / 402 Payment Required |
#[derive(Debug, thiserror::Error)]
pub enum FacilityError {
    /// Ticket with the given ID was not found.
    #[error("ticket not found: {0}")]
    TicketNotFound(uuid::Uuid),

    /// Ticket was already closed; a ticket is closed exactly once.
    #[error("ticket already closed: {0}")]
    TicketAlreadyClosed(uuid::Uuid),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No compatible free spot exists anywhere in the facility.
    #[error("no compatible spot available for {0} vehicle")]
    LotFull(VehicleClass),

    /// The payment gateway declined the charge; the parking session
    /// stays open for a later retry.
    #[error("payment {payment_id} declined by gateway")]
    PaymentDeclined {
        /// Identifier of the declined payment attempt.
        payment_id: uuid::Uuid,
    },

    /// Facility configuration is invalid (bad layout, bad rate table).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FacilityError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::TicketNotFound(_) => 2001,
            Self::TicketAlreadyClosed(_) => 2002,
            Self::LotFull(_) => 4001,
            Self::PaymentDeclined { .. } => 4002,
            Self::InvalidConfig(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::TicketNotFound(_) => StatusCode::NOT_FOUND,
            Self::TicketAlreadyClosed(_) | Self::LotFull(_) => StatusCode::CONFLICT,
            Self::PaymentDeclined { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::InvalidConfig(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FacilityError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = FacilityError::TicketNotFound(uuid::Uuid::new_v4());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
    }

    #[test]
    fn declined_payment_maps_to_402() {
        let err = FacilityError::PaymentDeclined {
            payment_id: uuid::Uuid::new_v4(),
        };
        assert_eq!(err.status_code(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(err.error_code(), 4002);
    }

    #[test]
    fn lot_full_maps_to_conflict() {
        let err = FacilityError::LotFull(VehicleClass::Compact);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(err.to_string().contains("compact"));
    }
}
