//! Payment records for parking sessions.
//!
//! A [`Payment`] is created per unparking attempt in the `Pending` state
//! and settled exactly once by consuming it into a `Completed` or
//! `Failed` record. Settled payments are immutable.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a payment attempt (UUID v4 newtype).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PaymentId(uuid::Uuid);

impl PaymentId {
    /// Creates a new random `PaymentId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the driver pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the exit booth.
    Cash,
    /// Credit card.
    CreditCard,
    /// Debit card.
    DebitCard,
    /// Phone wallet / QR payment.
    MobileWallet,
}

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, not yet submitted to the gateway.
    Pending,
    /// Gateway accepted the charge.
    Completed,
    /// Gateway declined the charge.
    Failed,
}

/// A single payment attempt for a parking session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    payment_id: PaymentId,
    amount: f64,
    method: PaymentMethod,
    status: PaymentStatus,
    timestamp: DateTime<Utc>,
}

impl Payment {
    /// Creates a pending payment for the given amount and method.
    #[must_use]
    pub fn new(amount: f64, method: PaymentMethod) -> Self {
        Self {
            payment_id: PaymentId::new(),
            amount,
            method,
            status: PaymentStatus::Pending,
            timestamp: Utc::now(),
        }
    }

    /// Payment identifier.
    #[must_use]
    pub const fn payment_id(&self) -> PaymentId {
        self.payment_id
    }

    /// Charged amount.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    /// Payment method.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Settlement status.
    #[must_use]
    pub const fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Settles this payment as accepted by the gateway.
    #[must_use]
    pub const fn completed(mut self) -> Self {
        self.status = PaymentStatus::Completed;
        self
    }

    /// Settles this payment as declined by the gateway.
    #[must_use]
    pub const fn failed(mut self) -> Self {
        self.status = PaymentStatus::Failed;
        self
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_payment_is_pending() {
        let payment = Payment::new(15.0, PaymentMethod::CreditCard);
        assert_eq!(payment.status(), PaymentStatus::Pending);
        assert_eq!(payment.amount(), 15.0);
    }

    #[test]
    fn settlement_consumes_the_pending_record() {
        let payment = Payment::new(8.0, PaymentMethod::Cash);
        let id = payment.payment_id();

        let settled = payment.completed();
        assert_eq!(settled.status(), PaymentStatus::Completed);
        assert_eq!(settled.payment_id(), id);
    }

    #[test]
    fn declined_settlement() {
        let payment = Payment::new(8.0, PaymentMethod::DebitCard).failed();
        assert_eq!(payment.status(), PaymentStatus::Failed);
    }
}
