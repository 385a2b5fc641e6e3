//! Payment gateway seam and its simulated implementation.
//!
//! The gateway is an opaque dependency that can decline independently
//! of business logic. The controller treats a decline as a failure of
//! the whole unpark transaction and leaves spot and ticket state
//! untouched so the driver can retry.

use std::fmt;

use rand::Rng;

use crate::domain::payment::Payment;
use crate::error::FacilityError;

/// Result of submitting a payment to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeOutcome {
    /// The gateway accepted the charge.
    Accepted,
    /// The gateway declined the charge.
    Declined,
}

/// A processor that can accept or decline a payment attempt.
pub trait PaymentGateway: fmt::Debug + Send + Sync {
    /// Submits a pending payment for settlement.
    fn charge(&self, payment: &Payment) -> ChargeOutcome;
}

/// Stand-in for a real processor: accepts with a fixed probability.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedGateway {
    success_rate: f64,
}

impl SimulatedGateway {
    /// Default acceptance probability.
    pub const DEFAULT_SUCCESS_RATE: f64 = 0.9;

    /// Creates a simulated gateway with the given acceptance probability.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::InvalidConfig`] if the rate is outside
    /// `[0.0, 1.0]`.
    pub fn new(success_rate: f64) -> Result<Self, FacilityError> {
        if !(0.0..=1.0).contains(&success_rate) {
            return Err(FacilityError::InvalidConfig(format!(
                "payment success rate {success_rate} outside [0, 1]"
            )));
        }
        Ok(Self { success_rate })
    }

    /// The configured acceptance probability.
    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self {
            success_rate: Self::DEFAULT_SUCCESS_RATE,
        }
    }
}

impl PaymentGateway for SimulatedGateway {
    fn charge(&self, payment: &Payment) -> ChargeOutcome {
        if rand::thread_rng().gen_bool(self.success_rate) {
            ChargeOutcome::Accepted
        } else {
            tracing::debug!(payment_id = %payment.payment_id(), "simulated gateway declined charge");
            ChargeOutcome::Declined
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentMethod;

    #[test]
    fn always_accepting_gateway() {
        let Ok(gateway) = SimulatedGateway::new(1.0) else {
            panic!("valid rate rejected");
        };
        let payment = Payment::new(5.0, PaymentMethod::Cash);
        for _ in 0..20 {
            assert_eq!(gateway.charge(&payment), ChargeOutcome::Accepted);
        }
    }

    #[test]
    fn always_declining_gateway() {
        let Ok(gateway) = SimulatedGateway::new(0.0) else {
            panic!("valid rate rejected");
        };
        let payment = Payment::new(5.0, PaymentMethod::Cash);
        for _ in 0..20 {
            assert_eq!(gateway.charge(&payment), ChargeOutcome::Declined);
        }
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        assert!(SimulatedGateway::new(1.5).is_err());
        assert!(SimulatedGateway::new(-0.1).is_err());
    }
}
