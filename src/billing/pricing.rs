//! Pluggable fare computation.
//!
//! A [`PricingStrategy`] is a pure function of entry time, exit time,
//! and vehicle class. The service holds the active strategy behind a
//! swappable handle; a swap affects only tickets priced after it, so an
//! open session is billed with whatever strategy is active when it
//! closes.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::vehicle::VehicleClass;
use crate::error::FacilityError;

/// Fare computation contract. Pure: no side effects, and the caller
/// guarantees `exit >= entry`.
pub trait PricingStrategy: fmt::Debug + Send + Sync {
    /// Computes the fare for a stay of `[entry, exit]` by a vehicle of
    /// the given class.
    fn price(&self, entry: DateTime<Utc>, exit: DateTime<Utc>, class: VehicleClass) -> f64;

    /// Short name for logs and API responses.
    fn name(&self) -> &'static str;
}

/// Hourly rate per vehicle class.
///
/// Every class has a rate: a missing entry is unrepresentable, which is
/// exactly the "undefined class is a configuration error" contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyRates {
    /// Rate for two-wheelers.
    pub two_wheeler: f64,
    /// Rate for compact cars.
    pub compact: f64,
    /// Rate for oversized vehicles.
    pub oversized: f64,
    /// Rate for electric vehicles.
    pub electric: f64,
}

impl HourlyRates {
    /// The facility's standard rate card.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            two_wheeler: 2.0,
            compact: 5.0,
            oversized: 8.0,
            electric: 4.0,
        }
    }

    /// The rate for a vehicle class.
    #[must_use]
    pub const fn rate(&self, class: VehicleClass) -> f64 {
        match class {
            VehicleClass::TwoWheeler => self.two_wheeler,
            VehicleClass::Compact => self.compact,
            VehicleClass::Oversized => self.oversized,
            VehicleClass::Electric => self.electric,
        }
    }
}

impl Default for HourlyRates {
    fn default() -> Self {
        Self::standard()
    }
}

/// Bills whole hours, rounding the stay duration up: a one-minute stay
/// pays a full hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPricing {
    rates: HourlyRates,
}

impl HourlyPricing {
    /// Creates an hourly strategy from a validated rate card.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::InvalidConfig`] if any rate is negative
    /// or non-finite.
    pub fn new(rates: HourlyRates) -> Result<Self, FacilityError> {
        for class in VehicleClass::ALL {
            let rate = rates.rate(class);
            if !rate.is_finite() || rate < 0.0 {
                return Err(FacilityError::InvalidConfig(format!(
                    "invalid hourly rate {rate} for {class}"
                )));
            }
        }
        Ok(Self { rates })
    }

    /// Hourly strategy with the standard rate card.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            rates: HourlyRates::standard(),
        }
    }

    /// The active rate card.
    #[must_use]
    pub const fn rates(&self) -> HourlyRates {
        self.rates
    }
}

impl PricingStrategy for HourlyPricing {
    fn price(&self, entry: DateTime<Utc>, exit: DateTime<Utc>, class: VehicleClass) -> f64 {
        let minutes = (exit - entry).num_minutes().max(0) as u64;
        let hours = minutes.div_ceil(60);
        #[allow(clippy::cast_precision_loss)]
        let hours = hours as f64;
        hours * self.rates.rate(class)
    }

    fn name(&self) -> &'static str {
        "hourly"
    }
}

/// Bills a constant amount regardless of duration and class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatRatePricing {
    amount: f64,
}

impl FlatRatePricing {
    /// Default flat fare.
    pub const DEFAULT_AMOUNT: f64 = 15.0;

    /// Creates a flat-rate strategy.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::InvalidConfig`] if the amount is
    /// negative or non-finite.
    pub fn new(amount: f64) -> Result<Self, FacilityError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(FacilityError::InvalidConfig(format!(
                "invalid flat rate {amount}"
            )));
        }
        Ok(Self { amount })
    }

    /// The flat fare amount.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }
}

impl Default for FlatRatePricing {
    fn default() -> Self {
        Self {
            amount: Self::DEFAULT_AMOUNT,
        }
    }
}

impl PricingStrategy for FlatRatePricing {
    fn price(&self, _entry: DateTime<Utc>, _exit: DateTime<Utc>, _class: VehicleClass) -> f64 {
        self.amount
    }

    fn name(&self) -> &'static str {
        "flat_rate"
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn stay(minutes: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let entry = Utc::now();
        (entry, entry + Duration::minutes(minutes))
    }

    #[test]
    fn sixty_one_minutes_bills_two_hours() {
        let pricing = HourlyPricing::standard();
        let (entry, exit) = stay(61);
        assert_eq!(pricing.price(entry, exit, VehicleClass::Compact), 10.0);
    }

    #[test]
    fn exactly_sixty_minutes_bills_one_hour() {
        let pricing = HourlyPricing::standard();
        let (entry, exit) = stay(60);
        assert_eq!(pricing.price(entry, exit, VehicleClass::Compact), 5.0);
    }

    #[test]
    fn one_minute_bills_a_full_hour() {
        let pricing = HourlyPricing::standard();
        let (entry, exit) = stay(1);
        assert_eq!(pricing.price(entry, exit, VehicleClass::TwoWheeler), 2.0);
    }

    #[test]
    fn zero_duration_bills_nothing() {
        let pricing = HourlyPricing::standard();
        let (entry, exit) = stay(0);
        assert_eq!(pricing.price(entry, exit, VehicleClass::Oversized), 0.0);
    }

    #[test]
    fn rates_differ_by_class() {
        let pricing = HourlyPricing::standard();
        let (entry, exit) = stay(90);
        assert_eq!(pricing.price(entry, exit, VehicleClass::TwoWheeler), 4.0);
        assert_eq!(pricing.price(entry, exit, VehicleClass::Oversized), 16.0);
        assert_eq!(pricing.price(entry, exit, VehicleClass::Electric), 8.0);
    }

    #[test]
    fn negative_rate_is_rejected() {
        let rates = HourlyRates {
            compact: -1.0,
            ..HourlyRates::standard()
        };
        assert!(HourlyPricing::new(rates).is_err());
    }

    #[test]
    fn flat_rate_ignores_duration_and_class() {
        let Ok(pricing) = FlatRatePricing::new(15.0) else {
            panic!("flat rate rejected");
        };
        let (entry, short_exit) = stay(5);
        let (_, long_exit) = stay(600);
        assert_eq!(pricing.price(entry, short_exit, VehicleClass::Compact), 15.0);
        assert_eq!(pricing.price(entry, long_exit, VehicleClass::Oversized), 15.0);
    }

    #[test]
    fn negative_flat_rate_is_rejected() {
        assert!(FlatRatePricing::new(-0.5).is_err());
    }
}
