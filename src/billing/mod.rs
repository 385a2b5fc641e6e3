//! Billing layer: pluggable pricing strategies and the payment gateway.
//!
//! Both seams are trait objects so the service can swap pricing at
//! runtime and tests can script gateway outcomes deterministically.

pub mod gateway;
pub mod pricing;

pub use gateway::{ChargeOutcome, PaymentGateway, SimulatedGateway};
pub use pricing::{FlatRatePricing, HourlyPricing, HourlyRates, PricingStrategy};
