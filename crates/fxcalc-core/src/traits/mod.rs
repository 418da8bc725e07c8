//! Core traits for the lot-size calculator.

mod rate_provider;

pub use rate_provider::RateProvider;
