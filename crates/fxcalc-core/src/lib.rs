//! Core types and traits for the lot-size calculator.
//!
//! This crate provides the foundational building blocks including:
//! - Currency codes, pairs and the injectable currency allow-list
//! - Calculation inputs and the lot-size result type
//! - The error taxonomy shared by every layer
//! - The exchange-rate provider trait

pub mod types;
pub mod traits;
pub mod error;

pub use error::{CalcError, CalcResult, RateError};
pub use types::*;
pub use traits::*;
