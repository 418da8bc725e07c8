//! CLI command implementations.

pub mod calculate;
pub mod currencies;
pub mod format;
pub mod print_config;
pub mod validate;
