//! Exchange-rate providers.

mod fixed;
mod frankfurter;

pub use fixed::FixedRateProvider;
pub use frankfurter::{FrankfurterClient, FrankfurterConfig};
