//! BMI Insights Shared Library
//!
//! This crate contains the pure BMI core (unit conversion, classification,
//! chart normalization) and the API types shared by the backend and the
//! WASM module.

pub mod advice;
pub mod errors;
pub mod health_metrics;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use advice::*;
pub use errors::*;
pub use health_metrics::*;
pub use types::*;
pub use units::*;
