//! Core time and error types.
//!
//! This module provides:
//! - `time`: Time types (Date, DayCountConvention) for financial calculations
//! - `error`: Structured error types for pricing, date and interpolation operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`DayCountConvention`] from `time`
//! - [`PricingError`], [`DateError`], [`InterpolationError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, InterpolationError, PricingError};
pub use time::{Date, DayCountConvention};
