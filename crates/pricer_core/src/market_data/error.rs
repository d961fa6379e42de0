//! Market data error types.
//!
//! This module provides structured error handling for term-structure
//! construction and lookup.

use crate::types::{DateError, InterpolationError, PricingError};
use crate::types::time::Date;
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative time to maturity
/// - `InvalidStrike`: Non-positive strike price
/// - `InvalidExpiry`: Negative time to expiry
/// - `OutOfBounds`: Query outside valid domain with extrapolation disabled
/// - `Interpolation`: Wrapped interpolation error
/// - `InsufficientData`: Not enough pillars for construction
/// - `MismatchedLengths`: Dates and values of different lengths
/// - `UnsortedDates`: Pillar dates not strictly increasing
/// - `DateBeforeReference`: Pillar or query date before the reference date
/// - `NonMonotonicVariance`: Total variance decreasing between pillars
/// - `InvalidValue`: Non-finite or negative quote
/// - `Date`: Wrapped date arithmetic error
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry (negative).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Query point outside valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Dates and values differ in length.
    #[error("Mismatched lengths: {dates} dates, {values} values")]
    MismatchedLengths {
        /// Number of dates
        dates: usize,
        /// Number of values
        values: usize,
    },

    /// Pillar dates must be sorted and unique.
    #[error("Dates must be sorted and unique: {date} does not follow {previous}")]
    UnsortedDates {
        /// Offending date
        date: Date,
        /// Date preceding it in the input
        previous: Date,
    },

    /// A date lies before (or, for variance curves, on) the reference date.
    #[error("Date {date} is not after reference date {reference}")]
    DateBeforeReference {
        /// Offending date
        date: Date,
        /// Reference date of the term structure
        reference: Date,
    },

    /// Total variance decreases between two pillars.
    #[error("Variance must be non-decreasing: {variance} at {date} after {previous}")]
    NonMonotonicVariance {
        /// Date of the offending pillar
        date: Date,
        /// Variance at that pillar
        variance: f64,
        /// Variance at the preceding pillar
        previous: f64,
    },

    /// Non-finite or out-of-range quote.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Date arithmetic error.
    #[error("Date error: {0}")]
    Date(#[from] DateError),
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
