//! Instrument error types.
//!
//! This module provides structured error handling for instrument
//! construction and valuation.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidStrike`: Strike price is non-positive or not finite
/// - `InvalidExercise`: Exercise schedule is inconsistent
/// - `MissingEngine`: Valuation requested with no pricing engine attached
/// - `InvalidParameter`: General parameter validation failure
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Inconsistent exercise schedule.
    #[error("Invalid exercise: {message}")]
    InvalidExercise {
        /// Description of the inconsistency
        message: String,
    },

    /// No pricing engine attached to the instrument.
    #[error("No pricing engine set")]
    MissingEngine,

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::MissingEngine => PricingError::ModelFailure(err.to_string()),
            InstrumentError::InvalidStrike { .. }
            | InstrumentError::InvalidExercise { .. }
            | InstrumentError::InvalidParameter { .. } => {
                PricingError::InvalidInput(err.to_string())
            }
        }
    }
}
