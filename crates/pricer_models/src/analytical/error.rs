//! Errors of the closed-form models.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Closed-form pricing errors.
///
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::EuropeanExerciseOnly { style: "American" };
/// assert_eq!(err.to_string(), "Closed form prices European exercise only, got American");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Volatility not strictly positive.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// Rejected volatility
        volatility: f64,
    },

    /// Spot not strictly positive.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// Rejected spot
        spot: f64,
    },

    /// Option carries an exercise the closed form cannot value.
    #[error("Closed form prices European exercise only, got {style}")]
    EuropeanExerciseOnly {
        /// Name of the exercise style
        style: &'static str,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::EuropeanExerciseOnly { .. } => {
                PricingError::UnsupportedInstrument(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_inputs_map_to_invalid_input() {
        for err in [
            AnalyticalError::InvalidSpot { spot: -36.0 },
            AnalyticalError::InvalidVolatility { volatility: 0.0 },
        ] {
            let message = err.to_string();
            match PricingError::from(err) {
                PricingError::InvalidInput(msg) => assert_eq!(msg, message),
                other => panic!("Expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_exercise_style_maps_to_unsupported_instrument() {
        let err: PricingError = AnalyticalError::EuropeanExerciseOnly { style: "Bermudan" }.into();
        match err {
            PricingError::UnsupportedInstrument(msg) => assert!(msg.ends_with("got Bermudan")),
            other => panic!("Expected UnsupportedInstrument, got {other:?}"),
        }
    }
}
