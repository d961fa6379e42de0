//! Error types for the binomial lattice.
//!
//! This module defines structured error types for configuration validation
//! and runtime failures of lattice construction and rollback.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Lattice construction and valuation errors.
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::LatticeError;
///
/// let err = LatticeError::InsufficientSteps { steps: 2, minimum: 3 };
/// assert_eq!(err.to_string(), "Invalid step count 2: at least 3 required");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    /// Fewer time steps than the oscillation scheme needs.
    #[error("Invalid step count {steps}: at least {minimum} required")]
    InsufficientSteps {
        /// Requested step count
        steps: usize,
        /// Smallest usable step count
        minimum: usize,
    },

    /// Maturity not strictly positive.
    #[error("Invalid maturity {maturity}: must be positive")]
    InvalidMaturity {
        /// Maturity in years
        maturity: f64,
    },

    /// Branch probability outside `[0, 1]`.
    #[error("Negative probability in {tree} tree: p_up = {probability}")]
    NegativeProbability {
        /// Tree type name
        tree: &'static str,
        /// Offending up-branch probability
        probability: f64,
    },

    /// Time not on the grid.
    #[error("Time {time} is not on the grid [0, {end}]")]
    TimeNotOnGrid {
        /// Requested time
        time: f64,
        /// Last grid time
        end: f64,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        value: String,
    },
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::NegativeProbability { .. } | LatticeError::TimeNotOnGrid { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_error_display() {
        let err = LatticeError::InvalidMaturity { maturity: -0.5 };
        assert_eq!(err.to_string(), "Invalid maturity -0.5: must be positive");

        let err = LatticeError::NegativeProbability {
            tree: "CoxRossRubinstein",
            probability: 1.2,
        };
        assert!(err.to_string().contains("CoxRossRubinstein"));

        let err = LatticeError::InvalidParameter {
            name: "tree",
            value: "unknown tree type 'foo'".to_string(),
        };
        assert!(err.to_string().contains("'tree'"));
    }

    #[test]
    fn test_conversion_to_pricing_error() {
        let err: PricingError = LatticeError::InsufficientSteps {
            steps: 1,
            minimum: 2,
        }
        .into();
        assert!(matches!(err, PricingError::InvalidInput(_)));

        let err: PricingError = LatticeError::NegativeProbability {
            tree: "Trigeorgis",
            probability: -0.1,
        }
        .into();
        assert!(matches!(err, PricingError::NumericalInstability(_)));
    }
}
