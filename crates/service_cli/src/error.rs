//! Error types for the lattice sweep CLI.

use std::path::PathBuf;

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{DateError, PricingError};
use pricer_models::instruments::InstrumentError;
use pricer_pricing::lattice::LatticeError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed market data in the scenario
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Invalid date in the scenario
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Invalid option terms
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Invalid engine parameters
    #[error("Lattice error: {0}")]
    Lattice(#[from] LatticeError),

    /// Valuation failure
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Output file could not be created or written
    #[error("Cannot write {}: {source}", path.display())]
    Output {
        /// File being written
        path: PathBuf,
        /// Underlying IO failure
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Create an output error for `path`
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
