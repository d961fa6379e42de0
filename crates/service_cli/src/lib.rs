//! # Lattice Sweep (Service Layer)
//!
//! Convergence study of the binomial lattice engine on an American put.
//!
//! The sweep values the same option for every step count of a range, once
//! with an oscillation-resolving engine and once with a plain one, and
//! records each value with its timing:
//!
//! - [`scenario`]: market data and option terms
//! - [`sweep`]: the parameterised sweep and its report
//! - [`output`]: data files, console table and comparison CSV
//! - [`commands`]: the `sweep` and `price` subcommands
//! - [`config`]: TOML configuration with environment overrides
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate orchestrates the pricer
//! layers (`pricer_core` → `pricer_models` → `pricer_pricing`) behind the
//! `lattice-sweep` binary.

#![deny(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod scenario;
pub mod sweep;

pub use config::{AppConfig, ConfigError};
pub use error::{CliError, Result};
pub use scenario::{MarketScenario, ScenarioConfig};
pub use sweep::{run_sweep, SweepPoint, SweepReport, SweepSink, SweepVariant};
