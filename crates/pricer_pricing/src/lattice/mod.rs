//! Binomial lattice pricing for vanilla options.
//!
//! This module provides the binomial-tree machinery behind
//! [`BinomialVanillaEngine`]:
//!
//! - [`TimeGrid`]: evenly spaced times from valuation to expiry
//! - [`BinomialTree`]: recombining trees for six construction policies
//! - [`BlackScholesLattice`]: constant-rate discounting over a tree
//! - [`DiscretizedVanillaOption`]: option values rolled back with exercise
//! - [`OscillationScheme`]: plain, smoothed or extrapolated valuation
//!
//! # Architecture
//!
//! ```text
//! BinomialVanillaEngine
//! ├── LatticeConfig            (steps, tree type, oscillation scheme)
//! ├── BlackScholesProcess      (flattened to constants at expiry)
//! └── Valuation
//!     ├── BinomialTree + TimeGrid → BlackScholesLattice
//!     ├── DiscretizedVanillaOption::initialize[_smoothed]()
//!     └── rollback() to steps 2, 1, 0 → value, delta, gamma
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_pricing::lattice::{LatticeConfig, OscillationScheme, TreeType};
//!
//! let config = LatticeConfig::builder()
//!     .steps(3)
//!     .tree_type(TreeType::AdditiveEqp)
//!     .oscillation(OscillationScheme::from_flag(true))
//!     .build()
//!     .unwrap();
//! assert!(config.oscillation().is_smoothed());
//! ```

pub mod black_scholes_lattice;
pub mod config;
pub mod discretized;
pub mod engine;
pub mod error;
pub mod time_grid;
pub mod tree;

pub use black_scholes_lattice::BlackScholesLattice;
pub use config::{LatticeConfig, LatticeConfigBuilder, OscillationScheme, MAX_STEPS};
pub use discretized::DiscretizedVanillaOption;
pub use engine::BinomialVanillaEngine;
pub use error::LatticeError;
pub use time_grid::TimeGrid;
pub use tree::{BinomialTree, TreeParameters, TreeType};
