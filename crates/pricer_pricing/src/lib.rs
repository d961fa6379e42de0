//! # Pricer Pricing (Layer 3: Pricing Engines)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing provides the engines that value L2 instruments:
//! - Binomial lattice engine for vanilla options with any exercise style
//! - Oscillation handling (Black-Scholes smoothing, Richardson extrapolation)
//! - Closed-form European engine for verification
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pricer_core::market_data::{FlatCurve, FlatVol};
//! use pricer_core::types::{Date, DayCountConvention};
//! use pricer_models::instruments::{Exercise, OptionType, PlainVanillaPayoff, VanillaOption};
//! use pricer_models::models::BlackScholesProcess;
//! use pricer_pricing::lattice::{BinomialVanillaEngine, OscillationScheme, TreeType};
//!
//! let today = Date::from_ymd(2021, 2, 24).unwrap();
//! let dc = DayCountConvention::ActualActual365;
//! let process = Arc::new(
//!     BlackScholesProcess::new(
//!         36.0,
//!         Arc::new(FlatCurve::new(today, 0.01, dc)),
//!         Arc::new(FlatVol::new(today, 0.2, dc)),
//!     )
//!     .unwrap(),
//! );
//!
//! let mut option = VanillaOption::new(
//!     PlainVanillaPayoff::new(OptionType::Put, 40.0).unwrap(),
//!     Exercise::american(today, Date::from_ymd(2021, 5, 24).unwrap()).unwrap(),
//! );
//!
//! // Re-attaching an engine replaces the previous one
//! for steps in [50, 100] {
//!     let engine = BinomialVanillaEngine::new(
//!         process.clone(),
//!         TreeType::AdditiveEqp,
//!         steps,
//!         OscillationScheme::BlackScholesSmoothing,
//!     )
//!     .unwrap();
//!     option.set_pricing_engine(Arc::new(engine));
//!     assert!(option.npv().unwrap() >= 4.0);
//! }
//! ```
//!
//! ## Logging
//!
//! Engines emit `tracing` events (`debug` per valuation, `trace` for tree
//! coefficients); install a subscriber in the binary to see them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod lattice;

pub use analytical::AnalyticEuropeanEngine;
pub use lattice::{BinomialVanillaEngine, LatticeConfig, LatticeError, OscillationScheme, TreeType};
