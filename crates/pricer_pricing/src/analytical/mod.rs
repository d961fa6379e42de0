//! Analytical (closed-form) pricing engines.
//!
//! This module provides closed-form engines implementing
//! [`PricingEngine`](pricer_models::instruments::PricingEngine), used to
//! verify lattice convergence.
//!
//! # Available Engines
//!
//! - **European vanilla options**: Black-Scholes-Merton with term-structure
//!   averages to expiry

pub mod european;

pub use european::AnalyticEuropeanEngine;
