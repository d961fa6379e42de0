//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes-Merton model with a continuous dividend yield
//! - Analytical Greeks (Delta, Gamma, Theta)
//! - Double-precision standard normal distribution functions
//!
//! The binomial engines use [`BlackScholes`] on their last time step when
//! smoothing is enabled, and as the European benchmark in tests.

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
