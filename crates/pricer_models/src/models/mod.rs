//! Stochastic process models.
//!
//! - [`BlackScholesProcess`]: lognormal spot driven by dated rate, dividend
//!   and volatility term structures

pub mod black_scholes_process;

pub use black_scholes_process::BlackScholesProcess;
