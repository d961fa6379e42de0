//! Mathematical utilities for term-structure construction.
//!
//! - [`interpolators`]: 1D interpolation used by zero-rate and variance curves

pub mod interpolators;
