//! Yield curves.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor and rate calculations
//! - [`FlatCurve`]: Constant rate curve anchored at a reference date
//! - [`ZeroCurve`]: Dated zero-rate pillars, linear in the zero rate

mod flat;
mod traits;
mod zero;

pub use crate::market_data::term_structure::{TermStructure, YieldTermStructure};
pub use flat::FlatCurve;
pub use traits::YieldCurve;
pub use zero::ZeroCurve;
