//! Black volatility term structures.
//!
//! This module provides:
//! - [`VolatilitySurface`]: Generic trait for Black volatility and variance lookup
//! - [`FlatVol`]: Constant volatility anchored at a reference date
//! - [`BlackVarianceCurve`]: Dated at-the-money vols interpolated in total variance

mod flat;
mod traits;
mod variance_curve;

pub use crate::market_data::term_structure::BlackVolTermStructure;
pub use flat::FlatVol;
pub use traits::VolatilitySurface;
pub use variance_curve::BlackVarianceCurve;
