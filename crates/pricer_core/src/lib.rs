//! # pricer_core: Market Data Foundation for the Lattice Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the 4-layer architecture, providing:
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Error types: `PricingError`, `DateError`, `InterpolationError` (`types::error`)
//! - Interpolation: `Interpolator`, `LinearInterpolator` (`math::interpolators`)
//! - Term structures: yield curves and Black volatility curves anchored at a
//!   reference date (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{YieldCurve, ZeroCurve};
//! use pricer_core::market_data::TermStructure;
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2021, 2, 24).unwrap();
//! let six_months = today.add_months(6).unwrap();
//!
//! let curve = ZeroCurve::new(
//!     today,
//!     &[today, six_months],
//!     &[0.01, 0.015],
//!     DayCountConvention::ActualActual365,
//! )
//! .unwrap();
//!
//! let t = curve.time_from_reference(six_months);
//! assert!((curve.zero_rate(t).unwrap() - 0.015).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Date`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
