//! Market data structures for lattice pricing.
//!
//! This module provides yield curve and volatility term structures for
//! discount factor, zero rate and Black volatility lookups.
//!
//! # Architecture
//!
//! Time-based lookups (`YieldCurve`, `VolatilitySurface`) are generic over
//! `T: Float`. Date-based construction goes through [`TermStructure`], which
//! anchors each structure at an explicit reference date and day count.
//!
//! # Components
//!
//! - [`curves`]: Yield curves (`FlatCurve`, `ZeroCurve`)
//! - [`surfaces`]: Volatility term structures (`FlatVol`, `BlackVarianceCurve`)
//! - [`term_structure`]: Reference-date anchoring and object-safe bundles
//! - [`error`]: Market data error types (`MarketDataError`)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{BlackVarianceCurve, VolatilitySurface, YieldCurve, ZeroCurve};
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2021, 2, 24).unwrap();
//! let dc = DayCountConvention::ActualActual365;
//!
//! let rates = ZeroCurve::new(
//!     today,
//!     &[today, today.add_months(6).unwrap()],
//!     &[0.01, 0.015],
//!     dc,
//! )
//! .unwrap();
//! assert!(rates.discount_factor(0.25).unwrap() < 1.0);
//!
//! let vols = BlackVarianceCurve::new(
//!     today,
//!     &[today.add_months(3).unwrap(), today.add_months(6).unwrap()],
//!     &[0.20, 0.25],
//!     dc,
//! )
//! .unwrap();
//! assert!((vols.volatility(36.0, 89.0 / 365.0).unwrap() - 0.20).abs() < 1e-12);
//! ```

pub mod curves;
pub mod error;
pub mod surfaces;
pub mod term_structure;

pub use curves::{FlatCurve, YieldCurve, ZeroCurve};
pub use error::MarketDataError;
pub use surfaces::{BlackVarianceCurve, FlatVol, VolatilitySurface};
pub use term_structure::{BlackVolTermStructure, TermStructure, YieldTermStructure};
