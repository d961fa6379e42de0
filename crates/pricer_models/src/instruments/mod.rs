//! Financial instrument definitions.
//!
//! # Architecture
//!
//! Instruments separate contract terms from valuation:
//! - [`VanillaOption`] holds a [`PlainVanillaPayoff`] and an [`Exercise`]
//! - a [`PricingEngine`] trait object, attached at run time, values it
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{Exercise, OptionType, PlainVanillaPayoff, VanillaOption};
//!
//! let today = Date::from_ymd(2021, 2, 24).unwrap();
//! let expiry = Date::from_ymd(2021, 5, 24).unwrap();
//!
//! let option = VanillaOption::new(
//!     PlainVanillaPayoff::new(OptionType::Put, 40.0).unwrap(),
//!     Exercise::american(today, expiry).unwrap(),
//! );
//! assert_eq!(option.payoff().value(36.0), 4.0);
//! ```

mod engine;
mod error;
mod exercise;
mod payoff;
mod vanilla;

pub use engine::{OptionResults, PricingEngine, VanillaOptionArguments};
pub use error::InstrumentError;
pub use exercise::Exercise;
pub use payoff::{OptionType, PlainVanillaPayoff};
pub use vanilla::VanillaOption;
