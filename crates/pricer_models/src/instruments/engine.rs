//! Pricing engine interface.
//!
//! An instrument describes *what* is priced; an engine decides *how*. The
//! option holds at most one engine, and engines are interchangeable at run
//! time, which is what lets a sweep re-value the same contract under many
//! lattice configurations.

use std::fmt::Debug;

use pricer_core::types::PricingError;

use super::exercise::Exercise;
use super::payoff::PlainVanillaPayoff;

/// Contract terms handed to an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct VanillaOptionArguments {
    /// Payoff at exercise
    pub payoff: PlainVanillaPayoff,
    /// Exercise schedule
    pub exercise: Exercise,
}

/// Valuation output of an engine.
///
/// Greeks are optional: closed-form and lattice engines fill them, other
/// engines may not.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OptionResults {
    /// Net present value
    pub value: f64,
    /// ∂V/∂S
    pub delta: Option<f64>,
    /// ∂²V/∂S²
    pub gamma: Option<f64>,
    /// ∂V/∂t (per year)
    pub theta: Option<f64>,
}

impl OptionResults {
    /// Results carrying a value only.
    pub fn from_value(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Attach delta, gamma and theta.
    pub fn with_greeks(mut self, delta: f64, gamma: f64, theta: f64) -> Self {
        self.delta = Some(delta);
        self.gamma = Some(gamma);
        self.theta = Some(theta);
        self
    }
}

/// Strategy computing [`OptionResults`] for vanilla option terms.
///
/// # Examples
/// ```
/// use pricer_core::types::{Date, PricingError};
/// use pricer_models::instruments::{
///     Exercise, OptionResults, OptionType, PlainVanillaPayoff, PricingEngine,
///     VanillaOptionArguments,
/// };
///
/// /// Values every option at its intrinsic value at a fixed spot.
/// #[derive(Debug)]
/// struct Intrinsic(f64);
///
/// impl PricingEngine for Intrinsic {
///     fn calculate(&self, args: &VanillaOptionArguments) -> Result<OptionResults, PricingError> {
///         Ok(OptionResults::from_value(args.payoff.value(self.0)))
///     }
/// }
///
/// let args = VanillaOptionArguments {
///     payoff: PlainVanillaPayoff::new(OptionType::Put, 40.0).unwrap(),
///     exercise: Exercise::european(Date::from_ymd(2021, 5, 24).unwrap()),
/// };
/// assert_eq!(Intrinsic(36.0).calculate(&args).unwrap().value, 4.0);
/// assert_eq!(Intrinsic(36.0).name(), "PricingEngine");
/// ```
pub trait PricingEngine: Debug + Send + Sync {
    /// Value the option described by `args`.
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<OptionResults, PricingError>;

    /// Human-readable engine name for logs.
    fn name(&self) -> &str {
        "PricingEngine"
    }
}
