//! Vanilla option instrument.
//!
//! This module provides the vanilla option combining a plain payoff, an
//! exercise schedule and an attachable pricing engine.

use std::sync::Arc;

use pricer_core::types::PricingError;

use super::engine::{OptionResults, PricingEngine, VanillaOptionArguments};
use super::error::InstrumentError;
use super::exercise::Exercise;
use super::payoff::PlainVanillaPayoff;

/// Vanilla option with an interchangeable pricing engine.
///
/// The contract terms are fixed at construction. Engines are attached with
/// [`set_pricing_engine`](Self::set_pricing_engine); attaching a new engine
/// replaces the previous one.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use pricer_core::types::{Date, PricingError};
/// use pricer_models::instruments::{
///     Exercise, OptionResults, OptionType, PlainVanillaPayoff, PricingEngine,
///     VanillaOption, VanillaOptionArguments,
/// };
///
/// #[derive(Debug)]
/// struct Fixed(f64);
///
/// impl PricingEngine for Fixed {
///     fn calculate(&self, _: &VanillaOptionArguments) -> Result<OptionResults, PricingError> {
///         Ok(OptionResults::from_value(self.0))
///     }
/// }
///
/// let expiry = Date::from_ymd(2021, 5, 24).unwrap();
/// let mut option = VanillaOption::new(
///     PlainVanillaPayoff::new(OptionType::Put, 40.0).unwrap(),
///     Exercise::european(expiry),
/// );
///
/// // No engine attached yet
/// assert!(option.npv().is_err());
///
/// option.set_pricing_engine(Arc::new(Fixed(4.2)));
/// assert_eq!(option.npv().unwrap(), 4.2);
///
/// // Re-attachment replaces the engine
/// option.set_pricing_engine(Arc::new(Fixed(1.0)));
/// assert_eq!(option.npv().unwrap(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct VanillaOption {
    arguments: VanillaOptionArguments,
    engine: Option<Arc<dyn PricingEngine>>,
}

impl VanillaOption {
    /// Creates an option with no engine attached.
    pub fn new(payoff: PlainVanillaPayoff, exercise: Exercise) -> Self {
        Self {
            arguments: VanillaOptionArguments { payoff, exercise },
            engine: None,
        }
    }

    /// Attach `engine`, replacing any previously attached engine.
    pub fn set_pricing_engine(&mut self, engine: Arc<dyn PricingEngine>) {
        self.engine = Some(engine);
    }

    /// Currently attached engine, if any.
    pub fn pricing_engine(&self) -> Option<&Arc<dyn PricingEngine>> {
        self.engine.as_ref()
    }

    /// Payoff of the contract.
    #[inline]
    pub fn payoff(&self) -> &PlainVanillaPayoff {
        &self.arguments.payoff
    }

    /// Exercise schedule of the contract.
    #[inline]
    pub fn exercise(&self) -> &Exercise {
        &self.arguments.exercise
    }

    /// Arguments handed to engines.
    #[inline]
    pub fn arguments(&self) -> &VanillaOptionArguments {
        &self.arguments
    }

    /// Run the attached engine.
    ///
    /// # Errors
    /// `InstrumentError::MissingEngine` (as a `PricingError`) when no engine
    /// is attached; otherwise whatever the engine reports.
    pub fn calculate(&self) -> Result<OptionResults, PricingError> {
        let engine = self.engine.as_ref().ok_or(InstrumentError::MissingEngine)?;
        engine.calculate(&self.arguments)
    }

    /// Net present value under the attached engine.
    pub fn npv(&self) -> Result<f64, PricingError> {
        Ok(self.calculate()?.value)
    }

    /// Delta under the attached engine.
    pub fn delta(&self) -> Result<f64, PricingError> {
        self.greek("delta", |r| r.delta)
    }

    /// Gamma under the attached engine.
    pub fn gamma(&self) -> Result<f64, PricingError> {
        self.greek("gamma", |r| r.gamma)
    }

    /// Theta under the attached engine.
    pub fn theta(&self) -> Result<f64, PricingError> {
        self.greek("theta", |r| r.theta)
    }

    fn greek(
        &self,
        name: &str,
        pick: impl Fn(&OptionResults) -> Option<f64>,
    ) -> Result<f64, PricingError> {
        let results = self.calculate()?;
        pick(&results).ok_or_else(|| {
            let engine = self.engine.as_ref().map_or("engine", |e| e.name());
            PricingError::UnsupportedInstrument(format!("{} not provided by {}", name, engine))
        })
    }
}
