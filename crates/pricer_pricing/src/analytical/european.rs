//! Closed-form engine for European vanilla options.

use std::sync::Arc;

use pricer_core::types::PricingError;
use pricer_models::analytical::{AnalyticalError, BlackScholes};
use pricer_models::instruments::{
    Exercise, OptionResults, OptionType, PricingEngine, VanillaOptionArguments,
};
use pricer_models::models::BlackScholesProcess;

/// Black-Scholes engine for European exercise.
///
/// Reads the zero rates and Black volatility at expiry from the process, so
/// term structures enter through their averages over the option's life.
/// Serves as the benchmark the binomial engines converge to.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{FlatCurve, FlatVol};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::instruments::{Exercise, OptionType, PlainVanillaPayoff, VanillaOption};
/// use pricer_models::models::BlackScholesProcess;
/// use pricer_pricing::analytical::AnalyticEuropeanEngine;
///
/// let today = Date::from_ymd(2021, 2, 24).unwrap();
/// let dc = DayCountConvention::ActualActual365;
/// let process = BlackScholesProcess::new(
///     36.0,
///     Arc::new(FlatCurve::new(today, 0.012458563535911602, dc)),
///     Arc::new(FlatVol::new(today, 0.20, dc)),
/// )
/// .unwrap();
///
/// let mut option = VanillaOption::new(
///     PlainVanillaPayoff::new(OptionType::Put, 40.0).unwrap(),
///     Exercise::european(Date::from_ymd(2021, 5, 24).unwrap()),
/// );
/// option.set_pricing_engine(Arc::new(AnalyticEuropeanEngine::new(Arc::new(process))));
///
/// assert!((option.npv().unwrap() - 4.169369).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyticEuropeanEngine {
    process: Arc<BlackScholesProcess>,
}

impl AnalyticEuropeanEngine {
    /// Engine pricing against `process`.
    pub fn new(process: Arc<BlackScholesProcess>) -> Self {
        Self { process }
    }
}

impl PricingEngine for AnalyticEuropeanEngine {
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<OptionResults, PricingError> {
        let expiry = match &args.exercise {
            Exercise::European { expiry } => *expiry,
            other => {
                return Err(AnalyticalError::EuropeanExerciseOnly {
                    style: other.style(),
                }
                .into())
            }
        };

        let t = self.process.time_from_reference(expiry);
        if t < 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "option expired on {}",
                expiry
            )));
        }

        let spot = self.process.spot();
        let strike = args.payoff.strike();
        let rate = self.process.risk_free_zero_rate(t)?;
        let dividend = self.process.dividend_rate(t)?;
        let volatility = self.process.black_vol(t, strike)?;

        let model = BlackScholes::new(spot, rate, volatility)?.with_dividend_yield(dividend);
        let is_call = args.payoff.option_type() == OptionType::Call;

        Ok(OptionResults::from_value(model.price(args.payoff.option_type(), strike, t))
            .with_greeks(
                model.delta(strike, t, is_call),
                model.gamma(strike, t),
                model.theta(strike, t, is_call),
            ))
    }

    fn name(&self) -> &str {
        "AnalyticEuropeanEngine"
    }
}
