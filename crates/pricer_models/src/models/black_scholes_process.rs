//! Generalised Black-Scholes process.
//!
//! Lognormal spot dynamics under the risk-neutral measure:
//! ```text
//! dS = (r(t) - q(t)) S dt + σ(t, S) S dW
//! ```
//! with `r` from a risk-free curve, `q` from a dividend curve and `σ` from a
//! Black volatility term structure. All three are shared handles; the
//! process itself is immutable once built.

use std::sync::Arc;

use pricer_core::market_data::{
    BlackVolTermStructure, FlatCurve, MarketDataError, YieldTermStructure,
};
use pricer_core::types::Date;

/// Black-Scholes process combining spot, rate, dividend and volatility.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{FlatCurve, FlatVol};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::models::BlackScholesProcess;
///
/// let today = Date::from_ymd(2021, 2, 24).unwrap();
/// let dc = DayCountConvention::ActualActual365;
///
/// let process = BlackScholesProcess::new(
///     36.0,
///     Arc::new(FlatCurve::new(today, 0.01, dc)),
///     Arc::new(FlatVol::new(today, 0.20, dc)),
/// )
/// .unwrap();
///
/// assert_eq!(process.reference_date(), today);
/// assert_eq!(process.dividend_rate(1.0).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholesProcess {
    spot: f64,
    risk_free: Arc<dyn YieldTermStructure>,
    dividend: Arc<dyn YieldTermStructure>,
    volatility: Arc<dyn BlackVolTermStructure>,
}

impl BlackScholesProcess {
    /// Process with zero dividend yield.
    ///
    /// The dividend curve is flat at zero, anchored at the risk-free
    /// curve's reference date with its day count.
    pub fn new(
        spot: f64,
        risk_free: Arc<dyn YieldTermStructure>,
        volatility: Arc<dyn BlackVolTermStructure>,
    ) -> Result<Self, MarketDataError> {
        let dividend: Arc<dyn YieldTermStructure> = Arc::new(FlatCurve::new(
            risk_free.reference_date(),
            0.0,
            risk_free.day_count(),
        ));
        Self::with_dividend(spot, risk_free, dividend, volatility)
    }

    /// Process with an explicit dividend curve.
    ///
    /// # Errors
    /// - `MarketDataError::InvalidValue` if `spot` is not positive and finite
    /// - `MarketDataError::InvalidValue` if the curves disagree on the reference date
    pub fn with_dividend(
        spot: f64,
        risk_free: Arc<dyn YieldTermStructure>,
        dividend: Arc<dyn YieldTermStructure>,
        volatility: Arc<dyn BlackVolTermStructure>,
    ) -> Result<Self, MarketDataError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(MarketDataError::InvalidValue(format!(
                "spot {} must be positive",
                spot
            )));
        }
        let reference = risk_free.reference_date();
        for other in [dividend.reference_date(), volatility.reference_date()] {
            if other != reference {
                return Err(MarketDataError::InvalidValue(format!(
                    "term structures anchored at {} and {}",
                    reference, other
                )));
            }
        }
        Ok(Self {
            spot,
            risk_free,
            dividend,
            volatility,
        })
    }

    /// Spot price `S(0)`.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free curve.
    pub fn risk_free_rate(&self) -> &Arc<dyn YieldTermStructure> {
        &self.risk_free
    }

    /// Dividend yield curve.
    pub fn dividend_yield(&self) -> &Arc<dyn YieldTermStructure> {
        &self.dividend
    }

    /// Black volatility term structure.
    pub fn black_volatility(&self) -> &Arc<dyn BlackVolTermStructure> {
        &self.volatility
    }

    /// Valuation date shared by all term structures.
    pub fn reference_date(&self) -> Date {
        self.risk_free.reference_date()
    }

    /// Year fraction to `date` under the risk-free day count.
    pub fn time_from_reference(&self, date: Date) -> f64 {
        self.risk_free.time_from_reference(date)
    }

    /// Risk-free zero rate to time `t`.
    pub fn risk_free_zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        self.risk_free.zero_rate(t)
    }

    /// Dividend zero rate to time `t`.
    pub fn dividend_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        self.dividend.zero_rate(t)
    }

    /// Black volatility for `strike` at time `t`.
    pub fn black_vol(&self, t: f64, strike: f64) -> Result<f64, MarketDataError> {
        self.volatility.volatility(strike, t)
    }

    /// Drift of `ln S` over `[0, t]`: `(r - q) t - σ² t / 2`.
    pub fn log_drift(&self, t: f64, strike: f64) -> Result<f64, MarketDataError> {
        let r = self.risk_free_zero_rate(t)?;
        let q = self.dividend_rate(t)?;
        let variance = self.volatility.black_variance(strike, t)?;
        Ok((r - q) * t - 0.5 * variance)
    }

    /// Variance of `ln S` over `[0, t]`: `σ² t`.
    pub fn log_variance(&self, t: f64, strike: f64) -> Result<f64, MarketDataError> {
        self.volatility.black_variance(strike, t)
    }
}
