//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Time-based yield curve lookups.
///
/// Times are year fractions from the curve's reference date. Dated
/// construction lives on the concrete curves, see
/// [`TermStructure`](crate::market_data::TermStructure).
///
/// # Invariants
///
/// - D(0) = 1
/// - D(t) > 0 for all t >= 0
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2021, 2, 24).unwrap();
/// let curve = FlatCurve::new(today, 0.05_f64, DayCountConvention::ActualActual365);
///
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// assert!((curve.zero_rate(1.0).unwrap() - 0.05).abs() < 1e-12);
/// assert!((curve.forward_rate(1.0, 2.0).unwrap() - 0.05).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Discount factor D(t) for maturity `t`.
    ///
    /// # Errors
    /// `MarketDataError::InvalidMaturity` if `t < 0`.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Continuously compounded zero rate r(t), with `D(t) = exp(-r(t) t)`.
    ///
    /// The default derives the rate from the discount factor and so is
    /// undefined at `t = 0`; curves quoted in zero rates override it.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Continuously compounded forward rate between `t1` and `t2`.
    ///
    /// ```text
    /// f(t1, t2) = -ln(D(t2) / D(t1)) / (t2 - t1)
    /// ```
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / dt)
    }
}
