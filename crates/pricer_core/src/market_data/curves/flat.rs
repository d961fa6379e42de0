//! Flat yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::market_data::term_structure::TermStructure;
use crate::types::time::{Date, DayCountConvention};
use num_traits::Float;

/// Flat yield curve with a constant continuously compounded rate.
///
/// Used for the dividend yield of a non-dividend-paying underlying and for
/// tests that need a rate environment without term structure.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (defaults to `f64`)
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
/// // Discount factor at t=1: exp(-0.05 * 1)
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// assert_eq!(curve.zero_rate(5.0).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float = f64> {
    reference_date: Date,
    rate: T,
    day_count: DayCountConvention,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve anchored at `reference_date`.
    #[inline]
    pub fn new(reference_date: Date, rate: T, day_count: DayCountConvention) -> Self {
        Self {
            reference_date,
            rate,
            day_count,
        }
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> TermStructure for FlatCurve<T> {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.rate * t).exp())
    }

    /// The constant rate, defined for every `t >= 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }

    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 <= t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: (t2 - t1).to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }
}
