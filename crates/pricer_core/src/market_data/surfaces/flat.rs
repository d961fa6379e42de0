//! Flat volatility implementation.

use super::traits::check_query;
use super::VolatilitySurface;
use crate::market_data::error::MarketDataError;
use crate::market_data::term_structure::TermStructure;
use crate::types::time::{Date, DayCountConvention};
use num_traits::Float;

/// Constant Black volatility for every strike and expiry.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{FlatVol, VolatilitySurface};
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2021, 2, 24).unwrap();
/// let surface = FlatVol::new(today, 0.20_f64, DayCountConvention::ActualActual365);
///
/// assert_eq!(surface.volatility(80.0, 0.5).unwrap(), 0.20);
/// assert_eq!(surface.volatility(120.0, 2.0).unwrap(), 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVol<T: Float = f64> {
    reference_date: Date,
    sigma: T,
    day_count: DayCountConvention,
}

impl<T: Float> FlatVol<T> {
    /// Construct a flat volatility anchored at `reference_date`.
    #[inline]
    pub fn new(reference_date: Date, sigma: T, day_count: DayCountConvention) -> Self {
        Self {
            reference_date,
            sigma,
            day_count,
        }
    }

    /// Return the constant volatility.
    #[inline]
    pub fn sigma(&self) -> T {
        self.sigma
    }
}

impl<T: Float> TermStructure for FlatVol<T> {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}

impl<T: Float> VolatilitySurface<T> for FlatVol<T> {
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        check_query(strike, expiry)?;
        Ok(self.sigma)
    }

    #[inline]
    fn strike_domain(&self) -> (T, T) {
        (T::zero(), T::infinity())
    }

    #[inline]
    fn expiry_domain(&self) -> (T, T) {
        (T::zero(), T::infinity())
    }
}
