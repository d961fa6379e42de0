//! Date-anchored term structures.
//!
//! Every curve and volatility structure in this crate is anchored to an
//! explicit reference date and day count, so there is no process-wide
//! evaluation date: two scenarios valued on different dates can coexist.

use std::fmt::Debug;

use super::curves::YieldCurve;
use super::error::MarketDataError;
use super::surfaces::VolatilitySurface;
use crate::types::time::{Date, DayCountConvention};

/// A term structure anchored at a reference date.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{FlatCurve, TermStructure};
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2021, 2, 24).unwrap();
/// let curve = FlatCurve::new(today, 0.01, DayCountConvention::ActualActual365);
///
/// let t = curve.time_from_reference(Date::from_ymd(2021, 5, 24).unwrap());
/// assert!((t - 89.0 / 365.0).abs() < 1e-12);
/// ```
pub trait TermStructure {
    /// Date at which `t = 0`.
    fn reference_date(&self) -> Date;

    /// Day count used to convert dates into times.
    fn day_count(&self) -> DayCountConvention;

    /// Year fraction from the reference date to `date`.
    #[inline]
    fn time_from_reference(&self, date: Date) -> f64 {
        self.day_count()
            .year_fraction_dates(self.reference_date(), date)
    }

    /// Year fraction to `date`, rejecting dates before the reference date.
    fn checked_time_from_reference(&self, date: Date) -> Result<f64, MarketDataError> {
        let reference = self.reference_date();
        if date < reference {
            return Err(MarketDataError::DateBeforeReference { date, reference });
        }
        Ok(self.time_from_reference(date))
    }
}

/// Object-safe yield term structure shared between process and engines.
pub trait YieldTermStructure: YieldCurve<f64> + TermStructure + Debug + Send + Sync {}

impl<C> YieldTermStructure for C where C: YieldCurve<f64> + TermStructure + Debug + Send + Sync {}

/// Object-safe Black volatility term structure.
pub trait BlackVolTermStructure:
    VolatilitySurface<f64> + TermStructure + Debug + Send + Sync
{
}

impl<S> BlackVolTermStructure for S where
    S: VolatilitySurface<f64> + TermStructure + Debug + Send + Sync
{
}

/// Validate dated pillars and convert them to times from `reference`.
///
/// Dates must match the value count, number at least `min_points`, be
/// strictly increasing and not precede the reference date.
pub(crate) fn pillar_times(
    reference: Date,
    day_count: DayCountConvention,
    dates: &[Date],
    values: usize,
    min_points: usize,
) -> Result<Vec<f64>, MarketDataError> {
    if dates.len() != values {
        return Err(MarketDataError::MismatchedLengths {
            dates: dates.len(),
            values,
        });
    }
    if dates.len() < min_points {
        return Err(MarketDataError::InsufficientData {
            got: dates.len(),
            need: min_points,
        });
    }
    if let Some(w) = dates.windows(2).find(|w| w[1] <= w[0]) {
        return Err(MarketDataError::UnsortedDates {
            date: w[1],
            previous: w[0],
        });
    }
    if let Some(&date) = dates.iter().find(|&&d| d < reference) {
        return Err(MarketDataError::DateBeforeReference { date, reference });
    }

    Ok(dates
        .iter()
        .map(|&d| day_count.year_fraction_dates(reference, d))
        .collect())
}
