//! Zero-rate curve built from dated pillars.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::market_data::term_structure::{pillar_times, TermStructure};
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use crate::types::time::{Date, DayCountConvention};

/// Yield curve quoted as continuously compounded zero rates on dates.
///
/// Zero rates are interpolated linearly in time between pillars. The first
/// pillar must fall on the reference date, so the curve covers `[0, t_n]`.
/// Beyond the last pillar lookups fail unless extrapolation is enabled, in
/// which case the last zero rate is held flat.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, ZeroCurve};
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2021, 2, 24).unwrap();
/// let six_months = today.add_months(6).unwrap();
///
/// let curve = ZeroCurve::new(
///     today,
///     &[today, six_months],
///     &[0.01, 0.015],
///     DayCountConvention::ActualActual365,
/// )
/// .unwrap();
///
/// // Three months out sits 89/181 of the way between the two pillars
/// let t = 89.0 / 365.0;
/// let r = curve.zero_rate(t).unwrap();
/// assert!((r - (0.01 + 0.005 * 89.0 / 181.0)).abs() < 1e-12);
///
/// // Past the last pillar without extrapolation
/// assert!(curve.zero_rate(1.0).is_err());
/// assert!(curve.with_extrapolation().zero_rate(1.0).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ZeroCurve {
    reference_date: Date,
    day_count: DayCountConvention,
    dates: Vec<Date>,
    rates: LinearInterpolator<f64>,
    allow_extrapolation: bool,
}

impl ZeroCurve {
    /// Build a curve from pillar dates and zero rates.
    ///
    /// # Errors
    ///
    /// - `MismatchedLengths` if `dates` and `rates` differ in length
    /// - `InsufficientData` with fewer than two pillars
    /// - `InvalidValue` if the first date is not the reference date or a rate is not finite
    /// - `UnsortedDates` if the dates are not strictly increasing
    pub fn new(
        reference_date: Date,
        dates: &[Date],
        rates: &[f64],
        day_count: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        if let Some(&first) = dates.first() {
            if first != reference_date {
                return Err(MarketDataError::InvalidValue(format!(
                    "first pillar {} must be the reference date {}",
                    first, reference_date
                )));
            }
        }
        if let Some(rate) = rates.iter().find(|r| !r.is_finite()) {
            return Err(MarketDataError::InvalidValue(format!(
                "zero rate {} is not finite",
                rate
            )));
        }

        let times = pillar_times(reference_date, day_count, dates, rates.len(), 2)?;
        let rates = LinearInterpolator::new(&times, rates)?;

        Ok(Self {
            reference_date,
            day_count,
            dates: dates.to_vec(),
            rates,
            allow_extrapolation: false,
        })
    }

    /// Allow lookups past the last pillar, holding the last zero rate flat.
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Pillar zero rates.
    pub fn rates(&self) -> &[f64] {
        self.rates.ys()
    }

    /// Last pillar date.
    pub fn max_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Zero rate on `date`.
    pub fn zero_rate_on(&self, date: Date) -> Result<f64, MarketDataError> {
        let t = self.checked_time_from_reference(date)?;
        self.zero_rate(t)
    }

    /// Discount factor on `date`.
    pub fn discount_on(&self, date: Date) -> Result<f64, MarketDataError> {
        let t = self.checked_time_from_reference(date)?;
        self.discount_factor(t)
    }
}

impl TermStructure for ZeroCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}

impl YieldCurve<f64> for ZeroCurve {
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        let r = self.zero_rate(t)?;
        Ok((-r * t).exp())
    }

    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        if t < 0.0 || t.is_nan() {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        if self.allow_extrapolation {
            return Ok(self.rates.interpolate_flat(t));
        }
        self.rates.interpolate(t).map_err(|_| {
            let (min, max) = self.rates.domain();
            MarketDataError::OutOfBounds { x: t, min, max }
        })
    }
}
