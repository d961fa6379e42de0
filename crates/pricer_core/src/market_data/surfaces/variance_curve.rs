//! Black volatility curve interpolated in total variance.

use super::traits::check_query;
use super::VolatilitySurface;
use crate::market_data::error::MarketDataError;
use crate::market_data::term_structure::{pillar_times, TermStructure};
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use crate::types::time::{Date, DayCountConvention};

/// Strike-independent Black volatility term structure.
///
/// Each pillar `(d_i, σ_i)` becomes a total variance `v_i = t_i σ_i²` with
/// `t_i` the year fraction from the reference date. Variance is linear in
/// time between pillars and starts from `v = 0` at `t = 0`, so the
/// volatility at time `t` is `sqrt(v(t) / t)`.
///
/// Past the last pillar the last volatility is held flat when extrapolation
/// is enabled; otherwise the lookup fails.
///
/// # Invariants
///
/// - pillar dates are strictly after the reference date and strictly increasing
/// - total variance is non-decreasing (unless constructed with
///   [`new_unchecked_variance`](Self::new_unchecked_variance))
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{BlackVarianceCurve, VolatilitySurface};
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2021, 2, 24).unwrap();
/// let curve = BlackVarianceCurve::new(
///     today,
///     &[today.add_months(3).unwrap(), today.add_months(6).unwrap()],
///     &[0.20, 0.25],
///     DayCountConvention::ActualActual365,
/// )
/// .unwrap();
///
/// // Pillar vols are reproduced exactly
/// let t1 = 89.0 / 365.0;
/// assert!((curve.volatility(36.0, t1).unwrap() - 0.20).abs() < 1e-12);
///
/// // Inside the first interval the vol is flat
/// assert!((curve.volatility(36.0, t1 / 2.0).unwrap() - 0.20).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BlackVarianceCurve {
    reference_date: Date,
    day_count: DayCountConvention,
    dates: Vec<Date>,
    vols: Vec<f64>,
    variances: LinearInterpolator<f64>,
    allow_extrapolation: bool,
}

impl BlackVarianceCurve {
    /// Build a curve from pillar dates and Black volatilities, enforcing
    /// non-decreasing total variance.
    ///
    /// # Errors
    ///
    /// - `MismatchedLengths` if `dates` and `vols` differ in length
    /// - `InsufficientData` if no pillar is given
    /// - `UnsortedDates` if the dates are not strictly increasing
    /// - `DateBeforeReference` if a date is on or before the reference date
    /// - `InvalidValue` if a vol is negative or not finite
    /// - `NonMonotonicVariance` if total variance decreases
    pub fn new(
        reference_date: Date,
        dates: &[Date],
        vols: &[f64],
        day_count: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        Self::build(reference_date, dates, vols, day_count, true)
    }

    /// Build a curve without the non-decreasing variance check.
    pub fn new_unchecked_variance(
        reference_date: Date,
        dates: &[Date],
        vols: &[f64],
        day_count: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        Self::build(reference_date, dates, vols, day_count, false)
    }

    fn build(
        reference_date: Date,
        dates: &[Date],
        vols: &[f64],
        day_count: DayCountConvention,
        force_monotone_variance: bool,
    ) -> Result<Self, MarketDataError> {
        let times = pillar_times(reference_date, day_count, dates, vols.len(), 1)?;

        if let Some(&date) = dates.first() {
            if times[0] <= 0.0 {
                return Err(MarketDataError::DateBeforeReference {
                    date,
                    reference: reference_date,
                });
            }
        }
        if let Some(vol) = vols.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(MarketDataError::InvalidValue(format!(
                "volatility {} must be finite and non-negative",
                vol
            )));
        }

        let mut xs = Vec::with_capacity(times.len() + 1);
        let mut ys = Vec::with_capacity(times.len() + 1);
        xs.push(0.0);
        ys.push(0.0);
        for (i, (&t, &vol)) in times.iter().zip(vols).enumerate() {
            let variance = t * vol * vol;
            let previous = ys[i];
            if force_monotone_variance && variance < previous {
                return Err(MarketDataError::NonMonotonicVariance {
                    date: dates[i],
                    variance,
                    previous,
                });
            }
            xs.push(t);
            ys.push(variance);
        }

        Ok(Self {
            reference_date,
            day_count,
            dates: dates.to_vec(),
            vols: vols.to_vec(),
            variances: LinearInterpolator::new(&xs, &ys)?,
            allow_extrapolation: false,
        })
    }

    /// Allow lookups past the last pillar, holding the last volatility flat.
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Pillar volatilities.
    pub fn vols(&self) -> &[f64] {
        &self.vols
    }

    /// Last pillar date.
    pub fn max_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Volatility for an expiry date.
    pub fn volatility_on(&self, strike: f64, date: Date) -> Result<f64, MarketDataError> {
        let t = self.checked_time_from_reference(date)?;
        self.volatility(strike, t)
    }

    fn variance_at(&self, t: f64) -> Result<f64, MarketDataError> {
        let (_, t_max) = self.variances.domain();
        if t <= t_max {
            return Ok(self.variances.interpolate(t)?);
        }
        if !self.allow_extrapolation {
            return Err(MarketDataError::OutOfBounds {
                x: t,
                min: 0.0,
                max: t_max,
            });
        }
        let last = self.variances.ys()[self.variances.len() - 1];
        Ok(last * t / t_max)
    }
}

impl TermStructure for BlackVarianceCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}

impl VolatilitySurface<f64> for BlackVarianceCurve {
    fn volatility(&self, strike: f64, expiry: f64) -> Result<f64, MarketDataError> {
        check_query(strike, expiry)?;
        if expiry == 0.0 {
            // limit of sqrt(v(t)/t) as t -> 0 on the first linear segment
            return Ok(self.vols[0]);
        }
        let variance = self.variance_at(expiry)?;
        Ok((variance / expiry).sqrt())
    }

    fn black_variance(&self, strike: f64, expiry: f64) -> Result<f64, MarketDataError> {
        check_query(strike, expiry)?;
        self.variance_at(expiry)
    }

    fn strike_domain(&self) -> (f64, f64) {
        (0.0, f64::INFINITY)
    }

    fn expiry_domain(&self) -> (f64, f64) {
        if self.allow_extrapolation {
            (0.0, f64::INFINITY)
        } else {
            self.variances.domain()
        }
    }
}
