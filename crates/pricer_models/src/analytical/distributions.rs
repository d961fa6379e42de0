//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! The lattice engines evaluate the CDF at every node of the smoothing
//! layer, so it has to be accurate to double precision rather than to the
//! 1e-7 of the classic Abramowitz-Stegun fit.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Hart (1968) rational approximation, double precision form (West, 2005).
const HART_NUM: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

const HART_DEN: [f64; 8] = [
    8.838_834_764_831_84e-2,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

/// Lower tail `Φ(-|x|)` of the standard normal.
fn lower_tail(abs_x: f64) -> f64 {
    if abs_x > 37.0 {
        return 0.0;
    }
    let gauss = (-0.5 * abs_x * abs_x).exp();
    if abs_x < 7.071_067_811_865_47 {
        let num = HART_NUM.iter().fold(0.0, |acc, &c| acc * abs_x + c);
        let den = HART_DEN.iter().fold(0.0, |acc, &c| acc * abs_x + c);
        gauss * num / den
    } else {
        // continued fraction tail
        let mut build = abs_x + 0.65;
        for k in [4.0, 3.0, 2.0, 1.0] {
            build = abs_x + k / build;
        }
        gauss / build / SQRT_2PI
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Accuracy
/// Absolute error at the level of f64 rounding over the real line.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0_f64), 0.5);
/// assert!((norm_cdf(1.0_f64) - 0.8413447460685429).abs() < 1e-14);
/// assert!(norm_cdf(-40.0_f64) == 0.0);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let x = x.to_f64().unwrap_or(f64::NAN);
    let tail = lower_tail(x.abs());
    let cdf = if x > 0.0 { 1.0 - tail } else { tail };
    T::from(cdf).unwrap_or_else(T::nan)
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// let pdf_0 = norm_pdf(0.0_f64);
/// assert!((pdf_0 - 0.3989422804).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap_or_else(T::nan);
    let half = T::from(0.5).unwrap_or_else(T::nan);
    frac_1_sqrt_2pi * (-half * x * x).exp()
}
