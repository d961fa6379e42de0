//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes-Merton model for pricing European
//! call and put options on an asset paying a continuous dividend yield,
//! with analytical Greeks.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionType;

/// Expiries at or below this are treated as expired.
const EXPIRY_EPSILON: f64 = 1e-10;

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// Black-Scholes model for European option pricing.
///
/// Provides closed-form pricing and Greeks calculations for European
/// options under lognormal dynamics. The lattice engines also use it to
/// value the last time step of a tree analytically.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend_yield: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model with zero dividend yield.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, continuous)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    ///
    /// // Invalid spot
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    ///
    /// // Invalid volatility
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !(spot > zero) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(volatility > zero) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield: zero,
            volatility,
        })
    }

    /// Sets the continuous dividend yield `q`.
    pub fn with_dividend_yield(mut self, dividend_yield: T) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    #[inline]
    fn expired(expiry: T) -> bool {
        expiry <= lit(EXPIRY_EPSILON)
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// Returns ±100 (or 0 at the money) once the option has expired.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            let large: T = lit(100.0);
            return if self.spot > strike {
                large
            } else if self.spot < strike {
                -large
            } else {
                T::zero()
            };
        }

        let half: T = lit(0.5);
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift =
            (self.rate - self.dividend_yield + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes European call option price.
    ///
    /// C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// assert!(bs.price_call(100.0, 1.0) > 0.0);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return (self.spot - strike).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();
        let dividend_discount = (-self.dividend_yield * expiry).exp();

        self.spot * dividend_discount * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(36.0_f64, 0.012458563535911602, 0.2).unwrap();
    /// let price = bs.price_put(40.0, 89.0 / 365.0);
    /// assert!((price - 4.169369).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return (strike - self.spot).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();
        let dividend_discount = (-self.dividend_yield * expiry).exp();

        strike * discount * norm_cdf(-d2) - self.spot * dividend_discount * norm_cdf(-d1)
    }

    /// Price of a call or put.
    #[inline]
    pub fn price(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = e^(-qT)·(N(d₁) - 1)
    #[inline]
    pub fn delta(&self, strike: T, expiry: T, is_call: bool) -> T {
        let one = T::one();
        let zero = T::zero();

        if Self::expired(expiry) {
            return if is_call {
                if self.spot > strike {
                    one
                } else {
                    zero
                }
            } else if self.spot < strike {
                -one
            } else {
                zero
            };
        }

        let dividend_discount = (-self.dividend_yield * expiry).exp();
        let n_d1 = norm_cdf(self.d1(strike, expiry));

        if is_call {
            dividend_discount * n_d1
        } else {
            dividend_discount * (n_d1 - one)
        }
    }

    /// Computes Gamma (∂²V/∂S²).
    ///
    /// Gamma = e^(-qT)·φ(d₁) / (S·σ·√T), the same for calls and puts.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        let dividend_discount = (-self.dividend_yield * expiry).exp();

        dividend_discount * norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Theta (∂V/∂t), per year of calendar time.
    ///
    /// - Call Theta = -S·e^(-qT)·φ(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂) + q·S·e^(-qT)·N(d₁)
    /// - Put Theta = -S·e^(-qT)·φ(d₁)·σ/(2√T) + r·K·e^(-rT)·N(-d₂) - q·S·e^(-qT)·N(-d₁)
    ///
    /// Usually negative (time decay).
    #[inline]
    pub fn theta(&self, strike: T, expiry: T, is_call: bool) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();
        let forward_spot = self.spot * (-self.dividend_yield * expiry).exp();
        let two: T = lit(2.0);

        let decay = -(forward_spot * self.volatility * norm_pdf(d1)) / (two * expiry.sqrt());

        if is_call {
            decay - self.rate * strike * discount * norm_cdf(d2)
                + self.dividend_yield * forward_spot * norm_cdf(d1)
        } else {
            decay + self.rate * strike * discount * norm_cdf(-d2)
                - self.dividend_yield * forward_spot * norm_cdf(-d1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.volatility(), 0.2);
        assert_eq!(bs.dividend_yield(), 0.0);
    }

    #[test]
    fn test_new_invalid_spot() {
        match BlackScholes::new(-100.0_f64, 0.05, 0.2) {
            Err(AnalyticalError::InvalidSpot { spot }) => assert_eq!(spot, -100.0),
            other => panic!("Expected InvalidSpot error, got {other:?}"),
        }
        assert!(BlackScholes::new(0.0_f64, 0.05, 0.2).is_err());
        assert!(BlackScholes::new(f64::NAN, 0.05, 0.2).is_err());
    }

    #[test]
    fn test_new_invalid_volatility() {
        match BlackScholes::new(100.0_f64, 0.05, 0.0) {
            Err(AnalyticalError::InvalidVolatility { volatility }) => assert_eq!(volatility, 0.0),
            other => panic!("Expected InvalidVolatility error, got {other:?}"),
        }
    }

    #[test]
    fn test_new_negative_rate_allowed() {
        assert!(BlackScholes::new(100.0_f64, -0.01, 0.2).is_ok());
    }

    // ==========================================================
    // d1/d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_relationship() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        let d1 = bs.d1(110.0, 0.5);
        let d2 = bs.d2(110.0, 0.5);
        assert_relative_eq!(d1 - d2, 0.2 * 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_d1_expiry_zero() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert!(bs.d1(90.0, 0.0) > 10.0);
        assert!(bs.d1(110.0, 0.0) < -10.0);
        assert_eq!(bs.d1(100.0, 0.0), 0.0);
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        // S=100, K=100, r=0.05, σ=0.2, T=1
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 10.4506, epsilon = 0.001);
    }

    #[test]
    fn test_put_price_reference_value() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_relative_eq!(bs.price_put(100.0, 1.0), 5.5735, epsilon = 0.001);
    }

    #[test]
    fn test_prices_with_dividend_yield() {
        // S=100, K=100, r=0.05, q=0.02, σ=0.2, T=1
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2)
            .unwrap()
            .with_dividend_yield(0.02);
        assert_relative_eq!(bs.price_call(100.0, 1.0), 9.227005508154036, epsilon = 1e-12);
        assert_relative_eq!(bs.price_put(100.0, 1.0), 6.330080627549918, epsilon = 1e-12);
    }

    #[test]
    fn test_short_dated_put_reference_value() {
        let bs = BlackScholes::new(36.0_f64, 0.012458563535911602, 0.2).unwrap();
        assert_relative_eq!(
            bs.price(OptionType::Put, 40.0, 89.0 / 365.0),
            4.169369064624032,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_price_expiry_zero_is_intrinsic() {
        let bs = BlackScholes::new(110.0_f64, 0.05, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 0.0), 10.0, epsilon = 1e-12);
        assert_eq!(bs.price_put(100.0, 0.0), 0.0);

        let bs = BlackScholes::new(90.0_f64, 0.05, 0.2).unwrap();
        assert_eq!(bs.price_call(100.0, 0.0), 0.0);
        assert_relative_eq!(bs.price_put(100.0, 0.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_price_dispatches_on_option_type() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_eq!(bs.price(OptionType::Call, 95.0, 0.5), bs.price_call(95.0, 0.5));
        assert_eq!(bs.price(OptionType::Put, 95.0, 0.5), bs.price_put(95.0, 0.5));
    }

    // ==========================================================
    // Put-Call Parity Tests
    // ==========================================================

    #[test]
    fn test_put_call_parity_various_strikes() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2)
            .unwrap()
            .with_dividend_yield(0.01);
        for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
            let call = bs.price_call(strike, 1.0);
            let put = bs.price_put(strike, 1.0);
            let forward = 100.0 * (-0.01_f64).exp() - strike * (-0.05_f64).exp();
            assert_relative_eq!(call - put, forward, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_put_call_parity_negative_rate() {
        let bs = BlackScholes::new(100.0_f64, -0.02, 0.2).unwrap();
        let call = bs.price_call(100.0, 1.0);
        let put = bs.price_put(100.0, 1.0);
        let forward = 100.0 - 100.0 * (0.02_f64).exp();
        assert_relative_eq!(call - put, forward, epsilon = 1e-10);
    }

    // ==========================================================
    // Greeks Tests
    // ==========================================================

    #[test]
    fn test_delta_bounds() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
            let call = bs.delta(strike, 1.0, true);
            let put = bs.delta(strike, 1.0, false);
            assert!((0.0..=1.0).contains(&call));
            assert!((-1.0..=0.0).contains(&put));
            assert_relative_eq!(call - put, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gamma_non_negative() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        for strike in [50.0, 100.0, 150.0] {
            assert!(bs.gamma(strike, 1.0) >= 0.0);
        }
    }

    // ==========================================================
    // Greeks vs Finite Difference Tests
    // ==========================================================

    fn model(spot: f64, rate: f64, vol: f64) -> BlackScholes<f64> {
        BlackScholes::new(spot, rate, vol)
            .unwrap()
            .with_dividend_yield(0.03)
    }

    #[test]
    fn test_delta_vs_finite_diff() {
        let h = 0.01;
        let fd = (model(100.0 + h, 0.05, 0.2).price_put(100.0, 1.0)
            - model(100.0 - h, 0.05, 0.2).price_put(100.0, 1.0))
            / (2.0 * h);
        assert_relative_eq!(model(100.0, 0.05, 0.2).delta(100.0, 1.0, false), fd, epsilon = 1e-6);
    }

    #[test]
    fn test_gamma_vs_finite_diff() {
        let h = 0.01;
        let fd = (model(100.0 + h, 0.05, 0.2).price_call(100.0, 1.0)
            - 2.0 * model(100.0, 0.05, 0.2).price_call(100.0, 1.0)
            + model(100.0 - h, 0.05, 0.2).price_call(100.0, 1.0))
            / (h * h);
        assert_relative_eq!(model(100.0, 0.05, 0.2).gamma(100.0, 1.0), fd, epsilon = 1e-3);
    }

    #[test]
    fn test_theta_vs_finite_diff() {
        let h = 1e-5;
        let bs = model(100.0, 0.05, 0.2);
        for is_call in [true, false] {
            let price = |t: f64| {
                if is_call {
                    bs.price_call(95.0, t)
                } else {
                    bs.price_put(95.0, t)
                }
            };
            // Calendar time runs against time to expiry.
            let fd = -(price(1.0 + h) - price(1.0 - h)) / (2.0 * h);
            assert_relative_eq!(bs.theta(95.0, 1.0, is_call), fd, epsilon = 1e-5);
        }
    }

    // ==========================================================
    // Clone, Debug and f32 Tests
    // ==========================================================

    #[test]
    fn test_clone_and_debug() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        let copy = bs.clone();
        assert_eq!(copy.spot(), bs.spot());
        let debug_str = format!("{:?}", bs);
        assert!(debug_str.contains("BlackScholes"));
        assert!(debug_str.contains("dividend_yield"));
    }

    #[test]
    fn test_f32_compatibility() {
        let bs = BlackScholes::new(100.0_f32, 0.05_f32, 0.2_f32).unwrap();
        assert!(bs.price_call(100.0_f32, 1.0_f32) > 0.0_f32);
    }
}
