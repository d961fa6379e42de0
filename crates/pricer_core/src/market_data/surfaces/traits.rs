//! Volatility surface trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Black volatility lookup by strike and time to expiry.
///
/// # Contract
///
/// - `volatility(strike, expiry)` returns the Black volatility σ(K, T)
/// - `black_variance(strike, expiry)` returns the total variance σ²T
/// - `strike_domain()` / `expiry_domain()` bound the valid queries
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
/// assert_eq!(surface.volatility(100.0, 1.0).unwrap(), 0.20);
/// assert!((surface.black_variance(100.0, 0.5).unwrap() - 0.02).abs() < 1e-15);
/// ```
pub trait VolatilitySurface<T: Float> {
    /// Return the Black volatility for given strike and expiry.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidStrike` - If strike <= 0
    /// * `MarketDataError::InvalidExpiry` - If expiry < 0
    /// * `MarketDataError::OutOfBounds` - If outside valid domain
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError>;

    /// Total Black variance σ(K, T)²·T.
    fn black_variance(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        let vol = self.volatility(strike, expiry)?;
        Ok(vol * vol * expiry)
    }

    /// Return the valid strike domain `(K_min, K_max)`.
    fn strike_domain(&self) -> (T, T);

    /// Return the valid expiry domain `(T_min, T_max)`.
    fn expiry_domain(&self) -> (T, T);
}

/// Shared argument checks for surfaces.
pub(crate) fn check_query<T: Float>(strike: T, expiry: T) -> Result<(), MarketDataError> {
    if !(strike > T::zero()) {
        return Err(MarketDataError::InvalidStrike {
            strike: strike.to_f64().unwrap_or(f64::NAN),
        });
    }
    if !(expiry >= T::zero()) {
        return Err(MarketDataError::InvalidExpiry {
            expiry: expiry.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Vol rising linearly with expiry.
    struct SlopedVol;

    impl VolatilitySurface<f64> for SlopedVol {
        fn volatility(&self, strike: f64, expiry: f64) -> Result<f64, MarketDataError> {
            check_query(strike, expiry)?;
            Ok(0.1 + 0.1 * expiry)
        }

        fn strike_domain(&self) -> (f64, f64) {
            (0.0, f64::INFINITY)
        }

        fn expiry_domain(&self) -> (f64, f64) {
            (0.0, f64::INFINITY)
        }
    }

    #[test]
    fn test_default_black_variance() {
        assert_relative_eq!(SlopedVol.black_variance(50.0, 1.0).unwrap(), 0.04, epsilon = 1e-15);
        assert_eq!(SlopedVol.black_variance(50.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_check_query() {
        assert!(matches!(
            SlopedVol.volatility(0.0, 1.0),
            Err(MarketDataError::InvalidStrike { .. })
        ));
        assert!(matches!(
            SlopedVol.volatility(10.0, -1.0),
            Err(MarketDataError::InvalidExpiry { .. })
        ));
        assert!(SlopedVol.volatility(f64::NAN, 1.0).is_err());
    }
}
