//! Plain vanilla payoffs.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Call or put.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// assert_eq!("put".parse::<OptionType>().unwrap(), OptionType::Put);
/// assert_eq!(OptionType::Call.sign(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy: max(S - K, 0)
    Call,
    /// Right to sell: max(K - S, 0)
    Put,
}

impl OptionType {
    /// +1 for calls, -1 for puts.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(InstrumentError::InvalidParameter {
                message: format!("unknown option type: {}", s),
            }),
        }
    }
}

/// Plain vanilla payoff `max(ω(S - K), 0)` with ω = ±1.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionType, PlainVanillaPayoff};
///
/// let put = PlainVanillaPayoff::new(OptionType::Put, 40.0).unwrap();
/// assert_eq!(put.value(36.0), 4.0);
/// assert_eq!(put.value(44.0), 0.0);
///
/// assert!(PlainVanillaPayoff::new(OptionType::Put, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlainVanillaPayoff {
    option_type: OptionType,
    strike: f64,
}

impl PlainVanillaPayoff {
    /// Creates a payoff, rejecting non-positive or non-finite strikes.
    pub fn new(option_type: OptionType, strike: f64) -> Result<Self, InstrumentError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        Ok(Self {
            option_type,
            strike,
        })
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Exercise value at spot `price`.
    #[inline]
    pub fn value(&self, price: f64) -> f64 {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_value() {
        let call = PlainVanillaPayoff::new(OptionType::Call, 100.0).unwrap();
        assert_eq!(call.value(110.0), 10.0);
        assert_eq!(call.value(90.0), 0.0);
        assert_eq!(call.value(100.0), 0.0);
    }

    #[test]
    fn test_put_value() {
        let put = PlainVanillaPayoff::new(OptionType::Put, 40.0).unwrap();
        assert_eq!(put.value(36.0), 4.0);
        assert_eq!(put.value(40.0), 0.0);
        assert_eq!(put.strike(), 40.0);
        assert_eq!(put.option_type(), OptionType::Put);
    }

    #[test]
    fn test_invalid_strikes() {
        for strike in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(PlainVanillaPayoff::new(OptionType::Call, strike).is_err());
        }
    }

    #[test]
    fn test_option_type_parse_and_display() {
        assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("P".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!("straddle".parse::<OptionType>().is_err());
        assert_eq!(OptionType::Put.to_string(), "Put");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_payoff_non_negative(spot in 0.0f64..200.0, strike in 1.0f64..200.0) {
                for ty in [OptionType::Call, OptionType::Put] {
                    let payoff = PlainVanillaPayoff::new(ty, strike).unwrap();
                    prop_assert!(payoff.value(spot) >= 0.0);
                }
            }

            #[test]
            fn test_call_minus_put_is_forward(spot in 0.0f64..200.0, strike in 1.0f64..200.0) {
                let call = PlainVanillaPayoff::new(OptionType::Call, strike).unwrap();
                let put = PlainVanillaPayoff::new(OptionType::Put, strike).unwrap();
                prop_assert!((call.value(spot) - put.value(spot) - (spot - strike)).abs() < 1e-9);
            }
        }
    }
}
