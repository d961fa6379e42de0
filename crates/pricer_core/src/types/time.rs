//! Time types and Day Count Conventions for financial calculations.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCountConvention`: Industry-standard day count conventions
//! - Year fraction calculations for term structures and instruments
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2021, 2, 24).unwrap();
//! let expiry = today.add_months(3).unwrap();
//! assert_eq!(expiry, Date::from_ymd(2021, 5, 24).unwrap());
//!
//! // 89 days under ACT/365
//! let yf = DayCountConvention::ActualActual365.year_fraction_dates(today, expiry);
//! assert!((yf - 89.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and the date arithmetic needed to anchor
/// term structures (`today + 6 months`) and exercise windows.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2021, 2, 24).unwrap();
/// assert_eq!(date.year(), 2021);
/// assert_eq!(date.month(), 2);
/// assert_eq!(date.day(), 24);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2021-02-24".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Days between dates
/// let later = Date::from_ymd(2021, 5, 24).unwrap();
/// assert_eq!(later - date, 89);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2021, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse("2021-05-24").unwrap();
    /// assert_eq!(date.month(), 5);
    ///
    /// assert!(Date::parse("24/05/2021").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the date `days` calendar days later.
    pub fn add_days(self, days: u64) -> Result<Self, DateError> {
        self.0
            .checked_add_days(Days::new(days))
            .map(Date)
            .ok_or_else(|| DateError::OutOfRange(format!("{} + {} days", self, days)))
    }

    /// Returns the date `months` calendar months later.
    ///
    /// The day of month is clamped to the last day of the target month, so
    /// that 31 January plus one month is the end of February.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let today = Date::from_ymd(2021, 2, 24).unwrap();
    /// assert_eq!(today.add_months(6).unwrap(), Date::from_ymd(2021, 8, 24).unwrap());
    ///
    /// let month_end = Date::from_ymd(2021, 1, 31).unwrap();
    /// assert_eq!(month_end.add_months(1).unwrap(), Date::from_ymd(2021, 2, 28).unwrap());
    /// ```
    pub fn add_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::OutOfRange(format!("{} + {} months", self, months)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day Count Convention (year fraction convention).
///
/// # Variants
/// - `ActualActual365`: Actual days / 365 (Actual/365 Fixed)
/// - `ActualActual360`: Actual days / 360 (money market instruments)
/// - `Thirty360`: Each month treated as 30 days, year as 360 days
///
/// # Usage
///
/// ```
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let start = Date::from_ymd(2021, 2, 24).unwrap();
/// let end = Date::from_ymd(2021, 8, 24).unwrap();
///
/// let yf = DayCountConvention::ActualActual365.year_fraction_dates(start, end);
/// assert!((yf - 181.0 / 365.0).abs() < 1e-12);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    ///
    /// The convention used by the equity term structures in this workspace.
    #[default]
    ActualActual365,

    /// Actual/360: actual_days / 360.0
    ActualActual360,

    /// 30/360 US Bond Basis
    ///
    /// Each month is treated as having 30 days, and the year as 360 days.
    Thirty360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::ActualActual365.name(), "ACT/365");
    /// assert_eq!(DayCountConvention::ActualActual360.name(), "ACT/360");
    /// assert_eq!(DayCountConvention::Thirty360.name(), "30/360");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActualActual365 => "ACT/365",
            DayCountConvention::ActualActual360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Calculates the year fraction between two dates.
    ///
    /// Returns a negative value when `start > end`, so the sign can be used
    /// to tell whether a date lies before a term structure's reference date.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2024, 7, 1).unwrap();
    ///
    /// let yf = DayCountConvention::ActualActual365.year_fraction_dates(start, end);
    /// assert!((yf - 0.4986).abs() < 0.001);
    ///
    /// let yf_neg = DayCountConvention::ActualActual365.year_fraction_dates(end, start);
    /// assert!((yf_neg + 0.4986).abs() < 0.001);
    /// ```
    pub fn year_fraction_dates(&self, start: Date, end: Date) -> f64 {
        let days = end - start;

        match self {
            DayCountConvention::ActualActual365 => days as f64 / 365.0,
            DayCountConvention::ActualActual360 => days as f64 / 360.0,
            DayCountConvention::Thirty360 => {
                let (first, last, sign) = if start <= end {
                    (start, end, 1.0)
                } else {
                    (end, start, -1.0)
                };

                let d1_adj = if first.day() == 31 { 30 } else { first.day() };
                let d2_adj = if last.day() == 31 && d1_adj == 30 {
                    30
                } else {
                    last.day()
                };

                let days_30_360 = 360 * (last.year() - first.year())
                    + 30 * (last.month() as i32 - first.month() as i32)
                    + (d2_adj as i32 - d1_adj as i32);
                sign * days_30_360 as f64 / 360.0
            }
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses day count convention from string (case-insensitive).
    ///
    /// Supports multiple aliases for each convention:
    /// - ACT/365: "ACT/365", "Actual/365", "Act365", "A365", "ACT/365F"
    /// - ACT/360: "ACT/360", "Actual/360", "Act360", "A360"
    /// - 30/360: "30/360", "Thirty360", "30360"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' '], "").as_str() {
            "ACT365" | "ACTUAL365" | "A365" | "ACT365F" | "ACTUAL365FIXED" => {
                Ok(DayCountConvention::ActualActual365)
            }
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::ActualActual360),
            "30360" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_act_365_known_dates() {
        let yf = DayCountConvention::ActualActual365
            .year_fraction_dates(date(2021, 2, 24), date(2021, 5, 24));
        assert_relative_eq!(yf, 89.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn test_act_360_known_dates() {
        let yf = DayCountConvention::ActualActual360
            .year_fraction_dates(date(2024, 1, 1), date(2024, 7, 1));
        assert_relative_eq!(yf, 182.0 / 360.0, epsilon = 1e-15);
    }

    #[test]
    fn test_thirty_360_with_31st_days() {
        let yf = DayCountConvention::Thirty360
            .year_fraction_dates(date(2024, 1, 31), date(2024, 3, 31));
        assert_relative_eq!(yf, 60.0 / 360.0, epsilon = 1e-15);
    }

    #[test]
    fn test_thirty_360_negative_direction() {
        let forward = DayCountConvention::Thirty360
            .year_fraction_dates(date(2024, 1, 15), date(2024, 4, 15));
        let backward = DayCountConvention::Thirty360
            .year_fraction_dates(date(2024, 4, 15), date(2024, 1, 15));
        assert_relative_eq!(forward, -backward);
    }

    #[test]
    fn test_same_date_returns_zero() {
        let d = date(2021, 2, 24);
        assert_eq!(DayCountConvention::ActualActual365.year_fraction_dates(d, d), 0.0);
        assert_eq!(DayCountConvention::Thirty360.year_fraction_dates(d, d), 0.0);
    }

    #[test]
    fn test_date_from_ymd_invalid() {
        let result = Date::from_ymd(2021, 2, 29);
        assert_eq!(
            result,
            Err(DateError::InvalidDate {
                year: 2021,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn test_date_parse_and_display() {
        let d: Date = "2021-02-24".parse().unwrap();
        assert_eq!(d, date(2021, 2, 24));
        assert_eq!(d.to_string(), "2021-02-24");
        assert!(matches!(
            Date::parse("2021-13-01"),
            Err(DateError::ParseError(_))
        ));
    }

    #[test]
    fn test_add_months_matches_calendar() {
        let today = date(2021, 2, 24);
        assert_eq!(today.add_months(3).unwrap(), date(2021, 5, 24));
        assert_eq!(today.add_months(6).unwrap(), date(2021, 8, 24));
        assert_eq!(today.add_months(12).unwrap(), date(2022, 2, 24));
    }

    #[test]
    fn test_add_months_clamps_month_end() {
        assert_eq!(date(2021, 8, 31).add_months(1).unwrap(), date(2021, 9, 30));
        assert_eq!(date(2024, 1, 31).add_months(1).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_add_days() {
        assert_eq!(date(2021, 2, 24).add_days(89).unwrap(), date(2021, 5, 24));
        assert_eq!(date(2021, 2, 24).add_days(0).unwrap(), date(2021, 2, 24));
    }

    #[test]
    fn test_date_subtraction_and_ordering() {
        let a = date(2021, 2, 24);
        let b = date(2021, 8, 24);
        assert_eq!(b - a, 181);
        assert_eq!(a - b, -181);
        assert!(a < b);
    }

    #[test]
    fn test_dcc_from_str() {
        assert_eq!(
            "Actual/365 Fixed".parse::<DayCountConvention>(),
            Ok(DayCountConvention::ActualActual365)
        );
        assert_eq!(
            "act/360".parse::<DayCountConvention>(),
            Ok(DayCountConvention::ActualActual360)
        );
        assert_eq!(
            "30/360".parse::<DayCountConvention>(),
            Ok(DayCountConvention::Thirty360)
        );
        assert!("BUS/252".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_dcc_default_is_act_365() {
        assert_eq!(
            DayCountConvention::default(),
            DayCountConvention::ActualActual365
        );
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_date_serde_roundtrip() {
            let d = date(2021, 2, 24);
            let json = serde_json::to_string(&d).unwrap();
            assert_eq!(json, "\"2021-02-24\"");
            let back: Date = serde_json::from_str(&json).unwrap();
            assert_eq!(back, d);
        }

        #[test]
        fn test_dcc_serde_deserialize_alias() {
            let dcc: DayCountConvention = serde_json::from_str("\"Act365\"").unwrap();
            assert_eq!(dcc, DayCountConvention::ActualActual365);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn date_strategy() -> impl Strategy<Value = Date> {
            (2000i32..2100, 1u32..=12, 1u32..=28)
                .prop_map(|(y, m, d)| Date::from_ymd(y, m, d).unwrap())
        }

        proptest! {
            #[test]
            fn test_year_fraction_is_antisymmetric(a in date_strategy(), b in date_strategy()) {
                let dcc = DayCountConvention::ActualActual365;
                let forward = dcc.year_fraction_dates(a, b);
                let backward = dcc.year_fraction_dates(b, a);
                prop_assert!((forward + backward).abs() < 1e-12);
            }

            #[test]
            fn test_add_months_moves_forward(d in date_strategy(), months in 1u32..120) {
                let later = d.add_months(months).unwrap();
                prop_assert!(later > d);
            }
        }
    }
}
