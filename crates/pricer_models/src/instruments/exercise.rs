//! Option exercise schedules.
//!
//! Exercise rights are expressed in dates; engines convert them to times
//! with the day count of the process they price against.

use pricer_core::types::Date;

use super::error::InstrumentError;

/// When an option may be exercised.
///
/// # Variants
/// - `European`: only at expiry
/// - `American`: at any time in `[earliest, latest]`
/// - `Bermudan`: on a discrete set of dates
///
/// # Examples
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::Exercise;
///
/// let today = Date::from_ymd(2021, 2, 24).unwrap();
/// let expiry = Date::from_ymd(2021, 5, 24).unwrap();
///
/// let american = Exercise::american(today, expiry).unwrap();
/// assert_eq!(american.last_date(), expiry);
/// assert!(american.allows_early_exercise());
///
/// assert!(Exercise::american(expiry, today).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exercise {
    /// Exercise only at expiry.
    European {
        /// Expiry date
        expiry: Date,
    },

    /// Exercise at any time within a window.
    American {
        /// First date on which exercise is allowed
        earliest: Date,
        /// Expiry date
        latest: Date,
    },

    /// Exercise on specific dates.
    Bermudan {
        /// Sorted, unique exercise dates; the last one is expiry
        dates: Vec<Date>,
    },
}

impl Exercise {
    /// European exercise at `expiry`.
    pub fn european(expiry: Date) -> Self {
        Exercise::European { expiry }
    }

    /// American exercise between `earliest` and `latest`, both included.
    ///
    /// # Errors
    /// `InstrumentError::InvalidExercise` if `earliest > latest`.
    pub fn american(earliest: Date, latest: Date) -> Result<Self, InstrumentError> {
        if earliest > latest {
            return Err(InstrumentError::InvalidExercise {
                message: format!(
                    "earliest exercise {} after latest exercise {}",
                    earliest, latest
                ),
            });
        }
        Ok(Exercise::American { earliest, latest })
    }

    /// Bermudan exercise on `dates`, which are sorted and deduplicated.
    ///
    /// # Errors
    /// `InstrumentError::InvalidExercise` if `dates` is empty.
    pub fn bermudan(mut dates: Vec<Date>) -> Result<Self, InstrumentError> {
        if dates.is_empty() {
            return Err(InstrumentError::InvalidExercise {
                message: "no bermudan exercise dates".to_string(),
            });
        }
        dates.sort();
        dates.dedup();
        Ok(Exercise::Bermudan { dates })
    }

    /// Expiry: the last date on which the option can be exercised.
    pub fn last_date(&self) -> Date {
        match self {
            Exercise::European { expiry } => *expiry,
            Exercise::American { latest, .. } => *latest,
            // non-empty by construction
            Exercise::Bermudan { dates } => dates[dates.len() - 1],
        }
    }

    /// True unless the option is European.
    pub fn allows_early_exercise(&self) -> bool {
        !matches!(self, Exercise::European { .. })
    }

    /// Short name of the exercise style.
    pub fn style(&self) -> &'static str {
        match self {
            Exercise::European { .. } => "European",
            Exercise::American { .. } => "American",
            Exercise::Bermudan { .. } => "Bermudan",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_european() {
        let ex = Exercise::european(date(2021, 5, 24));
        assert_eq!(ex.last_date(), date(2021, 5, 24));
        assert!(!ex.allows_early_exercise());
        assert_eq!(ex.style(), "European");
    }

    #[test]
    fn test_american_window() {
        let ex = Exercise::american(date(2021, 2, 24), date(2021, 5, 24)).unwrap();
        assert_eq!(ex.last_date(), date(2021, 5, 24));
        assert!(ex.allows_early_exercise());
        assert_eq!(ex.style(), "American");
    }

    #[test]
    fn test_american_same_day_window_allowed() {
        assert!(Exercise::american(date(2021, 5, 24), date(2021, 5, 24)).is_ok());
    }

    #[test]
    fn test_american_inverted_window_rejected() {
        let err = Exercise::american(date(2021, 5, 24), date(2021, 2, 24)).unwrap_err();
        assert!(matches!(err, InstrumentError::InvalidExercise { .. }));
    }

    #[test]
    fn test_bermudan_sorts_and_dedups() {
        let ex = Exercise::bermudan(vec![
            date(2021, 5, 24),
            date(2021, 3, 24),
            date(2021, 5, 24),
        ])
        .unwrap();
        assert_eq!(
            ex,
            Exercise::Bermudan {
                dates: vec![date(2021, 3, 24), date(2021, 5, 24)]
            }
        );
        assert_eq!(ex.last_date(), date(2021, 5, 24));
    }

    #[test]
    fn test_bermudan_empty_rejected() {
        assert!(Exercise::bermudan(vec![]).is_err());
    }
}
