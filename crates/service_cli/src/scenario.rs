//! Market scenario for the sweep.
//!
//! A [`ScenarioConfig`] describes the evaluation date, the option terms and
//! the curve pillars; [`ScenarioConfig::build`] turns it into a
//! [`MarketScenario`] holding the term structures and the Black-Scholes
//! process every engine prices against.

use std::sync::Arc;

use pricer_core::market_data::{BlackVarianceCurve, FlatCurve, ZeroCurve};
use pricer_core::types::{Date, DayCountConvention};
use pricer_models::instruments::{Exercise, OptionType, PlainVanillaPayoff, VanillaOption};
use pricer_models::models::BlackScholesProcess;
use serde::Deserialize;
use tracing::debug;

use crate::{CliError, Result};

/// A curve pillar `months` after the evaluation date.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Pillar {
    /// Tenor in months
    pub months: u32,
    /// Quote at the pillar (zero rate or Black volatility)
    pub value: f64,
}

impl Pillar {
    /// Pillar at `months` quoting `value`
    pub const fn new(months: u32, value: f64) -> Self {
        Self { months, value }
    }
}

/// Scenario description
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Evaluation date (YYYY-MM-DD)
    pub evaluation_date: String,

    /// Option expiry (YYYY-MM-DD)
    pub maturity: String,

    /// Call or put
    pub option_type: OptionType,

    /// Strike price
    pub strike: f64,

    /// Spot price of the underlying
    pub spot: f64,

    /// Continuous dividend yield
    pub dividend_yield: f64,

    /// Day count convention name (e.g. "Actual/365")
    pub day_count: String,

    /// Zero-rate pillars; the first must sit on the evaluation date
    pub rates: Vec<Pillar>,

    /// Black volatility pillars
    pub volatilities: Vec<Pillar>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            evaluation_date: "2021-02-24".to_string(),
            maturity: "2021-05-24".to_string(),
            option_type: OptionType::Put,
            strike: 40.0,
            spot: 36.0,
            dividend_yield: 0.0,
            day_count: "Actual/365".to_string(),
            rates: vec![Pillar::new(0, 0.01), Pillar::new(6, 0.015)],
            volatilities: vec![Pillar::new(3, 0.20), Pillar::new(6, 0.25)],
        }
    }
}

impl ScenarioConfig {
    /// Build the term structures and the process.
    ///
    /// # Errors
    /// - `CliError::Date` for unparsable dates
    /// - `CliError::InvalidArgument` for an unknown day count
    /// - `CliError::MarketData` for pillars the curves reject
    /// - `CliError::Instrument` for a non-positive strike
    pub fn build(&self) -> Result<MarketScenario> {
        let evaluation_date = Date::parse(&self.evaluation_date)?;
        let maturity = Date::parse(&self.maturity)?;
        let day_count: DayCountConvention =
            self.day_count.parse().map_err(CliError::InvalidArgument)?;
        let payoff = PlainVanillaPayoff::new(self.option_type, self.strike)?;

        let (rate_dates, rate_values) = pillar_dates(evaluation_date, &self.rates)?;
        let rates = Arc::new(ZeroCurve::new(
            evaluation_date,
            &rate_dates,
            &rate_values,
            day_count,
        )?);

        let (vol_dates, vol_values) = pillar_dates(evaluation_date, &self.volatilities)?;
        let volatility = Arc::new(BlackVarianceCurve::new(
            evaluation_date,
            &vol_dates,
            &vol_values,
            day_count,
        )?);

        let dividends = Arc::new(FlatCurve::new(evaluation_date, self.dividend_yield, day_count));
        let process = Arc::new(BlackScholesProcess::with_dividend(
            self.spot,
            rates.clone(),
            dividends,
            volatility.clone(),
        )?);

        debug!(
            %evaluation_date,
            %maturity,
            spot = self.spot,
            strike = self.strike,
            "scenario built"
        );

        Ok(MarketScenario {
            evaluation_date,
            maturity,
            payoff,
            rates,
            volatility,
            process,
        })
    }
}

fn pillar_dates(evaluation_date: Date, pillars: &[Pillar]) -> Result<(Vec<Date>, Vec<f64>)> {
    let dates = pillars
        .iter()
        .map(|p| evaluation_date.add_months(p.months))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((dates, pillars.iter().map(|p| p.value).collect()))
}

/// Immutable market state and option terms shared by every sweep point.
#[derive(Debug, Clone)]
pub struct MarketScenario {
    evaluation_date: Date,
    maturity: Date,
    payoff: PlainVanillaPayoff,
    rates: Arc<ZeroCurve>,
    volatility: Arc<BlackVarianceCurve>,
    process: Arc<BlackScholesProcess>,
}

impl MarketScenario {
    /// Reference date of every term structure.
    pub fn evaluation_date(&self) -> Date {
        self.evaluation_date
    }

    /// Option expiry.
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Option payoff.
    pub fn payoff(&self) -> PlainVanillaPayoff {
        self.payoff
    }

    /// Risk-free zero curve.
    pub fn rates(&self) -> &Arc<ZeroCurve> {
        &self.rates
    }

    /// Black variance curve.
    pub fn volatility(&self) -> &Arc<BlackVarianceCurve> {
        &self.volatility
    }

    /// Process handed to the engines.
    pub fn process(&self) -> &Arc<BlackScholesProcess> {
        &self.process
    }

    /// Option exercisable any time from the evaluation date to maturity.
    pub fn american_option(&self) -> Result<VanillaOption> {
        let exercise = Exercise::american(self.evaluation_date, self.maturity)?;
        Ok(VanillaOption::new(self.payoff, exercise))
    }

    /// The same contract exercisable only at maturity.
    pub fn european_option(&self) -> VanillaOption {
        VanillaOption::new(self.payoff, Exercise::european(self.maturity))
    }
}
