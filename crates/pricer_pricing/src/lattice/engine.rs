//! Binomial pricing engine for vanilla options.
//!
//! The engine flattens the process to constant coefficients read at the
//! option's expiry (zero rates and Black volatility to the last exercise
//! date), fits a [`BinomialTree`] to them and rolls the option back to the
//! root. Delta and gamma are central differences over the nodes of steps 1
//! and 2; theta follows from the Black-Scholes PDE.

use std::sync::Arc;

use pricer_core::types::PricingError;
use pricer_models::instruments::{OptionResults, PricingEngine, VanillaOptionArguments};
use pricer_models::models::BlackScholesProcess;
use tracing::{debug, trace};

use super::black_scholes_lattice::BlackScholesLattice;
use super::config::{LatticeConfig, OscillationScheme};
use super::discretized::DiscretizedVanillaOption;
use super::error::LatticeError;
use super::tree::{BinomialTree, TreeParameters, TreeType};

/// Value, delta and gamma read off one tree.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TreeValuation {
    value: f64,
    delta: f64,
    gamma: f64,
}

impl TreeValuation {
    /// `2·fine − coarse`, applied to every field.
    fn extrapolate(&self, coarse: &TreeValuation) -> TreeValuation {
        TreeValuation {
            value: 2.0 * self.value - coarse.value,
            delta: 2.0 * self.delta - coarse.delta,
            gamma: 2.0 * self.gamma - coarse.gamma,
        }
    }
}

/// Binomial-tree engine for vanilla options with European, American or
/// Bermudan exercise.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{FlatCurve, FlatVol};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::instruments::{Exercise, OptionType, PlainVanillaPayoff, VanillaOption};
/// use pricer_models::models::BlackScholesProcess;
/// use pricer_pricing::lattice::{BinomialVanillaEngine, OscillationScheme, TreeType};
///
/// let today = Date::from_ymd(2021, 2, 24).unwrap();
/// let expiry = Date::from_ymd(2021, 5, 24).unwrap();
/// let dc = DayCountConvention::ActualActual365;
///
/// let process = Arc::new(
///     BlackScholesProcess::new(
///         36.0,
///         Arc::new(FlatCurve::new(today, 0.0125, dc)),
///         Arc::new(FlatVol::new(today, 0.20, dc)),
///     )
///     .unwrap(),
/// );
///
/// let mut option = VanillaOption::new(
///     PlainVanillaPayoff::new(OptionType::Put, 40.0).unwrap(),
///     Exercise::american(today, expiry).unwrap(),
/// );
///
/// let engine = BinomialVanillaEngine::new(
///     process,
///     TreeType::AdditiveEqp,
///     200,
///     OscillationScheme::BlackScholesSmoothing,
/// )
/// .unwrap();
/// option.set_pricing_engine(Arc::new(engine));
///
/// let npv = option.npv().unwrap();
/// assert!(npv > 4.0 && npv < 4.3);
/// ```
#[derive(Debug, Clone)]
pub struct BinomialVanillaEngine {
    process: Arc<BlackScholesProcess>,
    config: LatticeConfig,
}

impl BinomialVanillaEngine {
    /// Engine with `steps` time steps.
    ///
    /// # Errors
    /// `LatticeError::InsufficientSteps` below the scheme's minimum step count.
    pub fn new(
        process: Arc<BlackScholesProcess>,
        tree_type: TreeType,
        steps: usize,
        oscillation: OscillationScheme,
    ) -> Result<Self, LatticeError> {
        let config = LatticeConfig::builder()
            .steps(steps)
            .tree_type(tree_type)
            .oscillation(oscillation)
            .build()?;
        Ok(Self::with_config(process, config))
    }

    /// Engine selecting Black-Scholes smoothing with an on/off flag.
    pub fn with_oscillation_flag(
        process: Arc<BlackScholesProcess>,
        tree_type: TreeType,
        steps: usize,
        resolve_oscillations: bool,
    ) -> Result<Self, LatticeError> {
        Self::new(
            process,
            tree_type,
            steps,
            OscillationScheme::from_flag(resolve_oscillations),
        )
    }

    /// Engine from an already validated configuration.
    pub fn with_config(process: Arc<BlackScholesProcess>, config: LatticeConfig) -> Self {
        Self { process, config }
    }

    /// Lattice configuration.
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Process the engine prices against.
    pub fn process(&self) -> &Arc<BlackScholesProcess> {
        &self.process
    }

    fn value_on_tree(
        &self,
        args: &VanillaOptionArguments,
        steps: usize,
        smoothed: bool,
    ) -> Result<TreeValuation, PricingError> {
        let process = &self.process;
        let maturity = process.time_from_reference(args.exercise.last_date());
        if !(maturity > 0.0) {
            return Err(LatticeError::InvalidMaturity { maturity }.into());
        }

        let spot = process.spot();
        let strike = args.payoff.strike();
        let rate = process.risk_free_zero_rate(maturity)?;
        let dividend = process.dividend_rate(maturity)?;
        let volatility = process.black_vol(maturity, spot)?;

        let tree_type = self.config.tree_type();
        let steps = tree_type.effective_steps(steps);
        let params = TreeParameters {
            spot,
            rate,
            dividend,
            volatility,
            maturity,
        };
        trace!(?params, steps, %tree_type, "fitting binomial tree");

        let tree = BinomialTree::new(tree_type, &params, steps, strike)?;
        let lattice = BlackScholesLattice::new(tree, rate, maturity)?;

        let mut option = DiscretizedVanillaOption::new(args, process);
        if smoothed {
            option.initialize_smoothed(&lattice, rate, dividend, volatility)?;
        } else {
            option.initialize(&lattice);
        }

        option.rollback(&lattice, 2);
        let &[p2d, p2m, p2u] = option.values() else {
            return Err(layer_error(2, option.values().len()));
        };
        let (s2d, s2m, s2u) = (
            lattice.underlying(2, 0),
            lattice.underlying(2, 1),
            lattice.underlying(2, 2),
        );
        let delta2u = (p2u - p2m) / (s2u - s2m);
        let delta2d = (p2m - p2d) / (s2m - s2d);
        let gamma = (delta2u - delta2d) / ((s2u - s2d) / 2.0);

        option.rollback(&lattice, 1);
        let &[p1d, p1u] = option.values() else {
            return Err(layer_error(1, option.values().len()));
        };
        let delta = (p1u - p1d) / (lattice.underlying(1, 1) - lattice.underlying(1, 0));

        option.rollback(&lattice, 0);

        Ok(TreeValuation {
            value: option.present_value(),
            delta,
            gamma,
        })
    }

    /// `∂V/∂t` from the Black-Scholes PDE with today's coefficients.
    fn black_scholes_theta(&self, valuation: &TreeValuation) -> Result<f64, PricingError> {
        let spot = self.process.spot();
        let r = self.process.risk_free_zero_rate(0.0)?;
        let q = self.process.dividend_rate(0.0)?;
        let sigma = self.process.black_vol(0.0, spot)?;
        Ok(r * valuation.value
            - (r - q) * spot * valuation.delta
            - 0.5 * sigma * sigma * spot * spot * valuation.gamma)
    }
}

fn layer_error(step: usize, nodes: usize) -> PricingError {
    LatticeError::InvalidParameter {
        name: "steps",
        value: format!("step {} holds {} nodes", step, nodes),
    }
    .into()
}

impl PricingEngine for BinomialVanillaEngine {
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<OptionResults, PricingError> {
        let steps = self.config.steps();
        let valuation = match self.config.oscillation() {
            OscillationScheme::None => self.value_on_tree(args, steps, false)?,
            OscillationScheme::BlackScholesSmoothing => self.value_on_tree(args, steps, true)?,
            OscillationScheme::RichardsonSmoothing => {
                let fine = self.value_on_tree(args, steps, true)?;
                let coarse = self.value_on_tree(args, steps / 2, true)?;
                fine.extrapolate(&coarse)
            }
        };
        let theta = self.black_scholes_theta(&valuation)?;

        debug!(
            tree = %self.config.tree_type(),
            steps,
            oscillation = %self.config.oscillation(),
            npv = valuation.value,
            "binomial valuation"
        );

        Ok(OptionResults::from_value(valuation.value).with_greeks(
            valuation.delta,
            valuation.gamma,
            theta,
        ))
    }

    fn name(&self) -> &str {
        "BinomialVanillaEngine"
    }
}
