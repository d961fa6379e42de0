//! Vanilla option values on a binomial lattice.

use pricer_core::types::PricingError;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{Exercise, PlainVanillaPayoff, VanillaOptionArguments};
use pricer_models::models::BlackScholesProcess;

use super::black_scholes_lattice::BlackScholesLattice;

/// Slack when comparing grid times with the exercise window.
const TIME_TOLERANCE: f64 = 1e-12;

/// Exercise rights expressed in years from the valuation date.
#[derive(Debug, Clone, PartialEq)]
enum ExerciseTimes {
    /// Any time in `[earliest, latest]`.
    Window { earliest: f64, latest: f64 },
    /// Only on these times, each snapped to its nearest grid point.
    Discrete(Vec<f64>),
}

/// Option values at one step of a lattice, rolled back towards the root.
///
/// The option starts at the last step (or one step earlier when smoothed)
/// and is rolled back one step at a time. After every step the exercise
/// condition `V = max(V, payoff(S))` is applied wherever the exercise rights
/// allow it.
#[derive(Debug, Clone)]
pub struct DiscretizedVanillaOption {
    payoff: PlainVanillaPayoff,
    exercise: ExerciseTimes,
    step: usize,
    values: Vec<f64>,
}

impl DiscretizedVanillaOption {
    /// Prepare `args` for valuation against `process`.
    ///
    /// Exercise dates before the valuation date are dropped; an American
    /// window that opened in the past is exercisable from now on.
    pub fn new(args: &VanillaOptionArguments, process: &BlackScholesProcess) -> Self {
        let exercise = match &args.exercise {
            Exercise::European { expiry } => {
                ExerciseTimes::Discrete(vec![process.time_from_reference(*expiry)])
            }
            Exercise::American { earliest, latest } => ExerciseTimes::Window {
                earliest: process.time_from_reference(*earliest).max(0.0),
                latest: process.time_from_reference(*latest),
            },
            Exercise::Bermudan { dates } => ExerciseTimes::Discrete(
                dates
                    .iter()
                    .map(|d| process.time_from_reference(*d))
                    .filter(|t| *t >= 0.0)
                    .collect(),
            ),
        };
        Self {
            payoff: args.payoff,
            exercise,
            step: 0,
            values: Vec::new(),
        }
    }

    /// Current step index.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Values at the current step, one per node.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at the root once rolled back to step 0.
    #[inline]
    pub fn present_value(&self) -> f64 {
        self.values[0]
    }

    /// Start from the payoff at the last step.
    pub fn initialize(&mut self, lattice: &BlackScholesLattice) {
        let last = lattice.time_grid().steps();
        self.step = last;
        self.values = vec![0.0; lattice.size(last)];
        self.adjust_values(lattice);
    }

    /// Start one step before expiry from the Black-Scholes value over the
    /// final interval.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for a non-positive volatility.
    pub fn initialize_smoothed(
        &mut self,
        lattice: &BlackScholesLattice,
        rate: f64,
        dividend: f64,
        volatility: f64,
    ) -> Result<(), PricingError> {
        let grid = lattice.time_grid();
        let step = grid.steps() - 1;
        let remaining = grid.end() - grid[step];
        let option_type = self.payoff.option_type();
        let strike = self.payoff.strike();

        self.values = lattice
            .grid_values(step)
            .into_iter()
            .map(|spot| -> Result<f64, PricingError> {
                let model =
                    BlackScholes::new(spot, rate, volatility)?.with_dividend_yield(dividend);
                Ok(model.price(option_type, strike, remaining))
            })
            .collect::<Result<_, PricingError>>()?;
        self.step = step;
        self.adjust_values(lattice);
        Ok(())
    }

    /// Roll back to step `to`, applying the exercise condition on the way.
    pub fn rollback(&mut self, lattice: &BlackScholesLattice, to: usize) {
        debug_assert!(to <= self.step);
        for i in (to..self.step).rev() {
            self.values = lattice.stepback(i, &self.values);
            self.step = i;
            self.adjust_values(lattice);
        }
    }

    fn adjust_values(&mut self, lattice: &BlackScholesLattice) {
        if !self.can_exercise(lattice) {
            return;
        }
        for (j, value) in self.values.iter_mut().enumerate() {
            let exercise = self.payoff.value(lattice.underlying(self.step, j));
            *value = value.max(exercise);
        }
    }

    fn can_exercise(&self, lattice: &BlackScholesLattice) -> bool {
        let grid = lattice.time_grid();
        match &self.exercise {
            ExerciseTimes::Window { earliest, latest } => {
                let now = grid[self.step];
                now >= earliest - TIME_TOLERANCE && now <= latest + TIME_TOLERANCE
            }
            ExerciseTimes::Discrete(times) => {
                times.iter().any(|t| grid.is_on_time(*t, self.step))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::tree::{BinomialTree, TreeParameters, TreeType};
    use approx::assert_relative_eq;
    use pricer_core::market_data::{FlatCurve, FlatVol};
    use pricer_core::types::{Date, DayCountConvention};
    use pricer_models::instruments::OptionType;
    use std::sync::Arc;

    const DC: DayCountConvention = DayCountConvention::ActualActual365;

    fn today() -> Date {
        Date::from_ymd(2021, 2, 24).unwrap()
    }

    fn expiry() -> Date {
        // 365 days: maturity of exactly one year
        Date::from_ymd(2022, 2, 24).unwrap()
    }

    fn process() -> BlackScholesProcess {
        BlackScholesProcess::new(
            100.0,
            Arc::new(FlatCurve::new(today(), 0.05, DC)),
            Arc::new(FlatVol::new(today(), 0.2, DC)),
        )
        .unwrap()
    }

    fn lattice(steps: usize) -> BlackScholesLattice {
        let params = TreeParameters {
            spot: 100.0,
            rate: 0.05,
            dividend: 0.0,
            volatility: 0.2,
            maturity: 1.0,
        };
        let tree = BinomialTree::new(TreeType::CoxRossRubinstein, &params, steps, 100.0).unwrap();
        BlackScholesLattice::new(tree, 0.05, 1.0).unwrap()
    }

    fn args(exercise: Exercise) -> VanillaOptionArguments {
        VanillaOptionArguments {
            payoff: PlainVanillaPayoff::new(OptionType::Put, 100.0).unwrap(),
            exercise,
        }
    }

    fn roll_to_root(exercise: Exercise, steps: usize) -> f64 {
        let lattice = lattice(steps);
        let mut option = DiscretizedVanillaOption::new(&args(exercise), &process());
        option.initialize(&lattice);
        option.rollback(&lattice, 0);
        option.present_value()
    }

    #[test]
    fn test_initialize_sets_payoff_at_expiry() {
        let lattice = lattice(4);
        let mut option =
            DiscretizedVanillaOption::new(&args(Exercise::european(expiry())), &process());
        option.initialize(&lattice);
        assert_eq!(option.step(), 4);
        for (j, v) in option.values().iter().enumerate() {
            assert_eq!(*v, (100.0 - lattice.underlying(4, j)).max(0.0));
        }
    }

    #[test]
    fn test_european_put_close_to_black_scholes() {
        let tree_value = roll_to_root(Exercise::european(expiry()), 400);
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap().price_put(100.0, 1.0);
        assert_relative_eq!(tree_value, bs, epsilon = 1e-2);
    }

    #[test]
    fn test_exercise_styles_ordered() {
        let european = roll_to_root(Exercise::european(expiry()), 200);
        let bermudan = roll_to_root(
            Exercise::bermudan(vec![Date::from_ymd(2021, 8, 24).unwrap(), expiry()]).unwrap(),
            200,
        );
        let american = roll_to_root(Exercise::american(today(), expiry()).unwrap(), 200);
        assert!(european < bermudan, "{} !< {}", european, bermudan);
        assert!(bermudan < american, "{} !< {}", bermudan, american);
    }

    #[test]
    fn test_american_window_opened_in_the_past() {
        let past = Date::from_ymd(2020, 1, 1).unwrap();
        let from_past = roll_to_root(Exercise::american(past, expiry()).unwrap(), 100);
        let from_today = roll_to_root(Exercise::american(today(), expiry()).unwrap(), 100);
        assert_eq!(from_past, from_today);
    }

    #[test]
    fn test_partial_rollback_sizes() {
        let lattice = lattice(10);
        let exercise = Exercise::american(today(), expiry()).unwrap();
        let mut option = DiscretizedVanillaOption::new(&args(exercise), &process());
        option.initialize(&lattice);
        option.rollback(&lattice, 2);
        assert_eq!(option.step(), 2);
        assert_eq!(option.values().len(), 3);
        // never below intrinsic inside the exercise window
        for (j, v) in option.values().iter().enumerate() {
            assert!(*v >= (100.0 - lattice.underlying(2, j)).max(0.0));
        }
    }

    #[test]
    fn test_smoothed_initialization() {
        let lattice = lattice(10);
        let mut option =
            DiscretizedVanillaOption::new(&args(Exercise::european(expiry())), &process());
        option.initialize_smoothed(&lattice, 0.05, 0.0, 0.2).unwrap();
        assert_eq!(option.step(), 9);
        assert_eq!(option.values().len(), 10);

        let dt = lattice.time_grid().dt();
        let spot = lattice.underlying(9, 4);
        let expected = BlackScholes::new(spot, 0.05, 0.2).unwrap().price_put(100.0, dt);
        assert_relative_eq!(option.values()[4], expected, max_relative = 1e-12);
    }

    #[test]
    fn test_smoothed_initialization_rejects_zero_vol() {
        let lattice = lattice(10);
        let mut option =
            DiscretizedVanillaOption::new(&args(Exercise::european(expiry())), &process());
        assert!(matches!(
            option.initialize_smoothed(&lattice, 0.05, 0.0, 0.0),
            Err(PricingError::InvalidInput(_))
        ));
    }
}
