//! Recombining binomial trees for the lognormal spot.
//!
//! Every supported tree places node `(i, j)` (step `i`, `j` up-moves) at
//! ```text
//! S(i, j) = S₀ · exp(i·a + (2j − i)·b)
//! ```
//! and uses the same up-probability `p` at every node, so a tree is fully
//! described by `(a, b, p)`. The tree types differ only in how these are
//! matched to the risk-neutral moments of `ln S` over one step.

use std::fmt;
use std::str::FromStr;

use super::error::LatticeError;

/// Construction policy of a binomial tree.
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::TreeType;
///
/// assert_eq!(TreeType::default(), TreeType::AdditiveEqp);
/// assert_eq!("crr".parse::<TreeType>().unwrap(), TreeType::CoxRossRubinstein);
/// assert_eq!(TreeType::LeisenReimer.to_string(), "leisen-reimer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TreeType {
    /// Additive equal-probabilities tree: `p = ½`, jump matched to the
    /// step variance of `ln S` including the squared drift.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "eqp"))]
    AdditiveEqp,
    /// Jarrow-Rudd equal-probabilities tree: `p = ½`, jump `σ√dt`.
    #[cfg_attr(feature = "serde", serde(alias = "jr"))]
    JarrowRudd,
    /// Cox-Ross-Rubinstein equal-jumps tree.
    #[cfg_attr(feature = "serde", serde(alias = "crr"))]
    CoxRossRubinstein,
    /// Trigeorgis equal-jumps tree.
    Trigeorgis,
    /// Tian third-moment-matching tree.
    Tian,
    /// Leisen-Reimer tree centred on the strike; odd step counts only.
    #[cfg_attr(feature = "serde", serde(alias = "lr"))]
    LeisenReimer,
}

impl TreeType {
    /// All tree types.
    pub const ALL: [TreeType; 6] = [
        TreeType::AdditiveEqp,
        TreeType::JarrowRudd,
        TreeType::CoxRossRubinstein,
        TreeType::Trigeorgis,
        TreeType::Tian,
        TreeType::LeisenReimer,
    ];

    /// Canonical kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            TreeType::AdditiveEqp => "additive-eqp",
            TreeType::JarrowRudd => "jarrow-rudd",
            TreeType::CoxRossRubinstein => "cox-ross-rubinstein",
            TreeType::Trigeorgis => "trigeorgis",
            TreeType::Tian => "tian",
            TreeType::LeisenReimer => "leisen-reimer",
        }
    }

    /// Step count actually used for a requested count.
    ///
    /// Leisen-Reimer trees need an odd number of steps and round up.
    pub fn effective_steps(&self, steps: usize) -> usize {
        match self {
            TreeType::LeisenReimer if steps % 2 == 0 => steps + 1,
            _ => steps,
        }
    }
}

impl fmt::Display for TreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeType {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "additive-eqp" | "eqp" | "additiveeqp" => Ok(TreeType::AdditiveEqp),
            "jarrow-rudd" | "jr" | "jarrowrudd" => Ok(TreeType::JarrowRudd),
            "cox-ross-rubinstein" | "crr" | "coxrossrubinstein" => {
                Ok(TreeType::CoxRossRubinstein)
            }
            "trigeorgis" => Ok(TreeType::Trigeorgis),
            "tian" => Ok(TreeType::Tian),
            "leisen-reimer" | "lr" | "leisenreimer" => Ok(TreeType::LeisenReimer),
            _ => Err(LatticeError::InvalidParameter {
                name: "tree",
                value: format!("unknown tree type '{}'", s),
            }),
        }
    }
}

/// Constant coefficients a tree is fitted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParameters {
    /// Spot `S₀`
    pub spot: f64,
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Continuous dividend yield
    pub dividend: f64,
    /// Black volatility
    pub volatility: f64,
    /// Tree horizon in years
    pub maturity: f64,
}

impl TreeParameters {
    fn validate(&self) -> Result<(), LatticeError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(LatticeError::InvalidParameter {
                name: "spot",
                value: format!("{} must be positive", self.spot),
            });
        }
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            return Err(LatticeError::InvalidParameter {
                name: "volatility",
                value: format!("{} must be positive", self.volatility),
            });
        }
        if !(self.rate.is_finite() && self.dividend.is_finite()) {
            return Err(LatticeError::InvalidParameter {
                name: "rate",
                value: format!("r = {}, q = {} must be finite", self.rate, self.dividend),
            });
        }
        if !(self.maturity.is_finite() && self.maturity > 0.0) {
            return Err(LatticeError::InvalidMaturity {
                maturity: self.maturity,
            });
        }
        Ok(())
    }
}

/// Recombining binomial tree with constant coefficients.
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::{BinomialTree, TreeParameters, TreeType};
///
/// let params = TreeParameters {
///     spot: 36.0,
///     rate: 0.0125,
///     dividend: 0.0,
///     volatility: 0.2,
///     maturity: 0.25,
/// };
/// let tree = BinomialTree::new(TreeType::AdditiveEqp, &params, 100, 40.0).unwrap();
///
/// assert_eq!(tree.size(3), 4);
/// assert_eq!(tree.probability_up(), 0.5);
/// assert_eq!(tree.underlying(0, 0), 36.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialTree {
    tree_type: TreeType,
    spot: f64,
    steps: usize,
    dt: f64,
    drift: f64,
    jump: f64,
    p_up: f64,
}

impl BinomialTree {
    /// Fit a tree of `steps` steps over `params.maturity`.
    ///
    /// `strike` is only used by the Leisen-Reimer tree.
    ///
    /// # Errors
    /// - `LatticeError::InsufficientSteps` for zero steps
    /// - `LatticeError::InvalidParameter` for invalid coefficients, or an
    ///   even step count with a Leisen-Reimer tree
    /// - `LatticeError::NegativeProbability` if the fitted probability
    ///   leaves `[0, 1]`
    pub fn new(
        tree_type: TreeType,
        params: &TreeParameters,
        steps: usize,
        strike: f64,
    ) -> Result<Self, LatticeError> {
        if steps == 0 {
            return Err(LatticeError::InsufficientSteps { steps, minimum: 1 });
        }
        params.validate()?;

        let n = steps as f64;
        let dt = params.maturity / n;
        let sigma = params.volatility;
        let variance = sigma * sigma * dt;
        // drift of ln S per step
        let mu = (params.rate - params.dividend - 0.5 * sigma * sigma) * dt;

        let (drift, jump, p_up) = match tree_type {
            TreeType::AdditiveEqp => {
                let discriminant = 4.0 * variance - 3.0 * mu * mu;
                if discriminant < 0.0 {
                    return Err(LatticeError::InvalidParameter {
                        name: "volatility",
                        value: format!("{} too small for the drift of an additive EQP tree", sigma),
                    });
                }
                (mu, -0.5 * mu + 0.5 * discriminant.sqrt(), 0.5)
            }
            TreeType::JarrowRudd => (mu, variance.sqrt(), 0.5),
            TreeType::CoxRossRubinstein => {
                let dx = variance.sqrt();
                (0.0, dx, 0.5 + 0.5 * mu / dx)
            }
            TreeType::Trigeorgis => {
                let dx = (variance + mu * mu).sqrt();
                (0.0, dx, 0.5 + 0.5 * mu / dx)
            }
            TreeType::Tian => {
                let q = variance.exp();
                let r = mu.exp() * q.sqrt();
                let root = (q * q + 2.0 * q - 3.0).sqrt();
                let up = 0.5 * r * q * (q + 1.0 + root);
                let down = 0.5 * r * q * (q + 1.0 - root);
                from_factors(up, down, (r - down) / (up - down))
            }
            TreeType::LeisenReimer => {
                if steps % 2 == 0 {
                    return Err(LatticeError::InvalidParameter {
                        name: "steps",
                        value: format!("Leisen-Reimer tree needs an odd step count, got {}", steps),
                    });
                }
                if !(strike.is_finite() && strike > 0.0) {
                    return Err(LatticeError::InvalidParameter {
                        name: "strike",
                        value: format!("{} must be positive", strike),
                    });
                }
                let total_variance = sigma * sigma * params.maturity;
                let growth = (mu + 0.5 * total_variance / n).exp();
                let d2 = ((params.spot / strike).ln() + mu * n) / total_variance.sqrt();
                let p = peizer_pratt_inversion(d2, steps);
                let p_dash = peizer_pratt_inversion(d2 + total_variance.sqrt(), steps);
                let up = growth * p_dash / p;
                let down = (growth - p * up) / (1.0 - p);
                from_factors(up, down, p)
            }
        };

        if !(0.0..=1.0).contains(&p_up) {
            return Err(LatticeError::NegativeProbability {
                tree: tree_type.name(),
                probability: p_up,
            });
        }

        Ok(Self {
            tree_type,
            spot: params.spot,
            steps,
            dt,
            drift,
            jump,
            p_up,
        })
    }

    /// Construction policy.
    #[inline]
    pub fn tree_type(&self) -> TreeType {
        self.tree_type
    }

    /// Number of time steps (columns − 1).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step length in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of nodes at step `i`.
    #[inline]
    pub fn size(&self, i: usize) -> usize {
        i + 1
    }

    /// Node reached from `(i, j)` along `branch` (0 = down, 1 = up).
    #[inline]
    pub fn descendant(&self, _i: usize, j: usize, branch: usize) -> usize {
        j + branch
    }

    /// Spot at node `(i, j)`.
    #[inline]
    pub fn underlying(&self, i: usize, j: usize) -> f64 {
        let moves = 2.0 * j as f64 - i as f64;
        self.spot * (i as f64 * self.drift + moves * self.jump).exp()
    }

    /// Up-branch probability, identical at every node.
    #[inline]
    pub fn probability_up(&self) -> f64 {
        self.p_up
    }

    /// Probability of `branch` (0 = down, 1 = up).
    #[inline]
    pub fn probability(&self, branch: usize) -> f64 {
        if branch == 1 {
            self.p_up
        } else {
            1.0 - self.p_up
        }
    }
}

/// `(a, b, p)` from multiplicative up/down factors.
fn from_factors(up: f64, down: f64, p: f64) -> (f64, f64, f64) {
    let (ln_u, ln_d) = (up.ln(), down.ln());
    (0.5 * (ln_u + ln_d), 0.5 * (ln_u - ln_d), p)
}

/// Peizer-Pratt method 2 inversion of the normal CDF onto a binomial.
fn peizer_pratt_inversion(z: f64, n: usize) -> f64 {
    let n = n as f64;
    let mut x = z / (n + 1.0 / 3.0 + 0.1 / (n + 1.0));
    x *= x;
    x = (-x * (n + 1.0 / 6.0)).exp();
    0.5 + z.signum() * (0.25 * (1.0 - x)).sqrt()
}
