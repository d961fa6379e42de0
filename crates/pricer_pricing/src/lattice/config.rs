//! Binomial lattice configuration.
//!
//! This module provides the oscillation-handling policy and the validated
//! configuration a [`BinomialVanillaEngine`](super::BinomialVanillaEngine)
//! is built from.

use std::fmt;
use std::str::FromStr;

use super::error::LatticeError;
use super::tree::TreeType;

/// Maximum number of time steps allowed.
pub const MAX_STEPS: usize = 100_000;

/// How the engine deals with the odd/even oscillation of binomial prices.
///
/// Plain binomial prices zig-zag as the step count grows because the strike
/// falls at a different place relative to the terminal nodes. Replacing the
/// last step by the Black-Scholes value removes most of it.
///
/// # Schemes
///
/// - `None`: plain backward induction from the terminal payoff
/// - `BlackScholesSmoothing`: one step before expiry each node takes the
///   European Black-Scholes value over the final interval, floored at the
///   exercise value when early exercise is allowed
/// - `RichardsonSmoothing`: smoothed values extrapolated as
///   `2·V(n) − V(n/2)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OscillationScheme {
    /// Plain backward induction.
    #[default]
    None,
    /// Black-Scholes value on the last step.
    #[cfg_attr(feature = "serde", serde(alias = "bbs"))]
    BlackScholesSmoothing,
    /// Black-Scholes smoothing with Richardson extrapolation.
    #[cfg_attr(feature = "serde", serde(alias = "bbsr"))]
    RichardsonSmoothing,
}

impl OscillationScheme {
    /// Scheme selected by an on/off oscillation-resolution flag.
    ///
    /// # Examples
    /// ```
    /// use pricer_pricing::lattice::OscillationScheme;
    ///
    /// assert_eq!(OscillationScheme::from_flag(true), OscillationScheme::BlackScholesSmoothing);
    /// assert_eq!(OscillationScheme::from_flag(false), OscillationScheme::None);
    /// ```
    pub fn from_flag(resolve_oscillations: bool) -> Self {
        if resolve_oscillations {
            OscillationScheme::BlackScholesSmoothing
        } else {
            OscillationScheme::None
        }
    }

    /// Whether the last step is valued analytically.
    pub fn is_smoothed(&self) -> bool {
        !matches!(self, OscillationScheme::None)
    }

    /// Smallest step count the scheme can value with Greeks.
    ///
    /// Greeks read the tree at steps 1 and 2, which must lie before the
    /// analytically valued step when smoothing.
    pub fn min_steps(&self) -> usize {
        match self {
            OscillationScheme::None => 2,
            OscillationScheme::BlackScholesSmoothing => 3,
            OscillationScheme::RichardsonSmoothing => 6,
        }
    }

    /// Canonical kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            OscillationScheme::None => "none",
            OscillationScheme::BlackScholesSmoothing => "black-scholes-smoothing",
            OscillationScheme::RichardsonSmoothing => "richardson-smoothing",
        }
    }
}

impl fmt::Display for OscillationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OscillationScheme {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "none" | "plain" | "off" => Ok(OscillationScheme::None),
            "black-scholes-smoothing" | "bbs" | "smooth" | "on" => {
                Ok(OscillationScheme::BlackScholesSmoothing)
            }
            "richardson-smoothing" | "bbsr" | "richardson" => {
                Ok(OscillationScheme::RichardsonSmoothing)
            }
            _ => Err(LatticeError::InvalidParameter {
                name: "oscillation",
                value: format!("unknown oscillation scheme '{}'", s),
            }),
        }
    }
}

/// Binomial lattice configuration.
///
/// Immutable configuration specifying the lattice resolution and policies.
/// Use [`LatticeConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::{LatticeConfig, OscillationScheme, TreeType};
///
/// let config = LatticeConfig::builder()
///     .steps(250)
///     .tree_type(TreeType::AdditiveEqp)
///     .oscillation(OscillationScheme::BlackScholesSmoothing)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.steps(), 250);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeConfig {
    steps: usize,
    tree_type: TreeType,
    oscillation: OscillationScheme,
}

impl LatticeConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LatticeConfigBuilder {
        LatticeConfigBuilder::default()
    }

    /// Requested number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Tree construction policy.
    #[inline]
    pub fn tree_type(&self) -> TreeType {
        self.tree_type
    }

    /// Oscillation-handling scheme.
    #[inline]
    pub fn oscillation(&self) -> OscillationScheme {
        self.oscillation
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `LatticeError::InsufficientSteps` below the scheme's minimum
    /// - `LatticeError::InvalidParameter` above [`MAX_STEPS`]
    pub fn validate(&self) -> Result<(), LatticeError> {
        let minimum = self.oscillation.min_steps();
        if self.steps < minimum {
            return Err(LatticeError::InsufficientSteps {
                steps: self.steps,
                minimum,
            });
        }
        if self.steps > MAX_STEPS {
            return Err(LatticeError::InvalidParameter {
                name: "steps",
                value: format!("{} exceeds the maximum of {}", self.steps, MAX_STEPS),
            });
        }
        Ok(())
    }
}

/// Builder for [`LatticeConfig`].
#[derive(Clone, Debug, Default)]
pub struct LatticeConfigBuilder {
    steps: Option<usize>,
    tree_type: TreeType,
    oscillation: OscillationScheme,
}

impl LatticeConfigBuilder {
    /// Sets the number of time steps.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the tree construction policy.
    #[inline]
    pub fn tree_type(mut self, tree_type: TreeType) -> Self {
        self.tree_type = tree_type;
        self
    }

    /// Sets the oscillation-handling scheme.
    #[inline]
    pub fn oscillation(mut self, oscillation: OscillationScheme) -> Self {
        self.oscillation = oscillation;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// `LatticeError` if `steps` is not set or is out of range for the scheme.
    pub fn build(self) -> Result<LatticeConfig, LatticeError> {
        let steps = self.steps.ok_or(LatticeError::InvalidParameter {
            name: "steps",
            value: "must be specified".to_string(),
        })?;

        let config = LatticeConfig {
            steps,
            tree_type: self.tree_type,
            oscillation: self.oscillation,
        };

        config.validate()?;
        Ok(config)
    }
}
