//! Evenly spaced time grid.

use std::ops::Index;

use super::error::LatticeError;

/// Relative tolerance used to decide whether a time sits on a grid point.
const ON_GRID_TOLERANCE: f64 = 1e-10;

/// Grid `t_i = i·T/n` for `i = 0..=n`.
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::TimeGrid;
///
/// let grid = TimeGrid::new(1.0, 4).unwrap();
/// assert_eq!(grid.len(), 5);
/// assert_eq!(grid[2], 0.5);
/// assert_eq!(grid.index(0.75).unwrap(), 3);
/// assert!(grid.index(0.6).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
    dt: f64,
}

impl TimeGrid {
    /// Build a grid over `[0, end]` with `steps` intervals.
    ///
    /// # Errors
    /// - `LatticeError::InvalidMaturity` if `end` is not positive and finite
    /// - `LatticeError::InsufficientSteps` if `steps` is zero
    pub fn new(end: f64, steps: usize) -> Result<Self, LatticeError> {
        if !(end.is_finite() && end > 0.0) {
            return Err(LatticeError::InvalidMaturity { maturity: end });
        }
        if steps == 0 {
            return Err(LatticeError::InsufficientSteps { steps, minimum: 1 });
        }
        let dt = end / steps as f64;
        let mut times: Vec<f64> = (0..=steps).map(|i| i as f64 * dt).collect();
        // pin the last point so it compares equal to `end`
        times[steps] = end;
        Ok(Self { times, dt })
    }

    /// Number of grid points (`steps + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: a grid has at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of intervals.
    #[inline]
    pub fn steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Interval length.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Last grid time.
    #[inline]
    pub fn end(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// All grid times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Index of the grid point nearest to `t`, clamped to the grid.
    pub fn closest_index(&self, t: f64) -> usize {
        let raw = (t / self.dt).round();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.steps())
        }
    }

    /// Index of the grid point equal to `t` up to rounding.
    ///
    /// # Errors
    /// `LatticeError::TimeNotOnGrid` when `t` falls between grid points.
    pub fn index(&self, t: f64) -> Result<usize, LatticeError> {
        let i = self.closest_index(t);
        if close_enough(self.times[i], t, self.end()) {
            Ok(i)
        } else {
            Err(LatticeError::TimeNotOnGrid {
                time: t,
                end: self.end(),
            })
        }
    }

    /// Whether grid point `i` is the nearest grid point to `t`.
    pub fn is_on_time(&self, t: f64, i: usize) -> bool {
        self.closest_index(t) == i
    }
}

fn close_enough(a: f64, b: f64, scale: f64) -> bool {
    (a - b).abs() <= ON_GRID_TOLERANCE * scale.max(1.0)
}

impl Index<usize> for TimeGrid {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.times[i]
    }
}
