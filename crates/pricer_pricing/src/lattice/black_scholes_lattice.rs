//! Binomial tree with constant-rate discounting.

use super::error::LatticeError;
use super::time_grid::TimeGrid;
use super::tree::BinomialTree;

/// A [`BinomialTree`] on a [`TimeGrid`], discounting at a constant rate.
///
/// Rolling back one step maps the `i + 2` values at step `i + 1` onto the
/// `i + 1` values at step `i`:
/// ```text
/// V(i, j) = e^(-r·dt) · ((1 − p)·V(i+1, j) + p·V(i+1, j+1))
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholesLattice {
    tree: BinomialTree,
    grid: TimeGrid,
    discount: f64,
    p_down: f64,
    p_up: f64,
}

impl BlackScholesLattice {
    /// Wrap `tree` for discounting at `risk_free_rate` up to `maturity`.
    ///
    /// # Errors
    /// `LatticeError::InvalidMaturity` for a non-positive maturity.
    pub fn new(
        tree: BinomialTree,
        risk_free_rate: f64,
        maturity: f64,
    ) -> Result<Self, LatticeError> {
        let grid = TimeGrid::new(maturity, tree.steps())?;
        let discount = (-risk_free_rate * grid.dt()).exp();
        Ok(Self {
            p_down: tree.probability(0),
            p_up: tree.probability(1),
            tree,
            grid,
            discount,
        })
    }

    /// Underlying tree.
    pub fn tree(&self) -> &BinomialTree {
        &self.tree
    }

    /// Time grid.
    pub fn time_grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// One-step discount factor.
    #[inline]
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Number of nodes at step `i`.
    #[inline]
    pub fn size(&self, i: usize) -> usize {
        self.tree.size(i)
    }

    /// Spot at node `(i, j)`.
    #[inline]
    pub fn underlying(&self, i: usize, j: usize) -> f64 {
        self.tree.underlying(i, j)
    }

    /// Spots at every node of step `i`.
    pub fn grid_values(&self, i: usize) -> Vec<f64> {
        (0..self.size(i)).map(|j| self.underlying(i, j)).collect()
    }

    /// Discounted expectation from step `i + 1` (`next`) onto step `i`.
    pub fn stepback(&self, i: usize, next: &[f64]) -> Vec<f64> {
        debug_assert_eq!(next.len(), self.size(i + 1));
        (0..self.size(i))
            .map(|j| {
                let down = next[self.tree.descendant(i, j, 0)];
                let up = next[self.tree.descendant(i, j, 1)];
                self.discount * (self.p_down * down + self.p_up * up)
            })
            .collect()
    }
}
