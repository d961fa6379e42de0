//! Core interpolation trait.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation over a fixed set of knots.
///
/// Implementations are generic over `T: Float` so curves built on them can
/// be evaluated in either `f64` or `f32`.
pub trait Interpolator<T: Float> {
    /// Interpolate the value at `x`.
    ///
    /// # Errors
    /// `InterpolationError::OutOfBounds` if `x` lies outside [`domain`](Self::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Return the closed interval `(x_min, x_max)` covered by the knots.
    fn domain(&self) -> (T, T);

    /// Returns true if `x` lies inside the domain, boundaries included.
    #[inline]
    fn contains(&self, x: T) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }
}
