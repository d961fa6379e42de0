//! Linear interpolation implementation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// Knots must be supplied with strictly increasing abscissae. Term
/// structures rely on this to reject duplicated or out-of-order pillar
/// dates instead of silently reordering them.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`, `f32`)
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
/// assert_eq!(interp.domain(), (0.0, 2.0));
///
/// // Unsorted knots are rejected
/// assert!(LinearInterpolator::new(&[1.0, 0.0], &[0.0, 1.0]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct a linear interpolator from x and y data points.
    ///
    /// # Arguments
    ///
    /// * `xs` - Strictly increasing x-coordinates
    /// * `ys` - Corresponding y-values
    ///
    /// # Returns
    ///
    /// * `Ok(LinearInterpolator)` - Successfully constructed interpolator
    /// * `Err(InterpolationError::InvalidInput)` - Mismatched lengths or non-finite knots
    /// * `Err(InterpolationError::InsufficientData)` - Fewer than 2 data points
    /// * `Err(InterpolationError::NonMonotonicData)` - `xs` not strictly increasing
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }

        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(InterpolationError::InvalidInput(
                "knots must be finite".to_string(),
            ));
        }

        if let Some(index) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Returns the x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns the y-values.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the number of knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Interpolate inside the domain and hold the end values flat outside it.
    ///
    /// ```
    /// use pricer_core::math::interpolators::LinearInterpolator;
    ///
    /// let interp = LinearInterpolator::new(&[1.0, 2.0], &[10.0, 20.0]).unwrap();
    /// assert_eq!(interp.interpolate_flat(0.0), 10.0);
    /// assert_eq!(interp.interpolate_flat(5.0), 20.0);
    /// ```
    pub fn interpolate_flat(&self, x: T) -> T {
        let last = self.xs.len() - 1;
        if x <= self.xs[0] {
            self.ys[0]
        } else if x >= self.xs[last] {
            self.ys[last]
        } else {
            self.segment_value(self.find_segment(x), x)
        }
    }

    /// Index `i` such that `xs[i] <= x < xs[i+1]`, clamped to [0, n-2].
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }

    #[inline]
    fn segment_value(&self, i: usize, x: T) -> T {
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    /// Interpolate value at point `x`.
    ///
    /// # Formula
    ///
    /// ```text
    /// y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    /// ```
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if x < x_min || x > x_max || x.is_nan() {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.segment_value(self.find_segment(x), x))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
