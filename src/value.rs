//! Numeric types and iteration utilities for series sampling.
//!
//! This module defines the [`Value`] trait, which abstracts the scalar types
//! series can be evaluated in, along with the integer-counted range iterator
//! used to lay out sample points.
//!
//! # Traits
//!
//! - [`Value`]: Extends `RealField` and `FloatCore` to provide:
//!   - `factorial` matching plain floating-point products.
//!   - `try_cast` for safe type conversion with error handling.
//!   - `round_to` for fixed decimal rounding of sample coordinates.
//! - [`IntClampedCast`]: Saturating integer conversions for term exponents.
//!
//! # Iterators
//!
//! - [`SteppedValues`]: A range iterator that computes `start + i * step`
//!   from an integer counter, so long ranges do not accumulate drift.
//!
//! # Example
//!
//! ```rust
//! use taylorscope::value::{SteppedValues, Value};
//!
//! let xs: Vec<f64> = SteppedValues::new(-1.0..=1.0, 0.5).collect();
//! assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
//!
//! assert_eq!(f64::factorial(5), 120.0);
//! ```
use std::ops::RangeInclusive;

use crate::error::Error;

/// Numeric type for series evaluation
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
    + std::fmt::Display
{
    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts the value to `usize`
    fn as_usize(&self) -> Option<usize> {
        num_traits::cast(*self)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Computes the factorial of a non-negative integer `n`.
    ///
    /// `0!` and `1!` are one; anything larger is the running product `2·3·…·n`
    /// in `Self`, which saturates to infinity instead of overflowing.
    #[must_use]
    fn factorial(n: usize) -> Self {
        if n == 0 || n == 1 {
            Self::one()
        } else {
            let mut result = Self::one();
            for i in 2..=n {
                result *= Self::from_positive_int(i);
                if num_traits::float::FloatCore::is_infinite(result) {
                    break;
                }
            }
            result
        }
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }

    /// Rounds the value to a fixed number of decimal places
    ///
    /// Non-finite values, and values too large to scale to that many decimals, are
    /// returned unchanged.
    #[must_use]
    fn round_to(self, decimals: u32) -> Self {
        if !num_traits::float::FloatCore::is_finite(self) {
            return self;
        }

        let scale = Value::powi(Self::from_positive_int(10), decimals.clamped_cast());
        let scaled = self * scale;
        if !num_traits::float::FloatCore::is_finite(scaled) {
            return self;
        }
        num_traits::float::FloatCore::round(scaled) / scale
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
        + std::fmt::Display
{
}

/// Iterator over a range of floating-point values with a specified step.
///
/// This iterator yields `start + i * step` for `i = 0, 1, …` up to and
/// including `end`. Each value is computed from the integer counter, never by
/// adding `step` to the previous value.
///
/// The number of points is fixed up front: a range whose length is within
/// rounding error of a whole number of steps includes its end point.
#[derive(Debug, Clone)]
pub struct SteppedValues<T: Value> {
    start: T,
    step: T,
    index: usize,
    count: usize,
}
impl<T: Value> SteppedValues<T> {
    /// Creates a new iterator over stepped values in a range
    ///
    /// Will yield values starting from `range.start` up to and including `range.end`.
    /// An empty iterator is returned for a non-positive or non-finite step, or a reversed range.
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        let (start, end) = range.into_inner();
        Self {
            start,
            step,
            index: 0,
            count: Self::point_count(start, end, step),
        }
    }

    fn point_count(start: T, end: T, step: T) -> usize {
        use num_traits::float::FloatCore;

        let finite = FloatCore::is_finite(start) && FloatCore::is_finite(end);
        if !finite || !FloatCore::is_finite(step) || step <= T::zero() || end < start {
            return 0;
        }

        //
        // Snap to the nearest whole step when we are only off by rounding error
        let steps = (end - start) / step;
        let nearest = FloatCore::round(steps);
        let tolerance = T::try_cast(1e-9).unwrap_or(T::epsilon());
        let steps = if Value::abs(steps - nearest) <= tolerance * FloatCore::max(T::one(), nearest) {
            nearest
        } else {
            FloatCore::floor(steps)
        };

        steps.as_usize().map_or(0, |n| n.saturating_add(1))
    }
}
impl<T: Value> Iterator for SteppedValues<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }

        let value = self.start + T::from_positive_int(self.index) * self.step;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}
impl<T: Value> ExactSizeIterator for SteppedValues<T> {}

/// Trait for infallible integer casting with clamping.
///
/// Term indices are `usize`, but `powi` wants an `i32`; huge term counts
/// saturate at the target's bounds instead of wrapping.
pub trait IntClampedCast:
    num_traits::Num + num_traits::NumCast + num_traits::Bounded + Copy + PartialOrd + Ord
{
    /// Clamps a value to the range of the target type and casts it.
    fn clamped_cast<T: num_traits::PrimInt>(self) -> T {
        if let Some(v) = num_traits::cast(self) {
            return v;
        }

        // Only one of the two bounds can be the reason the cast failed
        if self < Self::zero() {
            T::min_value()
        } else {
            T::max_value()
        }
    }
}
impl<T: num_traits::PrimInt> IntClampedCast for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepped_values_default_domain() {
        let values: Vec<f64> = SteppedValues::new(-4.0..=4.0, 0.1).collect();
        assert_eq!(values.len(), 81);
        assert_eq!(values[0], -4.0);
        assert!((values[80] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_stepped_values_unit() {
        let values: Vec<f64> = SteppedValues::new(0.0..=3.0, 1.0).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_stepped_values_partial_last_step() {
        // 0.0, 0.4, 0.8 - the end point is not reachable
        let values: Vec<f64> = SteppedValues::new(0.0..=1.0, 0.4).collect();
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_stepped_values_degenerate() {
        assert_eq!(SteppedValues::new(0.0..=1.0, 0.0).count(), 0);
        assert_eq!(SteppedValues::new(0.0..=1.0, -0.1).count(), 0);
        assert_eq!(SteppedValues::new(1.0..=0.0, 0.1).count(), 0);
        assert_eq!(SteppedValues::new(0.0..=f64::INFINITY, 0.1).count(), 0);
        assert_eq!(SteppedValues::new(2.0..=2.0, 0.1).count(), 1);
    }

    #[test]
    fn test_stepped_values_exact_size() {
        let mut iter = SteppedValues::new(-4.0..=4.0, 0.1);
        assert_eq!(iter.len(), 81);
        iter.next();
        assert_eq!(iter.len(), 80);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(f64::factorial(0), 1.0);
        assert_eq!(f64::factorial(1), 1.0);
        assert_eq!(f64::factorial(3), 6.0);
        assert_eq!(f64::factorial(10), 3_628_800.0);
        assert_eq!(f64::factorial(21), 51_090_942_171_709_440_000.0);
        assert!(f64::factorial(200).is_infinite());
        assert!(f32::factorial(40).is_infinite());
    }

    #[test]
    fn test_round_to() {
        assert_eq!((-4.0 + 3.0 * 0.1_f64).round_to(1), -3.7);
        assert_eq!(0.30000000000000004_f64.round_to(1), 0.3);
        assert_eq!(2.345_f64.round_to(0), 2.0);
        assert!(f64::NAN.round_to(1).is_nan());
        assert_eq!((-3.7_f64).round_to(400), -3.7);
        assert_eq!(0.25_f64.round_to(u32::MAX), 0.25);
    }

    #[test]
    fn clamped_cast_edge_cases() {
        assert_eq!(0usize.clamped_cast::<i32>(), 0);
        assert_eq!(21usize.clamped_cast::<i32>(), 21);
        assert_eq!(usize::MAX.clamped_cast::<i32>(), i32::MAX);
        assert_eq!(u32::MAX.clamped_cast::<i32>(), i32::MAX);
        assert_eq!((-1i64).clamped_cast::<u32>(), 0);
        assert_eq!(i64::MIN.clamped_cast::<i8>(), -128);
    }
}
