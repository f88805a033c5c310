//! Numeric type abstractions for technical analysis computations.
//!
//! This module defines the [`TaFloat`] trait which abstracts over `f32` and `f64`
//! so that every series operation and indicator can be written once.

use core::cmp::Ordering;
use num_traits::{Float, FromPrimitive, ToPrimitive};

#[cfg(feature = "serde")]
mod bound {
    use serde::{de::DeserializeOwned, Serialize};

    /// Serialization bound attached to [`super::TaFloat`] when `serde` is enabled.
    pub trait SerdeBound: Serialize + DeserializeOwned {}

    impl<T: Serialize + DeserializeOwned> SerdeBound for T {}
}

#[cfg(not(feature = "serde"))]
mod bound {
    /// Empty bound used when `serde` is disabled.
    pub trait SerdeBound {}

    impl<T> SerdeBound for T {}
}

pub use bound::SerdeBound;

/// Trait for floating-point types used in technical analysis calculations.
///
/// # Example
///
/// ```rust
/// use fta_core::TaFloat;
///
/// fn percent_change<T: TaFloat>(now: T, before: T) -> T {
///     (now - before) / before * T::HUNDRED
/// }
///
/// assert_eq!(percent_change(110.0_f64, 100.0), 10.0);
/// ```
pub trait TaFloat:
    Float + FromPrimitive + ToPrimitive + Copy + Send + Sync + Default + SerdeBound + 'static
{
    /// Not-a-number value.
    const NAN: Self;
    /// Positive infinity.
    const INFINITY: Self;
    /// Negative infinity.
    const NEG_INFINITY: Self;
    /// Zero value.
    const ZERO: Self;
    /// One value.
    const ONE: Self;
    /// Two value.
    const TWO: Self;
    /// Hundred value (percentage scaling for ROC, RSI, VZO).
    const HUNDRED: Self;

    /// Convert from `f64`, rounding when the target is narrower.
    #[must_use]
    fn from_f64_lossy(value: f64) -> Self;

    /// Convert to `f64`.
    #[must_use]
    fn to_f64_lossy(self) -> f64;

    /// Convert from `usize`.
    #[must_use]
    fn from_usize(value: usize) -> Self;

    /// Check if the value is valid (not NaN and not infinite).
    #[must_use]
    fn is_valid(self) -> bool {
        !self.is_nan() && !self.is_infinite()
    }

    /// Total comparison; NaN sorts after every other value.
    #[must_use]
    fn total_cmp_fn(&self, other: &Self) -> Ordering;

    /// Sign as `-1`, `0` or `1`. NaN maps to `0`.
    #[must_use]
    fn sign_or_zero(self) -> Self {
        if self > Self::ZERO {
            Self::ONE
        } else if self < Self::ZERO {
            -Self::ONE
        } else {
            Self::ZERO
        }
    }

    /// Replace NaN with `fill`.
    #[must_use]
    fn or_fill(self, fill: Self) -> Self {
        if self.is_nan() {
            fill
        } else {
            self
        }
    }
}

impl TaFloat for f32 {
    const NAN: Self = f32::NAN;
    const INFINITY: Self = f32::INFINITY;
    const NEG_INFINITY: Self = f32::NEG_INFINITY;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HUNDRED: Self = 100.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f32
    }

    #[inline]
    fn total_cmp_fn(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl TaFloat for f64 {
    const NAN: Self = f64::NAN;
    const INFINITY: Self = f64::INFINITY;
    const NEG_INFINITY: Self = f64::NEG_INFINITY;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HUNDRED: Self = 100.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f64
    }

    #[inline]
    fn total_cmp_fn(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(<f64 as TaFloat>::NAN.is_nan());
        assert!(<f32 as TaFloat>::INFINITY.is_infinite());
        assert_eq!(<f64 as TaFloat>::HUNDRED, 100.0);
        assert_eq!(<f32 as TaFloat>::TWO, 2.0f32);
    }

    #[test]
    fn test_lossy_conversions() {
        assert_eq!(f32::from_f64_lossy(42.5), 42.5f32);
        assert_eq!(42.5f32.to_f64_lossy(), 42.5);
        assert_eq!(<f64 as TaFloat>::from_usize(7), 7.0);
    }

    #[test]
    fn test_sign_or_zero() {
        assert_eq!(3.5f64.sign_or_zero(), 1.0);
        assert_eq!((-0.1f64).sign_or_zero(), -1.0);
        assert_eq!(0.0f64.sign_or_zero(), 0.0);
        assert_eq!(f64::NAN.sign_or_zero(), 0.0);
    }

    #[test]
    fn test_or_fill() {
        assert_eq!(f64::NAN.or_fill(0.0), 0.0);
        assert_eq!(2.0f64.or_fill(0.0), 2.0);
    }

    #[test]
    fn test_total_cmp_nan_ordering() {
        let mut values = vec![1.0f64, f64::NAN, 2.0, 0.5];
        values.sort_by(|a, b| a.total_cmp_fn(b));

        assert_eq!(&values[..3], &[0.5, 1.0, 2.0]);
        assert!(values[3].is_nan());
    }
}
