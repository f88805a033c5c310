//! Time series data container.
//!
//! A [`Series`] pairs a vector of values with the [`TimeIndex`] they are
//! aligned to. Every transformation returns a new series on the same index;
//! only [`Series::fillna`] and [`Series::pad`] edit in place.
//!
//! Arithmetic between two series is positional: the operands must have the
//! same length and no index join is performed.

use core::ops::{Add, Div, Index, IndexMut, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::ewm::{Decay, Ewm};
use crate::index::TimeIndex;
use crate::num::TaFloat;
use crate::resample::Resampler;
use crate::window::Rolling;

/// Values of type `T` aligned to a [`TimeIndex`].
///
/// # Example
///
/// ```rust
/// use fta_core::Series;
///
/// let series: Series<f64> = Series::from_vec(vec![100.0, 101.5, 99.8]);
///
/// assert_eq!(series.len(), 3);
/// assert_eq!(series[0], 100.0);
/// assert_eq!(series.last(), Some(&99.8));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: TaFloat"))]
pub struct Series<T: TaFloat> {
    index: TimeIndex,
    data: Vec<T>,
}

impl<T: TaFloat> Series<T> {
    /// Create a series on `index`.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if `data` and `index` differ in length.
    pub fn new(index: TimeIndex, data: Vec<T>) -> Result<Self> {
        IndicatorError::ensure_len(index.len(), data.len())?;
        Ok(Self { index, data })
    }

    /// Create a series on a positional index (`0, 1, ..`, unit frequency).
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            index: TimeIndex::positional(data.len()),
            data,
        }
    }

    /// Create a series on `index` filled with `value`.
    #[must_use]
    pub fn filled(index: TimeIndex, value: T) -> Self {
        let data = vec![value; index.len()];
        Self { index, data }
    }

    /// Create a series on `index` filled with NaN.
    #[must_use]
    pub fn nan(index: TimeIndex) -> Self {
        Self::filled(index, T::NAN)
    }

    /// New series on this series' index holding `data`.
    ///
    /// # Panics
    ///
    /// Panics if `data` has a different length than `self`.
    #[must_use]
    pub fn with_values(&self, data: Vec<T>) -> Self {
        assert_eq!(data.len(), self.len(), "series length mismatch");
        Self {
            index: self.index.clone(),
            data,
        }
    }

    /// Returns the number of elements in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the series contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the time index.
    #[must_use]
    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    /// Returns the grid spacing of the index.
    #[must_use]
    pub fn freq(&self) -> i64 {
        self.index.freq()
    }

    /// Get a reference to the value at the given position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&T> {
        self.data.get(position)
    }

    /// Get the first value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Get the last value, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.data.last()
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the underlying data as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the series and returns the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Copy of positions `start..end`, index included.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            index: self.index.slice(start, end),
            data: self.data[start..end].to_vec(),
        }
    }

    /// Differences with the value `lag` bars earlier: `y[i] = x[i] - x[i - lag]`.
    ///
    /// The first `lag` values are NaN.
    #[must_use]
    pub fn diff(&self, lag: usize) -> Self {
        let data = (0..self.len())
            .map(|i| {
                if i < lag {
                    T::NAN
                } else {
                    self.data[i] - self.data[i - lag]
                }
            })
            .collect();
        self.with_values(data)
    }

    /// Shift values by `n` positions, filling the vacated slots with NaN.
    ///
    /// Positive `n` moves values later in time (`y[i] = x[i - n]`), negative
    /// `n` moves them earlier.
    #[must_use]
    pub fn shift(&self, n: isize) -> Self {
        let len = self.len();
        let mut result = vec![T::NAN; len];
        let shift = n.unsigned_abs();

        if shift < len {
            if n >= 0 {
                result[shift..].copy_from_slice(&self.data[..len - shift]);
            } else {
                result[..len - shift].copy_from_slice(&self.data[shift..]);
            }
        }

        self.with_values(result)
    }

    /// Replace all NaN values with the specified value, in place.
    pub fn fillna(&mut self, value: T) {
        for x in &mut self.data {
            *x = x.or_fill(value);
        }
    }

    /// Return a new series with NaN values replaced.
    #[must_use]
    pub fn fillna_with(&self, value: T) -> Self {
        self.map(|x| x.or_fill(value))
    }

    /// Forward-fill NaN values with the last valid observation, in place.
    ///
    /// Leading NaN values stay NaN.
    pub fn pad(&mut self) {
        let mut last_valid = T::NAN;
        for x in &mut self.data {
            if x.is_nan() {
                *x = last_valid;
            } else {
                last_valid = *x;
            }
        }
    }

    /// Apply a function to each element.
    #[must_use]
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        self.with_values(self.data.iter().map(|&x| f(x)).collect())
    }

    /// Combine two series elementwise.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if the lengths differ.
    pub fn zip_with<F>(&self, other: &Self, f: F) -> Result<Self>
    where
        F: Fn(T, T) -> T,
    {
        IndicatorError::ensure_len(self.len(), other.len())?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(self.with_values(data))
    }

    /// Absolute values.
    #[must_use]
    pub fn abs(&self) -> Self {
        self.map(|x| x.abs())
    }

    /// Natural logarithm.
    #[must_use]
    pub fn ln(&self) -> Self {
        self.map(|x| x.ln())
    }

    /// Sign of every value as `-1`, `0` or `1` (NaN maps to `0`).
    #[must_use]
    pub fn sign(&self) -> Self {
        self.map(<T as TaFloat>::sign_or_zero)
    }

    /// Running sum. NaN values are skipped by the accumulator but stay NaN
    /// at their own position.
    #[must_use]
    pub fn cumsum(&self) -> Self {
        let mut acc = T::ZERO;
        let data = self
            .data
            .iter()
            .map(|&x| {
                if x.is_nan() {
                    T::NAN
                } else {
                    acc = acc + x;
                    acc
                }
            })
            .collect();
        self.with_values(data)
    }

    /// Add a scalar to every value.
    #[must_use]
    pub fn add_scalar(&self, value: T) -> Self {
        self.map(|x| x + value)
    }

    /// Subtract a scalar from every value.
    #[must_use]
    pub fn sub_scalar(&self, value: T) -> Self {
        self.map(|x| x - value)
    }

    /// Multiply every value by a scalar.
    #[must_use]
    pub fn mul_scalar(&self, value: T) -> Self {
        self.map(|x| x * value)
    }

    /// Divide every value by a scalar.
    #[must_use]
    pub fn div_scalar(&self, value: T) -> Self {
        self.map(|x| x / value)
    }

    /// Trailing-window reductions over `period` bars.
    #[must_use]
    pub fn rolling(&self, period: usize) -> Rolling<'_, T> {
        Rolling::new(self, period)
    }

    /// Exponentially weighted recursion with the given decay.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InvalidParameter`] if the decay is out of range.
    pub fn ewm(&self, decay: Decay) -> Result<Ewm<'_, T>> {
        Ewm::new(self, decay)
    }

    /// Bucket the series into `freq`-wide intervals counted from `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InvalidFrequency`] if `freq <= 0`.
    pub fn resample(&self, freq: i64, origin: i64) -> Result<Resampler<'_, T>> {
        Resampler::new(self, freq, origin)
    }

    /// Count the number of NaN values.
    #[must_use]
    pub fn nan_count(&self) -> usize {
        self.data.iter().filter(|x| x.is_nan()).count()
    }

    /// Compute the sum of all valid (non-NaN) values.
    #[must_use]
    pub fn sum(&self) -> T {
        self.data
            .iter()
            .filter(|x| !x.is_nan())
            .fold(T::ZERO, |acc, &x| acc + x)
    }

    /// Compute the mean of all valid (non-NaN) values.
    #[must_use]
    pub fn mean(&self) -> T {
        let count = self.len() - self.nan_count();
        if count == 0 {
            return T::NAN;
        }
        self.sum() / <T as TaFloat>::from_usize(count)
    }

    /// Compute the minimum value (excluding NaN). NaN if there is none.
    #[must_use]
    pub fn min(&self) -> T {
        self.data
            .iter()
            .filter(|x| !x.is_nan())
            .fold(T::NAN, |acc, &x| if acc.is_nan() || x < acc { x } else { acc })
    }

    /// Compute the maximum value (excluding NaN). NaN if there is none.
    #[must_use]
    pub fn max(&self) -> T {
        self.data
            .iter()
            .filter(|x| !x.is_nan())
            .fold(T::NAN, |acc, &x| if acc.is_nan() || x > acc { x } else { acc })
    }
    /// Returns `true` if both series share a time axis and hold the same
    /// values, counting NaN as equal to NaN.
    ///
    /// Derived `==` never holds for series with NaN warm-up bars.
    #[must_use]
    pub fn same_values(&self, other: &Self) -> bool {
        self.index.same_as(&other.index)
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }
}

impl<T: TaFloat> Index<usize> for Series<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: TaFloat> IndexMut<usize> for Series<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: TaFloat> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T: TaFloat> IntoIterator for &'a Series<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: TaFloat> From<Vec<T>> for Series<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

macro_rules! impl_elementwise_op {
    ($trait:ident, $method:ident, $op:tt) => {
        /// Positional elementwise operation. The result uses the left operand's index.
        ///
        /// # Panics
        ///
        /// Panics if the operands have different lengths.
        impl<T: TaFloat> $trait<&Series<T>> for &Series<T> {
            type Output = Series<T>;

            fn $method(self, rhs: &Series<T>) -> Series<T> {
                match self.zip_with(rhs, |a, b| a $op b) {
                    Ok(series) => series,
                    Err(err) => panic!("{}", err),
                }
            }
        }
    };
}

impl_elementwise_op!(Add, add, +);
impl_elementwise_op!(Sub, sub, -);
impl_elementwise_op!(Mul, mul, *);
impl_elementwise_op!(Div, div, /);
