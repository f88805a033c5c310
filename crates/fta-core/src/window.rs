//! Trailing-window reductions.
//!
//! [`Rolling`] reduces each trailing window of `period` bars to one value.
//! Windows at the start of the series that are shorter than `period` are
//! reduced over the available prefix instead of producing NaN, so
//! `rolling(2).mean()` of `[1, 2, 3]` is `[1, 1.5, 2.5]`.
//!
//! The built-in reductions propagate NaN: a window holding a NaN reduces to
//! NaN. [`Rolling::apply`] hands the raw window to the caller.

use crate::num::TaFloat;
use crate::series::Series;

/// Trailing-window view over a [`Series`].
///
/// # Example
///
/// ```rust
/// use fta_core::Series;
///
/// let series: Series<f64> = Series::from_vec(vec![5.0, 3.0, 4.0, 1.0, 2.0]);
///
/// assert_eq!(series.rolling(3).min().as_slice(), &[5.0, 3.0, 3.0, 1.0, 1.0]);
/// assert_eq!(series.rolling(3).max().as_slice(), &[5.0, 5.0, 5.0, 4.0, 4.0]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Rolling<'a, T: TaFloat> {
    series: &'a Series<T>,
    period: usize,
}

impl<'a, T: TaFloat> Rolling<'a, T> {
    pub(crate) fn new(series: &'a Series<T>, period: usize) -> Self {
        Self { series, period }
    }

    /// Window length.
    #[must_use]
    pub fn period(&self) -> usize {
        self.period
    }

    /// The window ending at `position`. Empty when `period == 0`.
    fn window(&self, position: usize) -> &'a [T] {
        let data = self.series.as_slice();
        let start = (position + 1).saturating_sub(self.period);
        let start = if self.period == 0 { position + 1 } else { start };
        &data[start..=position]
    }

    /// Reduce every window with `f`.
    #[must_use]
    pub fn apply<F>(&self, f: F) -> Series<T>
    where
        F: Fn(&[T]) -> T,
    {
        self.apply_indexed(|_, window| f(window))
    }

    /// Reduce every window with `f`, also passing the position of the window's last bar.
    #[must_use]
    pub fn apply_indexed<F>(&self, f: F) -> Series<T>
    where
        F: Fn(usize, &[T]) -> T,
    {
        let data = (0..self.series.len())
            .map(|i| f(i, self.window(i)))
            .collect();
        self.series.with_values(data)
    }

    /// Rolling sum, computed with a running total.
    #[must_use]
    pub fn sum(&self) -> Series<T> {
        let data = self.series.as_slice();
        let mut result = Vec::with_capacity(data.len());
        let mut sum = T::ZERO;
        let mut nans = 0usize;

        for (i, &value) in data.iter().enumerate() {
            if value.is_nan() {
                nans += 1;
            } else {
                sum = sum + value;
            }

            if self.period > 0 && i >= self.period {
                let evicted = data[i - self.period];
                if evicted.is_nan() {
                    nans -= 1;
                } else {
                    sum = sum - evicted;
                }
            }

            if self.period == 0 || nans > 0 {
                result.push(T::NAN);
            } else if self.period == 1 {
                // exact, no running-total residue
                result.push(value);
            } else {
                result.push(sum);
            }
        }

        self.series.with_values(result)
    }

    /// Rolling arithmetic mean.
    #[must_use]
    pub fn mean(&self) -> Series<T> {
        let sums = self.sum();
        let data = sums
            .iter()
            .enumerate()
            .map(|(i, &sum)| sum / <T as TaFloat>::from_usize(self.window(i).len()))
            .collect();
        self.series.with_values(data)
    }

    /// Rolling median. Even-sized windows average the two middle values.
    #[must_use]
    pub fn median(&self) -> Series<T> {
        self.apply(|window| {
            if window.is_empty() || window.iter().any(|x| x.is_nan()) {
                return T::NAN;
            }
            let mut sorted = window.to_vec();
            sorted.sort_by(|a, b| a.total_cmp_fn(b));
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[mid - 1] + sorted[mid]) / T::TWO
            } else {
                sorted[mid]
            }
        })
    }

    /// Rolling minimum.
    #[must_use]
    pub fn min(&self) -> Series<T> {
        self.apply(|window| fold_extreme(window, |candidate, best| candidate < best))
    }

    /// Rolling maximum.
    #[must_use]
    pub fn max(&self) -> Series<T> {
        self.apply(|window| fold_extreme(window, |candidate, best| candidate > best))
    }

    /// Rolling standard deviation with `ddof` delta degrees of freedom.
    ///
    /// Windows with no more than `ddof` values are NaN.
    #[must_use]
    pub fn std(&self, ddof: usize) -> Series<T> {
        self.apply(|window| {
            let n = window.len();
            if n <= ddof {
                return T::NAN;
            }
            let mean = window.iter().fold(T::ZERO, |acc, &x| acc + x) / <T as TaFloat>::from_usize(n);
            deviation(window, mean, ddof)
        })
    }
}

/// Square root of `sum((x - center)^2) / (n - ddof)`; NaN when `n <= ddof`.
#[must_use]
pub fn deviation<T: TaFloat>(window: &[T], center: T, ddof: usize) -> T {
    let n = window.len();
    if n <= ddof {
        return T::NAN;
    }
    let sum_sq = window.iter().fold(T::ZERO, |acc, &x| {
        let diff = x - center;
        acc + diff * diff
    });
    (sum_sq / <T as TaFloat>::from_usize(n - ddof)).sqrt()
}

fn fold_extreme<T: TaFloat>(window: &[T], better: impl Fn(T, T) -> bool) -> T {
    let mut iter = window.iter().copied();
    let Some(mut best) = iter.next() else {
        return T::NAN;
    };
    for value in iter {
        if value.is_nan() || best.is_nan() {
            return T::NAN;
        }
        if better(value, best) {
            best = value;
        }
    }
    best
}
