//! Origin-aligned bucketing to a coarser frequency.
//!
//! A bar at timestamp `t` falls into bucket `floor((t - origin) / freq)`.
//! The output grid is dense: it runs from the first to the last occupied
//! bucket, labelled with the bucket's start timestamp `origin + id * freq`.
//! Buckets without a source bar, or whose bars are all NaN, aggregate to NaN.

use tracing::debug;

use crate::error::{IndicatorError, Result};
use crate::index::TimeIndex;
use crate::num::TaFloat;
use crate::series::Series;

/// Default bucket origin: the Unix epoch.
pub const ORIGIN_EPOCH: i64 = 0;

/// Assignment of source positions to the buckets of a resampled grid.
///
/// Computed once per source index and reused for every column, so all
/// aggregated columns share one output [`TimeIndex`].
#[derive(Clone, Debug)]
pub struct Buckets {
    index: TimeIndex,
    /// `(bucket position, source start, source end)` per occupied bucket.
    runs: Vec<(usize, usize, usize)>,
    source_len: usize,
}

impl Buckets {
    /// Assign the timestamps of `source` to `freq`-wide buckets counted from `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InvalidFrequency`] if `freq <= 0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fta_core::{Buckets, TimeIndex, ORIGIN_EPOCH};
    ///
    /// let minutes = TimeIndex::new(60, vec![0, 60, 3600, 3660, 10800]).unwrap();
    /// let hours = Buckets::new(&minutes, 3600, ORIGIN_EPOCH).unwrap();
    ///
    /// assert_eq!(hours.index().timestamps(), &[0, 3600, 7200, 10800]);
    /// ```
    pub fn new(source: &TimeIndex, freq: i64, origin: i64) -> Result<Self> {
        if freq <= 0 {
            return Err(IndicatorError::InvalidFrequency(freq));
        }

        let timestamps = source.timestamps();
        let ids: Vec<i64> = timestamps
            .iter()
            .map(|&t| (t - origin).div_euclid(freq))
            .collect();

        let (Some(&first), Some(&last)) = (ids.first(), ids.last()) else {
            return Ok(Self {
                index: TimeIndex::new(freq, Vec::new())?,
                runs: Vec::new(),
                source_len: 0,
            });
        };

        let grid: Vec<i64> = (first..=last).map(|id| origin + id * freq).collect();

        let mut runs = Vec::new();
        let mut start = 0;
        for end in 1..=ids.len() {
            if end == ids.len() || ids[end] != ids[start] {
                // ids are non-decreasing because the source index is ordered
                let position = usize::try_from(ids[start] - first)
                    .map_err(|_| IndicatorError::UnorderedIndex { position: start })?;
                runs.push((position, start, end));
                start = end;
            }
        }

        debug!(
            source = timestamps.len(),
            buckets = grid.len(),
            occupied = runs.len(),
            freq,
            origin,
            "resampled index"
        );

        Ok(Self {
            index: TimeIndex::new(freq, grid)?,
            runs,
            source_len: timestamps.len(),
        })
    }

    /// The resampled grid.
    #[must_use]
    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    /// Number of output buckets, occupied or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the grid is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Reduce the values of every occupied bucket with `f`. Empty buckets are NaN.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if `series` is not as long
    /// as the index the buckets were built from.
    pub fn aggregate<T, F>(&self, series: &Series<T>, f: F) -> Result<Series<T>>
    where
        T: TaFloat,
        F: Fn(&[T]) -> T,
    {
        IndicatorError::ensure_len(self.source_len, series.len())?;

        let data = series.as_slice();
        let mut result = vec![T::NAN; self.index.len()];
        for &(position, start, end) in &self.runs {
            result[position] = f(&data[start..end]);
        }

        Series::new(self.index.clone(), result)
    }

    /// First non-NaN value per bucket.
    pub fn first<T: TaFloat>(&self, series: &Series<T>) -> Result<Series<T>> {
        self.aggregate(series, |bucket| {
            bucket.iter().copied().find(|x| !x.is_nan()).unwrap_or(T::NAN)
        })
    }

    /// Last non-NaN value per bucket.
    pub fn last<T: TaFloat>(&self, series: &Series<T>) -> Result<Series<T>> {
        self.aggregate(series, |bucket| {
            bucket
                .iter()
                .copied()
                .rev()
                .find(|x| !x.is_nan())
                .unwrap_or(T::NAN)
        })
    }

    /// Minimum per bucket, skipping NaN.
    pub fn min<T: TaFloat>(&self, series: &Series<T>) -> Result<Series<T>> {
        self.aggregate(series, |bucket| {
            observed(bucket).fold(T::NAN, |acc, x| if acc.is_nan() { x } else { acc.min(x) })
        })
    }

    /// Maximum per bucket, skipping NaN.
    pub fn max<T: TaFloat>(&self, series: &Series<T>) -> Result<Series<T>> {
        self.aggregate(series, |bucket| {
            observed(bucket).fold(T::NAN, |acc, x| if acc.is_nan() { x } else { acc.max(x) })
        })
    }

    /// Sum per bucket, skipping NaN.
    pub fn sum<T: TaFloat>(&self, series: &Series<T>) -> Result<Series<T>> {
        self.aggregate(series, |bucket| {
            observed(bucket).fold(T::NAN, |acc, x| if acc.is_nan() { x } else { acc + x })
        })
    }

    /// Mean per bucket, skipping NaN.
    pub fn mean<T: TaFloat>(&self, series: &Series<T>) -> Result<Series<T>> {
        self.aggregate(series, |bucket| {
            let (sum, count) = observed(bucket).fold((T::ZERO, 0usize), |(s, n), x| (s + x, n + 1));
            if count == 0 {
                T::NAN
            } else {
                sum / <T as TaFloat>::from_usize(count)
            }
        })
    }
}

fn observed<T: TaFloat>(bucket: &[T]) -> impl Iterator<Item = T> + '_ {
    bucket.iter().copied().filter(|x| !x.is_nan())
}

/// A [`Series`] paired with its bucket assignment.
///
/// # Example
///
/// ```rust
/// use fta_core::{Series, TimeIndex, ORIGIN_EPOCH};
///
/// let index = TimeIndex::new(60, vec![0, 60, 120, 180]).unwrap();
/// let prices = Series::new(index, vec![1.0, 4.0, 2.0, 3.0]).unwrap();
///
/// let bars = prices.resample(120, ORIGIN_EPOCH).unwrap();
/// assert_eq!(bars.max().as_slice(), &[4.0, 3.0]);
/// assert_eq!(bars.first().as_slice(), &[1.0, 2.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Resampler<'a, T: TaFloat> {
    series: &'a Series<T>,
    buckets: Buckets,
}

impl<'a, T: TaFloat> Resampler<'a, T> {
    pub(crate) fn new(series: &'a Series<T>, freq: i64, origin: i64) -> Result<Self> {
        Ok(Self {
            series,
            buckets: Buckets::new(series.index(), freq, origin)?,
        })
    }

    /// The bucket assignment.
    #[must_use]
    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    fn run(&self, f: impl Fn(&Buckets, &Series<T>) -> Result<Series<T>>) -> Series<T> {
        // buckets were built from this series' own index, so lengths agree
        f(&self.buckets, self.series)
            .unwrap_or_else(|_| Series::nan(self.buckets.index().clone()))
    }

    /// First non-NaN value per bucket.
    #[must_use]
    pub fn first(&self) -> Series<T> {
        self.run(Buckets::first)
    }

    /// Last non-NaN value per bucket.
    #[must_use]
    pub fn last(&self) -> Series<T> {
        self.run(Buckets::last)
    }

    /// Minimum per bucket.
    #[must_use]
    pub fn min(&self) -> Series<T> {
        self.run(Buckets::min)
    }

    /// Maximum per bucket.
    #[must_use]
    pub fn max(&self) -> Series<T> {
        self.run(Buckets::max)
    }

    /// Sum per bucket.
    #[must_use]
    pub fn sum(&self) -> Series<T> {
        self.run(Buckets::sum)
    }

    /// Mean per bucket.
    #[must_use]
    pub fn mean(&self) -> Series<T> {
        self.run(Buckets::mean)
    }
}
