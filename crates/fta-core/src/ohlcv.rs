//! OHLCV (Open, High, Low, Close, Volume) data types.
//!
//! [`OhlcvSeries`] stores the five price columns against one shared
//! [`TimeIndex`]. Every constructor checks that the columns agree with the
//! index, so an existing frame always has equal-length columns with the same
//! per-bar timestamps.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IndicatorError, Result};
use crate::index::TimeIndex;
use crate::num::TaFloat;
use crate::resample::{Buckets, ORIGIN_EPOCH};
use crate::series::Series;

/// A single OHLCV price bar.
///
/// # Example
///
/// ```rust
/// use fta_core::Bar;
///
/// let bar: Bar<f64> = Bar::new(0, 100.0, 105.0, 98.0, 103.0, 1_000_000.0);
/// assert!(bar.is_valid());
/// assert_eq!(bar.median_price(), 101.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: TaFloat"))]
pub struct Bar<T: TaFloat> {
    /// Bar timestamp.
    pub timestamp: i64,
    /// Opening price for the period.
    pub open: T,
    /// Highest price during the period.
    pub high: T,
    /// Lowest price during the period.
    pub low: T,
    /// Closing price for the period.
    pub close: T,
    /// Trading volume during the period.
    pub volume: T,
}

impl<T: TaFloat> Bar<T> {
    /// Create a new bar.
    #[must_use]
    pub fn new(timestamp: i64, open: T, high: T, low: T, close: T, volume: T) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check that all values are finite, `low <= open, close <= high` and volume is non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.open.is_valid()
            && self.high.is_valid()
            && self.low.is_valid()
            && self.close.is_valid()
            && self.volume.is_valid()
            && self.low <= self.open
            && self.open <= self.high
            && self.low <= self.close
            && self.close <= self.high
            && self.volume >= T::ZERO
    }

    /// Typical price: (High + Low + Close) / 3.
    #[must_use]
    pub fn typical_price(&self) -> T {
        (self.high + self.low + self.close) / <T as TaFloat>::from_usize(3)
    }

    /// Median price: (High + Low) / 2.
    #[must_use]
    pub fn median_price(&self) -> T {
        (self.high + self.low) / T::TWO
    }

    /// High - Low.
    #[must_use]
    pub fn range(&self) -> T {
        self.high - self.low
    }
}

/// Column selector for single-input indicators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PriceColumn {
    /// Opening prices.
    Open,
    /// High prices.
    High,
    /// Low prices.
    Low,
    /// Closing prices.
    #[default]
    Close,
    /// Volumes.
    Volume,
}

/// Columnar OHLCV data sharing one [`TimeIndex`].
///
/// # Example
///
/// ```rust
/// use fta_core::{Bar, OhlcvSeries};
///
/// let ohlcv: OhlcvSeries<f64> = OhlcvSeries::from_bars(
///     60,
///     &[
///         Bar::new(0, 100.0, 105.0, 98.0, 103.0, 1_000.0),
///         Bar::new(60, 103.0, 108.0, 101.0, 107.0, 1_200.0),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(ohlcv.len(), 2);
/// assert_eq!(ohlcv.close()[1], 107.0);
/// assert!(ohlcv.close().index().ptr_eq(ohlcv.open().index()));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        bound = "T: TaFloat",
        try_from = "RawOhlcv<T>",
        into = "RawOhlcv<T>"
    )
)]
pub struct OhlcvSeries<T: TaFloat> {
    index: TimeIndex,
    open: Series<T>,
    high: Series<T>,
    low: Series<T>,
    close: Series<T>,
    volume: Series<T>,
}

impl<T: TaFloat> OhlcvSeries<T> {
    /// Build a frame from bars on a grid of spacing `freq`.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InvalidFrequency`] or
    /// [`IndicatorError::UnorderedIndex`] if the bar timestamps do not form a valid index.
    pub fn from_bars(freq: i64, bars: &[Bar<T>]) -> Result<Self> {
        let index = TimeIndex::new(freq, bars.iter().map(|b| b.timestamp).collect())?;
        Self::from_columns(
            index,
            bars.iter().map(|b| b.open).collect(),
            bars.iter().map(|b| b.high).collect(),
            bars.iter().map(|b| b.low).collect(),
            bars.iter().map(|b| b.close).collect(),
            bars.iter().map(|b| b.volume).collect(),
        )
    }

    /// Build a frame from raw columns.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if any column differs in
    /// length from the index.
    pub fn from_columns(
        index: TimeIndex,
        open: Vec<T>,
        high: Vec<T>,
        low: Vec<T>,
        close: Vec<T>,
        volume: Vec<T>,
    ) -> Result<Self> {
        Ok(Self {
            open: Series::new(index.clone(), open)?,
            high: Series::new(index.clone(), high)?,
            low: Series::new(index.clone(), low)?,
            close: Series::new(index.clone(), close)?,
            volume: Series::new(index.clone(), volume)?,
            index,
        })
    }

    /// Build a frame from existing series. The open series' index becomes the frame's index.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if the columns differ in
    /// length, or [`IndicatorError::InvalidParameter`] if their timestamps differ.
    pub fn from_series(
        open: Series<T>,
        high: Series<T>,
        low: Series<T>,
        close: Series<T>,
        volume: Series<T>,
    ) -> Result<Self> {
        let index = open.index().clone();
        for (name, column) in [
            ("high", &high),
            ("low", &low),
            ("close", &close),
            ("volume", &volume),
        ] {
            IndicatorError::ensure_len(index.len(), column.len())?;
            if !index.same_as(column.index()) {
                return Err(IndicatorError::invalid_parameter(
                    name,
                    "index",
                    "same timestamps as open",
                ));
            }
        }

        Self::from_columns(
            index,
            open.into_vec(),
            high.into_vec(),
            low.into_vec(),
            close.into_vec(),
            volume.into_vec(),
        )
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the frame holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The shared index.
    #[must_use]
    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    /// Opening prices.
    #[must_use]
    pub fn open(&self) -> &Series<T> {
        &self.open
    }

    /// High prices.
    #[must_use]
    pub fn high(&self) -> &Series<T> {
        &self.high
    }

    /// Low prices.
    #[must_use]
    pub fn low(&self) -> &Series<T> {
        &self.low
    }

    /// Closing prices.
    #[must_use]
    pub fn close(&self) -> &Series<T> {
        &self.close
    }

    /// Volumes.
    #[must_use]
    pub fn volume(&self) -> &Series<T> {
        &self.volume
    }

    /// Select a column.
    #[must_use]
    pub fn column(&self, column: PriceColumn) -> &Series<T> {
        match column {
            PriceColumn::Open => &self.open,
            PriceColumn::High => &self.high,
            PriceColumn::Low => &self.low,
            PriceColumn::Close => &self.close,
            PriceColumn::Volume => &self.volume,
        }
    }

    /// The bar at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<Bar<T>> {
        Some(Bar {
            timestamp: self.index.get(position)?,
            open: self.open[position],
            high: self.high[position],
            low: self.low[position],
            close: self.close[position],
            volume: self.volume[position],
        })
    }

    /// The last bar.
    #[must_use]
    pub fn last(&self) -> Option<Bar<T>> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate over the bars.
    pub fn iter(&self) -> impl Iterator<Item = Bar<T>> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    /// Bars `start..end`. All columns share the sliced index.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let open = self.open.slice(start, end);
        let cut = |s: &Series<T>| open.with_values(s.as_slice()[start..end].to_vec());

        Self {
            index: open.index().clone(),
            high: cut(&self.high),
            low: cut(&self.low),
            close: cut(&self.close),
            volume: cut(&self.volume),
            open,
        }
    }

    /// Forward-fill NaN values in every column.
    pub fn pad(&mut self) {
        self.open.pad();
        self.high.pad();
        self.low.pad();
        self.close.pad();
        self.volume.pad();
    }

    /// Resample to `freq` with buckets counted from [`ORIGIN_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InvalidFrequency`] if `freq <= 0`.
    pub fn resample(&self, freq: i64) -> Result<Self> {
        self.resample_with_origin(freq, ORIGIN_EPOCH)
    }

    /// Resample to `freq` with buckets counted from `origin`.
    ///
    /// Open takes the first value, high the maximum, low the minimum, close
    /// the last value and volume the sum of each bucket.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InvalidFrequency`] if `freq <= 0`.
    pub fn resample_with_origin(&self, freq: i64, origin: i64) -> Result<Self> {
        let buckets = Buckets::new(&self.index, freq, origin)?;
        let resampled = Self {
            index: buckets.index().clone(),
            open: buckets.first(&self.open)?,
            high: buckets.max(&self.high)?,
            low: buckets.min(&self.low)?,
            close: buckets.last(&self.close)?,
            volume: buckets.sum(&self.volume)?,
        };

        debug!(
            from = self.len(),
            to = resampled.len(),
            freq,
            "resampled ohlcv"
        );
        Ok(resampled)
    }

    /// Median price `(high + low) / 2` per bar.
    #[must_use]
    pub fn median_prices(&self) -> Series<T> {
        (&self.high + &self.low).div_scalar(T::TWO)
    }

    /// Typical price `(high + low + close) / 3` per bar.
    #[must_use]
    pub fn typical_prices(&self) -> Series<T> {
        (&(&self.high + &self.low) + &self.close).div_scalar(<T as TaFloat>::from_usize(3))
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(bound = "T: TaFloat")]
struct RawOhlcv<T: TaFloat> {
    index: TimeIndex,
    open: Vec<T>,
    high: Vec<T>,
    low: Vec<T>,
    close: Vec<T>,
    volume: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T: TaFloat> TryFrom<RawOhlcv<T>> for OhlcvSeries<T> {
    type Error = IndicatorError;

    fn try_from(raw: RawOhlcv<T>) -> Result<Self> {
        Self::from_columns(raw.index, raw.open, raw.high, raw.low, raw.close, raw.volume)
    }
}

#[cfg(feature = "serde")]
impl<T: TaFloat> From<OhlcvSeries<T>> for RawOhlcv<T> {
    fn from(ohlcv: OhlcvSeries<T>) -> Self {
        Self {
            index: ohlcv.index,
            open: ohlcv.open.into_vec(),
            high: ohlcv.high.into_vec(),
            low: ohlcv.low.into_vec(),
            close: ohlcv.close.into_vec(),
            volume: ohlcv.volume.into_vec(),
        }
    }
}
