//! Simple Moving Average (SMA) and Simple Moving Median (SMM).

use std::marker::PhantomData;

use fta_core::{Indicator, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::check_period;

/// Simple moving average: the arithmetic mean of each trailing window.
///
/// Windows at the start of the series that are shorter than `period` are
/// averaged over the bars available so far.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`](fta_core::IndicatorError::InvalidWindow)
/// if `period == 0`.
///
/// # Example
///
/// ```
/// use fta_core::Series;
/// use fta_indicators::trend::sma;
///
/// let closes: Series<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0].into();
/// assert_eq!(sma(&closes, 3).unwrap().as_slice(), &[1.0, 1.5, 2.0, 3.0, 4.0]);
/// ```
pub fn sma<T: TaFloat>(series: &Series<T>, period: usize) -> Result<Series<T>> {
    check_period(period)?;
    Ok(series.rolling(period).mean())
}

/// Simple moving median: the median of each trailing window.
///
/// Less sensitive to outliers than [`sma`].
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`](fta_core::IndicatorError::InvalidWindow)
/// if `period == 0`.
pub fn smm<T: TaFloat>(series: &Series<T>, period: usize) -> Result<Series<T>> {
    check_period(period)?;
    Ok(series.rolling(period).median())
}

/// Configuration for the SMA indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmaConfig {
    /// The window size for the moving average.
    pub period: usize,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for SmaConfig {
    fn default() -> Self {
        Self::new(41)
    }
}

impl SmaConfig {
    /// Create a new SMA configuration with the given period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            column: PriceColumn::Close,
        }
    }

    /// Set the input column.
    pub fn with_column(mut self, column: PriceColumn) -> Self {
        self.column = column;
        self
    }
}

/// Simple Moving Average indicator.
///
/// # Formula
///
/// SMA = (P1 + P2 + ... + Pn) / n
#[derive(Debug, Clone)]
pub struct Sma<T: TaFloat> {
    config: SmaConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Sma<T> {
    type Output = Series<T>;
    type Config = SmaConfig;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn min_periods(&self) -> usize {
        self.config.period
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "sma", len = data.len(), "calculate");
        sma(data.column(self.config.column), self.config.period)
    }
}

/// Configuration for the SMM indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmmConfig {
    /// The window size for the moving median.
    pub period: usize,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for SmmConfig {
    fn default() -> Self {
        Self::new(9)
    }
}

impl SmmConfig {
    /// Create a new SMM configuration with the given period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            column: PriceColumn::Close,
        }
    }

    /// Set the input column.
    pub fn with_column(mut self, column: PriceColumn) -> Self {
        self.column = column;
        self
    }
}

/// Simple Moving Median indicator.
#[derive(Debug, Clone)]
pub struct Smm<T: TaFloat> {
    config: SmmConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Smm<T> {
    type Output = Series<T>;
    type Config = SmmConfig;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn min_periods(&self) -> usize {
        self.config.period
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "smm", len = data.len(), "calculate");
        smm(data.column(self.config.column), self.config.period)
    }
}
