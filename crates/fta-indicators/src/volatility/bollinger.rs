//! Bollinger Bands and %B.
//!
//! Bollinger Bands are volatility bands placed above and below a moving average.

use std::marker::PhantomData;

use fta_core::window::deviation;
use fta_core::{Indicator, IndicatorError, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::trend::sma;
use crate::{check_lengths, check_period};

/// Output of the Bollinger Bands calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerOutput<T: TaFloat> {
    /// Upper band (ma + k * std).
    pub upper: Series<T>,
    /// Lower band (ma - k * std).
    pub lower: Series<T>,
}

/// Bollinger Bands around a supplied moving average.
///
/// The deviation at each bar is the sample standard deviation of the last
/// `period` values of `series` about `ma` at that bar. Undefined deviations
/// (the first bar) count as 0.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`] if `period == 0`,
/// [`IndicatorError::InvalidParameter`] if `multiplier` is negative or NaN,
/// or [`IndicatorError::LengthMismatch`] if the inputs differ in length.
///
/// # Example
///
/// ```
/// use fta_core::Series;
/// use fta_indicators::trend::sma;
/// use fta_indicators::volatility::bbands;
///
/// let closes: Series<f64> = vec![1.0, 3.0, 1.0, 3.0].into();
/// let ma = sma(&closes, 2).unwrap();
/// let bands = bbands(&closes, &ma, 2, 1.0).unwrap();
///
/// assert_eq!(bands.upper[0], 1.0);
/// assert!((bands.upper[3] - (2.0 + 2f64.sqrt())).abs() < 1e-12);
/// assert!((bands.lower[3] - (2.0 - 2f64.sqrt())).abs() < 1e-12);
/// ```
pub fn bbands<T: TaFloat>(
    series: &Series<T>,
    ma: &Series<T>,
    period: usize,
    multiplier: f64,
) -> Result<BollingerOutput<T>> {
    check_period(period)?;
    if !(multiplier >= 0.0) {
        return Err(IndicatorError::invalid_parameter(
            "multiplier",
            multiplier,
            "multiplier >= 0",
        ));
    }
    check_lengths(series, &[ma])?;

    let mut std = series
        .rolling(period)
        .apply_indexed(|i, window| deviation(window, ma[i], 1));
    std.fillna(T::ZERO);
    let width = std.mul_scalar(T::from_f64_lossy(multiplier));

    Ok(BollingerOutput {
        upper: ma + &width,
        lower: ma - &width,
    })
}

/// %B: the position of `series` between the bands, `(x - lower) / (upper - lower)`.
///
/// Where the bands coincide the result is NaN or infinite.
///
/// # Errors
///
/// Same as [`bbands`].
pub fn percent_b<T: TaFloat>(
    series: &Series<T>,
    ma: &Series<T>,
    period: usize,
    multiplier: f64,
) -> Result<Series<T>> {
    let bands = bbands(series, ma, period, multiplier)?;
    Ok(&(series - &bands.lower) / &(&bands.upper - &bands.lower))
}

/// Configuration for Bollinger Bands and %B.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BollingerConfig {
    /// Window of the moving average and the deviation.
    pub period: usize,
    /// Number of standard deviations for the bands.
    pub multiplier: f64,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl BollingerConfig {
    /// Create a new Bollinger Bands configuration.
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self {
            period,
            multiplier,
            column: PriceColumn::Close,
        }
    }

    /// Set the input column.
    pub fn with_column(mut self, column: PriceColumn) -> Self {
        self.column = column;
        self
    }
}

/// Bollinger Bands indicator around the SMA of the configured column.
#[derive(Debug, Clone)]
pub struct BollingerBands<T: TaFloat> {
    config: BollingerConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for BollingerBands<T> {
    type Output = BollingerOutput<T>;
    type Config = BollingerConfig;

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
        trace!(indicator = "bbands", len = data.len(), "calculate");
        let series = data.column(self.config.column);
        let ma = sma(series, self.config.period)?;
        bbands(series, &ma, self.config.period, self.config.multiplier)
    }
}

/// %B indicator against Bollinger Bands around the SMA of the configured column.
#[derive(Debug, Clone)]
pub struct PercentB<T: TaFloat> {
    config: BollingerConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for PercentB<T> {
    type Output = Series<T>;
    type Config = BollingerConfig;

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
        trace!(indicator = "percent_b", len = data.len(), "calculate");
        let series = data.column(self.config.column);
        let ma = sma(series, self.config.period)?;
        percent_b(series, &ma, self.config.period, self.config.multiplier)
    }
}
