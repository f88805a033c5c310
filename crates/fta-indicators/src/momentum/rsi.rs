//! Relative Strength Index (RSI) indicator.
//!
//! RSI is a momentum oscillator that measures the speed and magnitude
//! of recent price changes to evaluate overbought or oversold conditions.

use std::marker::PhantomData;

use fta_core::{Decay, Indicator, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::check_period;

/// Relative strength index with Wilder smoothing.
///
/// Bar-to-bar changes are split into gains and losses, each smoothed with
/// `alpha = 1 / period` normalized by the cumulative weight. The first bar
/// has no change and is NaN. Where the average loss is zero the index is 100.
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
/// use fta_indicators::momentum::rsi;
///
/// let closes: Series<f64> = vec![1.0, 2.0, 1.0].into();
/// let result = rsi(&closes, 2, true).unwrap();
///
/// assert!(result[0].is_nan());
/// assert_eq!(result[1], 100.0);
/// assert!((result[2] - 100.0 / 3.0).abs() < 1e-9);
/// ```
pub fn rsi<T: TaFloat>(series: &Series<T>, period: usize, adjust: bool) -> Result<Series<T>> {
    check_period(period)?;

    let delta = series.diff(1);
    // NaN stays NaN
    let up = delta.map(|d| if d < T::ZERO { T::ZERO } else { d });
    let down = delta.map(|d| if d > T::ZERO { T::ZERO } else { -d });

    let decay = Decay::Alpha(1.0 / period as f64);
    let gain = up.ewm(decay)?.adjust(adjust).bias(true).mean();
    let loss = down.ewm(decay)?.adjust(adjust).bias(true).mean();

    gain.zip_with(&loss, |g, l| {
        if g.is_nan() || l.is_nan() {
            T::NAN
        } else if l == T::ZERO {
            T::HUNDRED
        } else {
            T::HUNDRED - T::HUNDRED / (T::ONE + g / l)
        }
    })
}

/// Configuration for the RSI indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RsiConfig {
    /// The lookback period.
    pub period: usize,
    /// Normalize early weights by their partial sum.
    pub adjust: bool,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self::new(14)
    }
}

impl RsiConfig {
    /// Create a new RSI configuration with the given period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            adjust: true,
            column: PriceColumn::Close,
        }
    }

    /// Set the adjust flag.
    pub fn with_adjust(mut self, adjust: bool) -> Self {
        self.adjust = adjust;
        self
    }

    /// Set the input column.
    pub fn with_column(mut self, column: PriceColumn) -> Self {
        self.column = column;
        self
    }
}

/// Relative Strength Index indicator.
///
/// # Formula
///
/// RSI = 100 - 100 / (1 + RS), RS = average gain / average loss
#[derive(Debug, Clone)]
pub struct Rsi<T: TaFloat> {
    config: RsiConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Rsi<T> {
    type Output = Series<T>;
    type Config = RsiConfig;

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
        self.config.period + 1
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "rsi", len = data.len(), "calculate");
        rsi(
            data.column(self.config.column),
            self.config.period,
            self.config.adjust,
        )
    }
}
