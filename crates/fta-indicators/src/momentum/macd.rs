//! Moving Average Convergence Divergence (MACD) indicator.
//!
//! MACD is a trend-following momentum indicator that shows the relationship
//! between two exponential moving averages of prices.

use std::marker::PhantomData;

use fta_core::{Decay, Indicator, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output of the MACD calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput<T: TaFloat> {
    /// Fast EMA minus slow EMA.
    pub macd: Series<T>,
    /// EMA of the MACD line.
    pub signal: Series<T>,
}

impl<T: TaFloat> MacdOutput<T> {
    /// MACD minus signal.
    #[must_use]
    pub fn histogram(&self) -> Series<T> {
        &self.macd - &self.signal
    }
}

/// MACD with exponential spans `fast`, `slow` and `signal`.
///
/// The spans are passed to the exponential recursion as they are and need
/// not be integers.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidParameter`](fta_core::IndicatorError::InvalidParameter)
/// if any span is below 1.
///
/// # Example
///
/// ```
/// use fta_core::Series;
/// use fta_indicators::momentum::macd;
///
/// let closes: Series<f64> = vec![5.0; 40].into();
/// let out = macd(&closes, 12.0, 26.0, 9.0, true).unwrap();
///
/// assert_eq!(out.macd[39], 0.0);
/// assert_eq!(out.signal[39], 0.0);
/// ```
pub fn macd<T: TaFloat>(
    series: &Series<T>,
    fast: f64,
    slow: f64,
    signal: f64,
    adjust: bool,
) -> Result<MacdOutput<T>> {
    let fast_ema = series.ewm(Decay::Span(fast))?.adjust(adjust).mean();
    let slow_ema = series.ewm(Decay::Span(slow))?.adjust(adjust).mean();

    let macd = &fast_ema - &slow_ema;
    let signal = macd.ewm(Decay::Span(signal))?.adjust(adjust).mean();

    Ok(MacdOutput { macd, signal })
}

/// Configuration for the MACD indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MacdConfig {
    /// Fast EMA span.
    pub fast: f64,
    /// Slow EMA span.
    pub slow: f64,
    /// Signal line EMA span.
    pub signal: f64,
    /// Normalize early weights by their partial sum.
    pub adjust: bool,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self::new(12.0, 26.0, 9.0)
    }
}

impl MacdConfig {
    /// Create a new MACD configuration.
    pub fn new(fast: f64, slow: f64, signal: f64) -> Self {
        Self {
            fast,
            slow,
            signal,
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

/// MACD indicator.
#[derive(Debug, Clone)]
pub struct Macd<T: TaFloat> {
    config: MacdConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Macd<T> {
    type Output = MacdOutput<T>;
    type Config = MacdConfig;

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
        (self.config.slow.max(self.config.fast) + self.config.signal).ceil() as usize
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "macd", len = data.len(), "calculate");
        macd(
            data.column(self.config.column),
            self.config.fast,
            self.config.slow,
            self.config.signal,
            self.config.adjust,
        )
    }
}
