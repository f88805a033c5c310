//! Stochastic RSI indicator.
//!
//! Places each RSI value inside the range the RSI covers over the whole
//! input, then smooths the result.

use std::marker::PhantomData;

use fta_core::{Indicator, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::rsi::rsi;
use crate::check_period;
use crate::trend::sma;

/// Stochastic RSI: `SMA((RSI - min RSI) / (max RSI - min RSI), stoch_period)`.
///
/// The minimum and maximum are taken over the entire RSI series, not a
/// rolling window, so appending bars can change earlier values. A constant
/// RSI yields NaN.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`](fta_core::IndicatorError::InvalidWindow)
/// if either period is zero.
pub fn stoch_rsi<T: TaFloat>(
    series: &Series<T>,
    rsi_period: usize,
    stoch_period: usize,
    adjust: bool,
) -> Result<Series<T>> {
    check_period(stoch_period)?;

    let rsi = rsi(series, rsi_period, adjust)?;
    let (lowest, highest) = (rsi.min(), rsi.max());
    let scaled = rsi.map(|v| (v - lowest) / (highest - lowest));

    sma(&scaled, stoch_period)
}

/// Configuration for the StochRSI indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StochRsiConfig {
    /// RSI period.
    pub rsi_period: usize,
    /// Smoothing window.
    pub stoch_period: usize,
    /// Normalize early weights of the RSI averages.
    pub adjust: bool,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for StochRsiConfig {
    fn default() -> Self {
        Self::new(14, 14)
    }
}

impl StochRsiConfig {
    /// Create a new StochRSI configuration.
    pub fn new(rsi_period: usize, stoch_period: usize) -> Self {
        Self {
            rsi_period,
            stoch_period,
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

/// Stochastic RSI indicator.
#[derive(Debug, Clone)]
pub struct StochRsi<T: TaFloat> {
    config: StochRsiConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for StochRsi<T> {
    type Output = Series<T>;
    type Config = StochRsiConfig;

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
        self.config.rsi_period + self.config.stoch_period
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "stoch_rsi", len = data.len(), "calculate");
        stoch_rsi(
            data.column(self.config.column),
            self.config.rsi_period,
            self.config.stoch_period,
            self.config.adjust,
        )
    }
}
