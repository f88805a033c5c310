//! Connors RSI (CRSI).
//!
//! The average of three components: a short RSI of price, an RSI of the
//! up/down streak length, and the rate of change over a long lookback.

use std::marker::PhantomData;

use fta_core::{Indicator, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::roc::roc;
use super::rsi::rsi;

/// Signed length of the current run of rising or falling closes.
///
/// A rise extends a positive streak or starts a new one at +1, a fall
/// extends a negative streak or starts one at -1, and an unchanged (or
/// missing) close resets the streak to 0. The first bar is 0.
///
/// # Example
///
/// ```
/// use fta_core::Series;
/// use fta_indicators::momentum::streak;
///
/// let closes: Series<f64> = vec![1.0, 2.0, 3.0, 2.0, 1.0, 1.0, 2.0].into();
/// assert_eq!(streak(&closes).as_slice(), &[0.0, 1.0, 2.0, -1.0, -2.0, 0.0, 1.0]);
/// ```
#[must_use]
pub fn streak<T: TaFloat>(series: &Series<T>) -> Series<T> {
    let data = series.as_slice();
    let mut result = Vec::with_capacity(data.len());
    let mut current = T::ZERO;

    for (i, &close) in data.iter().enumerate() {
        if i > 0 {
            let prev = data[i - 1];
            current = if close > prev {
                if current > T::ZERO {
                    current + T::ONE
                } else {
                    T::ONE
                }
            } else if close < prev {
                if current < T::ZERO {
                    current - T::ONE
                } else {
                    -T::ONE
                }
            } else {
                T::ZERO
            };
        }
        result.push(current);
    }

    series.with_values(result)
}

/// Connors RSI: `(RSI(close, period) + RSI(streak, period_up_down) + ROC(close, period_roc)) / 3`.
///
/// Bars where the rate of change is undefined count it as 0.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`](fta_core::IndicatorError::InvalidWindow)
/// if any period is zero.
pub fn crsi<T: TaFloat>(
    close: &Series<T>,
    period: usize,
    period_up_down: usize,
    period_roc: usize,
    adjust: bool,
) -> Result<Series<T>> {
    let price_rsi = rsi(close, period, adjust)?;
    let streak_rsi = rsi(&streak(close), period_up_down, adjust)?;
    let mut change = roc(close, period_roc)?;
    change.fillna(T::ZERO);

    let three = <T as TaFloat>::from_usize(3);
    Ok((&(&price_rsi + &streak_rsi) + &change).div_scalar(three))
}

/// Configuration for the CRSI indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CrsiConfig {
    /// Price RSI period.
    pub period: usize,
    /// Streak RSI period.
    pub period_up_down: usize,
    /// Rate-of-change lookback.
    pub period_roc: usize,
    /// Normalize early weights by their partial sum.
    pub adjust: bool,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for CrsiConfig {
    fn default() -> Self {
        Self::new(3, 2, 100)
    }
}

impl CrsiConfig {
    /// Create a new CRSI configuration.
    pub fn new(period: usize, period_up_down: usize, period_roc: usize) -> Self {
        Self {
            period,
            period_up_down,
            period_roc,
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

/// Connors RSI indicator.
#[derive(Debug, Clone)]
pub struct Crsi<T: TaFloat> {
    config: CrsiConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Crsi<T> {
    type Output = Series<T>;
    type Config = CrsiConfig;

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
        let c = &self.config;
        c.period.max(c.period_up_down).max(c.period_roc) + 1
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "crsi", len = data.len(), "calculate");
        crsi(
            data.column(self.config.column),
            self.config.period,
            self.config.period_up_down,
            self.config.period_roc,
            self.config.adjust,
        )
    }
}
