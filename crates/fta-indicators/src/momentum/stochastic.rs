//! Stochastic Oscillator (STOCH) and its smoothed form (STOCHD).
//!
//! The oscillator places the close inside the high-low range of the
//! lookback window, as a fraction in `[0, 1]`.

use std::marker::PhantomData;

use fta_core::{Indicator, OhlcvSeries, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::trend::sma;
use crate::{check_lengths, check_period};

/// Stochastic %K as a fraction: `(close - lowest low) / (highest high - lowest low)`.
///
/// A flat window (highest high equal to lowest low) yields NaN.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`](fta_core::IndicatorError::InvalidWindow)
/// if `period == 0`, or
/// [`IndicatorError::LengthMismatch`](fta_core::IndicatorError::LengthMismatch)
/// if the inputs differ in length.
///
/// # Example
///
/// ```
/// use fta_core::Series;
/// use fta_indicators::momentum::stoch;
///
/// let high: Series<f64> = vec![10.0, 12.0, 11.0].into();
/// let low: Series<f64> = vec![8.0, 9.0, 7.0].into();
/// let close: Series<f64> = vec![9.0, 11.0, 10.0].into();
///
/// let k = stoch(&high, &low, &close, 3).unwrap();
/// assert_eq!(k.as_slice(), &[0.5, 0.75, 0.6]);
/// ```
pub fn stoch<T: TaFloat>(
    high: &Series<T>,
    low: &Series<T>,
    close: &Series<T>,
    period: usize,
) -> Result<Series<T>> {
    check_period(period)?;
    check_lengths(close, &[high, low])?;

    let highest = high.rolling(period).max();
    let lowest = low.rolling(period).min();

    Ok(&(close - &lowest) / &(&highest - &lowest))
}

/// Stochastic %D: the `period`-bar SMA of [`stoch`] over `stoch_period`.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`](fta_core::IndicatorError::InvalidWindow)
/// if either period is zero, or
/// [`IndicatorError::LengthMismatch`](fta_core::IndicatorError::LengthMismatch)
/// if the inputs differ in length.
pub fn stochd<T: TaFloat>(
    high: &Series<T>,
    low: &Series<T>,
    close: &Series<T>,
    period: usize,
    stoch_period: usize,
) -> Result<Series<T>> {
    check_period(period)?;
    sma(&stoch(high, low, close, stoch_period)?, period)
}

/// Configuration for the STOCH indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StochConfig {
    /// High-low lookback.
    pub period: usize,
}

impl Default for StochConfig {
    fn default() -> Self {
        Self::new(14)
    }
}

impl StochConfig {
    /// Create a new STOCH configuration.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

/// Stochastic Oscillator indicator.
#[derive(Debug, Clone)]
pub struct Stoch<T: TaFloat> {
    config: StochConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Stoch<T> {
    type Output = Series<T>;
    type Config = StochConfig;

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
        trace!(indicator = "stoch", len = data.len(), "calculate");
        stoch(data.high(), data.low(), data.close(), self.config.period)
    }
}

/// Configuration for the STOCHD indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StochDConfig {
    /// Smoothing window.
    pub period: usize,
    /// High-low lookback of the underlying oscillator.
    pub stoch_period: usize,
}

impl Default for StochDConfig {
    fn default() -> Self {
        Self::new(3, 14)
    }
}

impl StochDConfig {
    /// Create a new STOCHD configuration.
    pub fn new(period: usize, stoch_period: usize) -> Self {
        Self {
            period,
            stoch_period,
        }
    }
}

/// Smoothed Stochastic Oscillator indicator.
#[derive(Debug, Clone)]
pub struct StochD<T: TaFloat> {
    config: StochDConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for StochD<T> {
    type Output = Series<T>;
    type Config = StochDConfig;

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
        self.config.stoch_period + self.config.period - 1
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "stochd", len = data.len(), "calculate");
        stochd(
            data.high(),
            data.low(),
            data.close(),
            self.config.period,
            self.config.stoch_period,
        )
    }
}
