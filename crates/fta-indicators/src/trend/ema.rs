//! Exponential Moving Average (EMA) and Smoothed Simple Moving Average (SSMA).
//!
//! Both are exponentially weighted means and differ only in how the period
//! maps to the smoothing factor: EMA uses the period as a span,
//! `alpha = 2 / (period + 1)`, SSMA uses `alpha = 1 / period`.

use std::marker::PhantomData;

use fta_core::{Decay, Indicator, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::check_period;

/// Exponential moving average with span `period`.
///
/// With `adjust` the early values are normalized by the partial sum of the
/// decaying weights; otherwise the plain recursion
/// `y[i] = (1 - alpha) * y[i-1] + alpha * x[i]` seeded with the first value is used.
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
/// use fta_indicators::trend::ema;
///
/// let closes: Series<f64> = vec![1.0, 2.0, 3.0].into();
/// assert_eq!(ema(&closes, 3, false).unwrap().as_slice(), &[1.0, 1.5, 2.25]);
/// ```
pub fn ema<T: TaFloat>(series: &Series<T>, period: usize, adjust: bool) -> Result<Series<T>> {
    check_period(period)?;
    Ok(series
        .ewm(Decay::Span(period as f64))?
        .adjust(adjust)
        .mean())
}

/// Smoothed simple moving average, an exponential average with `alpha = 1 / period`.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`](fta_core::IndicatorError::InvalidWindow)
/// if `period == 0`.
pub fn ssma<T: TaFloat>(series: &Series<T>, period: usize, adjust: bool) -> Result<Series<T>> {
    check_period(period)?;
    Ok(series
        .ewm(Decay::Alpha(1.0 / period as f64))?
        .adjust(adjust)
        .mean())
}

/// Configuration for the EMA indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmaConfig {
    /// The span of the average.
    pub period: usize,
    /// Normalize early weights by their partial sum.
    pub adjust: bool,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for EmaConfig {
    fn default() -> Self {
        Self::new(9)
    }
}

impl EmaConfig {
    /// Create a new EMA configuration with the given period.
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

/// Exponential Moving Average indicator.
#[derive(Debug, Clone)]
pub struct Ema<T: TaFloat> {
    config: EmaConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Ema<T> {
    type Output = Series<T>;
    type Config = EmaConfig;

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
        trace!(indicator = "ema", len = data.len(), "calculate");
        ema(
            data.column(self.config.column),
            self.config.period,
            self.config.adjust,
        )
    }
}

/// Configuration for the SSMA indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SsmaConfig {
    /// Period, `alpha = 1 / period`.
    pub period: usize,
    /// Normalize early weights by their partial sum.
    pub adjust: bool,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for SsmaConfig {
    fn default() -> Self {
        Self::new(9)
    }
}

impl SsmaConfig {
    /// Create a new SSMA configuration with the given period.
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

/// Smoothed Simple Moving Average indicator.
#[derive(Debug, Clone)]
pub struct Ssma<T: TaFloat> {
    config: SsmaConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Ssma<T> {
    type Output = Series<T>;
    type Config = SsmaConfig;

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
        trace!(indicator = "ssma", len = data.len(), "calculate");
        ssma(
            data.column(self.config.column),
            self.config.period,
            self.config.adjust,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fta_core::IndicatorError;

    #[test]
    fn test_ema_default_config() {
        let config = EmaConfig::default();
        assert_eq!(config.period, 9);
        assert!(config.adjust);
    }

    #[test]
    fn test_ema_adjusted() {
        let closes: Series<f64> = vec![1.0, 2.0, 3.0].into();
        let result = ema(&closes, 3, true).unwrap();

        assert_relative_eq!(result[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(result[1], 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(result[2], 4.25 / 1.75, epsilon = 1e-12);
    }

    #[test]
    fn test_ema_first_value_is_seed() {
        let closes: Series<f64> = vec![42.0, 10.0, 11.0].into();
        for adjust in [true, false] {
            assert_eq!(ema(&closes, 5, adjust).unwrap()[0], 42.0);
        }
    }

    #[test]
    fn test_ema_period_one_is_identity() {
        let closes: Series<f64> = vec![3.0, 1.0, 4.0, 1.0, 5.0].into();
        let result = ema(&closes, 1, true).unwrap();

        assert_eq!(result.as_slice(), closes.as_slice());
    }

    #[test]
    fn test_ssma_matches_ema_with_equivalent_alpha() {
        // span 3 and 1 / 2 both give alpha = 0.5
        let closes: Series<f64> = vec![5.0, 3.0, 8.0, 1.0, 9.0, 2.0].into();
        let a = ssma(&closes, 2, true).unwrap();
        let b = ema(&closes, 3, true).unwrap();

        for i in 0..closes.len() {
            assert_relative_eq!(a[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_invalid_window() {
        let closes: Series<f64> = vec![1.0, 2.0].into();
        assert_eq!(
            ema(&closes, 0, true).unwrap_err(),
            IndicatorError::InvalidWindow(0)
        );
        assert_eq!(
            ssma(&closes, 0, true).unwrap_err(),
            IndicatorError::InvalidWindow(0)
        );
    }
}
