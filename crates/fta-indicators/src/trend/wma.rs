//! Weighted Moving Average (WMA) and Hull Moving Average (HMA).

use std::marker::PhantomData;

use fta_core::{Indicator, IndicatorError, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::check_period;

/// Linearly weighted moving average.
///
/// The most recent bar of a full window has weight `period`, the oldest
/// weight 1, and the sum is divided by `period * (period + 1) / 2`.
///
/// Windows shorter than `period` at the start of the series use the weights
/// `1..=n` of their `n` bars but keep the full-period divisor, so the first
/// `period - 1` outputs are biased towards zero. Discard them when a fully
/// formed average is needed.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`] if `period == 0`.
///
/// # Example
///
/// ```
/// use fta_core::Series;
/// use fta_indicators::trend::wma;
///
/// let closes: Series<f64> = vec![1.0, 2.0, 3.0].into();
/// // (1*1 + 2*2 + 3*3) / 6
/// assert_eq!(wma(&closes, 3).unwrap()[2], 14.0 / 6.0);
/// ```
pub fn wma<T: TaFloat>(series: &Series<T>, period: usize) -> Result<Series<T>> {
    check_period(period)?;

    let divisor = <T as TaFloat>::from_usize(period * (period + 1) / 2);
    Ok(series.rolling(period).apply(|window| {
        let dot = window
            .iter()
            .enumerate()
            .fold(T::ZERO, |acc, (k, &x)| acc + x * <T as TaFloat>::from_usize(k + 1));
        dot / divisor
    }))
}

/// Hull moving average: `WMA(2 * WMA(period / 2) - WMA(period), floor(sqrt(period)))`.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`] if `period == 0`, or
/// [`IndicatorError::InvalidParameter`] if `period < 2`.
pub fn hma<T: TaFloat>(series: &Series<T>, period: usize) -> Result<Series<T>> {
    check_period(period)?;
    if period < 2 {
        return Err(IndicatorError::invalid_parameter(
            "period",
            period,
            "period >= 2",
        ));
    }

    let half = wma(series, period / 2)?;
    let full = wma(series, period)?;
    let deltas = &half.mul_scalar(T::TWO) - &full;

    // isqrt: floor(sqrt(period))
    let mut root = (period as f64).sqrt() as usize;
    while root * root > period {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= period {
        root += 1;
    }

    wma(&deltas, root)
}

/// Configuration for the WMA indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WmaConfig {
    /// The window size.
    pub period: usize,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for WmaConfig {
    fn default() -> Self {
        Self::new(9)
    }
}

impl WmaConfig {
    /// Create a new WMA configuration with the given period.
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

/// Weighted Moving Average indicator.
///
/// # Formula
///
/// WMA = (n*P_n + (n-1)*P_{n-1} + ... + 1*P_1) / (n*(n+1)/2)
#[derive(Debug, Clone)]
pub struct Wma<T: TaFloat> {
    config: WmaConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Wma<T> {
    type Output = Series<T>;
    type Config = WmaConfig;

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
        trace!(indicator = "wma", len = data.len(), "calculate");
        wma(data.column(self.config.column), self.config.period)
    }
}

/// Configuration for the HMA indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HmaConfig {
    /// The window size.
    pub period: usize,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for HmaConfig {
    fn default() -> Self {
        Self::new(16)
    }
}

impl HmaConfig {
    /// Create a new HMA configuration with the given period.
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

/// Hull Moving Average indicator.
#[derive(Debug, Clone)]
pub struct Hma<T: TaFloat> {
    config: HmaConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Hma<T> {
    type Output = Series<T>;
    type Config = HmaConfig;

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
        // last bar of the outer window must sit on a full inner window
        self.config.period + (self.config.period as f64).sqrt() as usize - 1
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "hma", len = data.len(), "calculate");
        hma(data.column(self.config.column), self.config.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wma_full_windows() {
        let closes: Series<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0].into();
        let result = wma(&closes, 3).unwrap();

        assert_relative_eq!(result[2], 14.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(result[3], 20.0 / 6.0, epsilon = 1e-12); // 2 + 6 + 12
        assert_relative_eq!(result[4], 26.0 / 6.0, epsilon = 1e-12); // 3 + 8 + 15
    }

    #[test]
    fn test_wma_short_windows_keep_full_divisor() {
        let closes: Series<f64> = vec![6.0, 6.0, 6.0, 6.0].into();
        let result = wma(&closes, 3).unwrap();

        // weights 1 and 1+2 over a divisor of 6
        assert_relative_eq!(result[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(result[1], 3.0, epsilon = 1e-12);
        assert_relative_eq!(result[2], 6.0, epsilon = 1e-12);
        assert_relative_eq!(result[3], 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wma_nan_window() {
        let closes: Series<f64> = vec![1.0, f64::NAN, 3.0, 4.0, 5.0].into();
        let result = wma(&closes, 2).unwrap();

        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_relative_eq!(result[3], 11.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hma_constant_after_warmup() {
        let closes: Series<f64> = vec![10.0; 40].into();
        let result = hma(&closes, 16).unwrap();
        let hma = Hma::<f64>::new(HmaConfig::default());

        assert_eq!(result.len(), 40);
        for &v in &result.as_slice()[hma.min_periods()..] {
            assert_relative_eq!(v, 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_hma_tracks_linear_trend() {
        // the Hull average removes the lag of a linear trend
        let closes: Series<f64> = (0..50).map(|i| i as f64).collect();
        let result = hma(&closes, 9).unwrap();

        assert_relative_eq!(result[49], 49.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hma_rejects_tiny_period() {
        let closes: Series<f64> = vec![1.0, 2.0].into();
        assert!(matches!(
            hma(&closes, 1),
            Err(IndicatorError::InvalidParameter { name: "period", .. })
        ));
        assert_eq!(hma(&closes, 0).unwrap_err(), IndicatorError::InvalidWindow(0));
    }
}
