//! Rate of Change (ROC) indicator.
//!
//! ROC measures the percentage change in price from n periods ago.

use std::marker::PhantomData;

use fta_core::{Indicator, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::check_period;

/// Percentage change over `period` bars: `100 * (x[i] - x[i-period]) / x[i-period]`.
///
/// The first `period` values are NaN. A zero reference price yields an
/// infinite or NaN value.
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
/// use fta_indicators::momentum::roc;
///
/// let closes: Series<f64> = vec![100.0, 110.0, 121.0].into();
/// let result = roc(&closes, 1).unwrap();
///
/// assert!(result[0].is_nan());
/// assert_eq!(result[2], 10.0);
/// ```
pub fn roc<T: TaFloat>(series: &Series<T>, period: usize) -> Result<Series<T>> {
    check_period(period)?;
    let shifted = series.shift(period as isize);
    Ok((&series.diff(period) / &shifted).mul_scalar(T::HUNDRED))
}

/// Configuration for ROC.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RocConfig {
    /// Lookback period.
    pub period: usize,
    /// Input column.
    pub column: PriceColumn,
}

impl Default for RocConfig {
    fn default() -> Self {
        Self::new(12)
    }
}

impl RocConfig {
    /// Create a new configuration.
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

/// Rate of Change indicator.
///
/// # Formula
///
/// ROC = 100 * (Close - Close_n) / Close_n
#[derive(Debug, Clone)]
pub struct Roc<T: TaFloat> {
    config: RocConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Roc<T> {
    type Output = Series<T>;
    type Config = RocConfig;

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
        trace!(indicator = "roc", len = data.len(), "calculate");
        roc(data.column(self.config.column), self.config.period)
    }
}
