//! Know Sure Thing (KST) oscillator.
//!
//! A weighted sum of four smoothed rates of change over increasing lookbacks.

use std::marker::PhantomData;

use fta_core::{Indicator, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::roc::roc;
use crate::trend::sma;

/// Smoothing window applied to every ROC and to the signal line.
const SMOOTHING: usize = 10;

/// Output of the KST calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct KstOutput<T: TaFloat> {
    /// The KST line.
    pub k: Series<T>,
    /// 10-bar SMA of the KST line.
    pub signal: Series<T>,
}

/// Know Sure Thing over rate-of-change lookbacks `r1..r4`.
///
/// `k = SMA(ROC(r1)) + 2 SMA(ROC(r2)) + 3 SMA(ROC(r3)) + 4 SMA(ROC(r4))`
/// with 10-bar SMAs, and `signal = SMA(k, 10)`.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`](fta_core::IndicatorError::InvalidWindow)
/// if any lookback is zero.
pub fn kst<T: TaFloat>(
    series: &Series<T>,
    r1: usize,
    r2: usize,
    r3: usize,
    r4: usize,
) -> Result<KstOutput<T>> {
    let smoothed = |period| -> Result<Series<T>> { sma(&roc(series, period)?, SMOOTHING) };

    let roc1 = smoothed(r1)?;
    let roc2 = smoothed(r2)?.mul_scalar(T::TWO);
    let roc3 = smoothed(r3)?.mul_scalar(<T as TaFloat>::from_usize(3));
    let roc4 = smoothed(r4)?.mul_scalar(<T as TaFloat>::from_usize(4));

    let k = &(&(&roc1 + &roc2) + &roc3) + &roc4;
    let signal = sma(&k, SMOOTHING)?;

    Ok(KstOutput { k, signal })
}

/// Configuration for the KST indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KstConfig {
    /// Rate-of-change lookbacks, shortest first.
    pub periods: [usize; 4],
    /// Input column.
    pub column: PriceColumn,
}

impl Default for KstConfig {
    fn default() -> Self {
        Self::new(10, 15, 20, 30)
    }
}

impl KstConfig {
    /// Create a new KST configuration.
    pub fn new(r1: usize, r2: usize, r3: usize, r4: usize) -> Self {
        Self {
            periods: [r1, r2, r3, r4],
            column: PriceColumn::Close,
        }
    }

    /// Set the input column.
    pub fn with_column(mut self, column: PriceColumn) -> Self {
        self.column = column;
        self
    }
}

/// Know Sure Thing indicator.
#[derive(Debug, Clone)]
pub struct Kst<T: TaFloat> {
    config: KstConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Kst<T> {
    type Output = KstOutput<T>;
    type Config = KstConfig;

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
        let longest = self.config.periods.iter().copied().max().unwrap_or(0);
        longest + 2 * SMOOTHING - 1
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "kst", len = data.len(), "calculate");
        let [r1, r2, r3, r4] = self.config.periods;
        kst(data.column(self.config.column), r1, r2, r3, r4)
    }
}
