//! Chaikin Oscillator.
//!
//! The momentum of the accumulation/distribution line, measured as the gap
//! between its fast and slow exponential averages.

use std::marker::PhantomData;

use fta_core::{Indicator, OhlcvSeries, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::adl::adl;
use crate::trend::ema;

const FAST_SPAN: usize = 3;
const SLOW_SPAN: usize = 10;

/// Chaikin oscillator: `EMA(ADL, 3) - EMA(ADL, 10)`.
///
/// # Errors
///
/// Returns [`IndicatorError::LengthMismatch`](fta_core::IndicatorError::LengthMismatch)
/// if the inputs differ in length.
pub fn chaikin<T: TaFloat>(
    high: &Series<T>,
    low: &Series<T>,
    close: &Series<T>,
    adjust: bool,
) -> Result<Series<T>> {
    let line = adl(high, low, close)?;
    let fast = ema(&line, FAST_SPAN, adjust)?;
    let slow = ema(&line, SLOW_SPAN, adjust)?;
    Ok(&fast - &slow)
}

/// Configuration for the Chaikin oscillator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChaikinConfig {
    /// Normalize early weights of both averages.
    pub adjust: bool,
}

impl Default for ChaikinConfig {
    fn default() -> Self {
        Self { adjust: true }
    }
}

impl ChaikinConfig {
    /// Create a new Chaikin configuration.
    pub fn new(adjust: bool) -> Self {
        Self { adjust }
    }
}

/// Chaikin Oscillator indicator.
#[derive(Debug, Clone)]
pub struct Chaikin<T: TaFloat> {
    config: ChaikinConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Chaikin<T> {
    type Output = Series<T>;
    type Config = ChaikinConfig;

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
        SLOW_SPAN
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "chaikin", len = data.len(), "calculate");
        chaikin(data.high(), data.low(), data.close(), self.config.adjust)
    }
}
