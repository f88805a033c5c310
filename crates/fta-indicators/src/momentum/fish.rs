//! Fisher Transform (FISH).
//!
//! Maps the position of the median price inside its recent range onto a
//! roughly Gaussian scale, making turning points stand out.

use std::marker::PhantomData;

use fta_core::{Decay, Indicator, OhlcvSeries, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{check_lengths, check_period};

/// Largest magnitude of the smoothed position fed into the logarithm.
const POSITION_LIMIT: f64 = 0.999;

/// Fisher Transform of the median price `(high + low) / 2`.
///
/// The median price is rescaled to `[-1, 1]` against its rolling `period`
/// range and smoothed with a span-5 exponential average. On bars whose range
/// is flat the smoothed position is 0. The smoothed value `x` is transformed
/// with `ln((1 + x) / (1 - x))` and smoothed again with span 3.
///
/// Unlike the plain Fisher transform, `x` is first limited to
/// `[-0.999, 0.999]`. The first bar of a trend sits exactly on its range
/// boundary, where the plain transform is infinite.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidWindow`](fta_core::IndicatorError::InvalidWindow)
/// if `period == 0`, or
/// [`IndicatorError::LengthMismatch`](fta_core::IndicatorError::LengthMismatch)
/// if the inputs differ in length.
pub fn fish<T: TaFloat>(
    low: &Series<T>,
    high: &Series<T>,
    period: usize,
    adjust: bool,
) -> Result<Series<T>> {
    check_period(period)?;
    check_lengths(high, &[low])?;

    let median = (high + low).div_scalar(T::TWO);
    let window = median.rolling(period);
    let lowest = window.min();
    let highest = window.max();

    let range = &highest - &lowest;

    let position = (&(&median - &lowest) / &range)
        .mul_scalar(T::TWO)
        .sub_scalar(T::ONE);

    let mut smooth = position.ewm(Decay::Span(5.0))?.adjust(adjust).mean();
    smooth.fillna(T::ZERO);
    for (x, &r) in smooth.as_mut_slice().iter_mut().zip(range.iter()) {
        if r == T::ZERO {
            *x = T::ZERO;
        }
    }

    let bound = T::from_f64_lossy(POSITION_LIMIT);
    let fisher = smooth.map(|x| {
        let x = x.max(-bound).min(bound);
        ((T::ONE + x) / (T::ONE - x)).ln()
    });
    Ok(fisher.ewm(Decay::Span(3.0))?.adjust(adjust).mean())
}

/// Configuration for the FISH indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FishConfig {
    /// Range lookback.
    pub period: usize,
    /// Normalize early weights of both smoothing passes.
    pub adjust: bool,
}

impl Default for FishConfig {
    fn default() -> Self {
        Self::new(10)
    }
}

impl FishConfig {
    /// Create a new FISH configuration.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            adjust: true,
        }
    }

    /// Set the adjust flag.
    pub fn with_adjust(mut self, adjust: bool) -> Self {
        self.adjust = adjust;
        self
    }
}

/// Fisher Transform indicator over the low and high columns.
#[derive(Debug, Clone)]
pub struct Fish<T: TaFloat> {
    config: FishConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Fish<T> {
    type Output = Series<T>;
    type Config = FishConfig;

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
        trace!(indicator = "fish", len = data.len(), "calculate");
        fish(data.low(), data.high(), self.config.period, self.config.adjust)
    }
}
