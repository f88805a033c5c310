//! Volume Zone Oscillator (VZO).
//!
//! Relates volume on up bars minus volume on down bars to total volume,
//! both exponentially smoothed.

use std::marker::PhantomData;

use fta_core::{Decay, Indicator, OhlcvSeries, PriceColumn, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{check_lengths, check_period};

/// Volume zone oscillator: `100 * EMA(sign(Δprice) * volume) / EMA(volume)`.
///
/// The sign of the first bar, which has no change, is 0. Both averages use
/// span `period`.
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
/// use fta_indicators::momentum::vzo;
///
/// let price: Series<f64> = vec![1.0, 2.0, 3.0, 4.0].into();
/// let volume: Series<f64> = vec![10.0, 10.0, 10.0, 10.0].into();
/// let result = vzo(&price, &volume, 1, true).unwrap();
///
/// assert_eq!(result.as_slice(), &[0.0, 100.0, 100.0, 100.0]);
/// ```
pub fn vzo<T: TaFloat>(
    price: &Series<T>,
    volume: &Series<T>,
    period: usize,
    adjust: bool,
) -> Result<Series<T>> {
    check_period(period)?;
    check_lengths(price, &[volume])?;

    let signed = &price.diff(1).sign() * volume;
    let decay = Decay::Span(period as f64);

    let directional = signed.ewm(decay)?.adjust(adjust).mean();
    let total = volume.ewm(decay)?.adjust(adjust).mean();

    Ok((&directional / &total).mul_scalar(T::HUNDRED))
}

/// Configuration for the VZO indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VzoConfig {
    /// Span of both averages.
    pub period: usize,
    /// Normalize early weights by their partial sum.
    pub adjust: bool,
    /// Price column.
    pub column: PriceColumn,
}

impl Default for VzoConfig {
    fn default() -> Self {
        Self::new(14)
    }
}

impl VzoConfig {
    /// Create a new VZO configuration.
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

    /// Set the price column.
    pub fn with_column(mut self, column: PriceColumn) -> Self {
        self.column = column;
        self
    }
}

/// Volume Zone Oscillator indicator over a price column and the volume column.
#[derive(Debug, Clone)]
pub struct Vzo<T: TaFloat> {
    config: VzoConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Vzo<T> {
    type Output = Series<T>;
    type Config = VzoConfig;

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
        trace!(indicator = "vzo", len = data.len(), "calculate");
        vzo(
            data.column(self.config.column),
            data.volume(),
            self.config.period,
            self.config.adjust,
        )
    }
}
