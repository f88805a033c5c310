//! Parabolic Stop And Reverse (PSAR).
//!
//! A trailing stop that follows price. In an uptrend the stop rises towards
//! the highest high seen since the trend began (the extreme point), in a
//! downtrend it falls towards the lowest low. Each new extreme raises the
//! acceleration factor by `iaf`, up to `maxaf`. When price crosses the stop
//! the trend reverses: the stop jumps to the previous extreme point and the
//! acceleration factor resets.

use std::marker::PhantomData;

use fta_core::{Indicator, IndicatorError, OhlcvSeries, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::check_lengths;

/// Output of the PSAR calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct PsarOutput<T: TaFloat> {
    /// Stop value for every bar.
    pub psar: Series<T>,
    /// Stop value on bars in an uptrend, zero elsewhere.
    pub bull: Series<T>,
    /// Stop value on bars in a downtrend, zero elsewhere.
    pub bear: Series<T>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trend {
    Bull,
    Bear,
}

/// Parabolic SAR over high, low and close prices.
///
/// The first two bars copy the close price and carry no trend output. From
/// the third bar on, each bar is either in the bull or the bear output; the
/// other is zero, so the non-zero entries of each mark the stops of one side.
///
/// # Errors
///
/// Returns [`IndicatorError::InvalidParameter`] if `iaf <= 0` or
/// `maxaf < iaf`, and [`IndicatorError::LengthMismatch`] if the inputs
/// differ in length.
///
/// # Example
///
/// ```
/// use fta_core::Series;
/// use fta_indicators::trend::psar;
///
/// let high: Series<f64> = vec![10.0, 12.0, 11.0, 13.0, 9.0].into();
/// let low: Series<f64> = vec![8.0, 9.0, 8.0, 10.0, 7.0].into();
/// let close: Series<f64> = vec![9.0, 11.0, 9.0, 12.0, 8.0].into();
///
/// let out = psar(&high, &low, &close, 0.02, 0.2).unwrap();
/// assert_eq!(out.psar.as_slice(), &[9.0, 11.0, 10.0, 8.0, 13.0]);
/// assert_eq!(out.bull.as_slice(), &[0.0, 0.0, 0.0, 8.0, 0.0]);
/// assert_eq!(out.bear.as_slice(), &[0.0, 0.0, 10.0, 0.0, 13.0]);
/// ```
pub fn psar<T: TaFloat>(
    high: &Series<T>,
    low: &Series<T>,
    close: &Series<T>,
    iaf: f64,
    maxaf: f64,
) -> Result<PsarOutput<T>> {
    if !(iaf > 0.0) {
        return Err(IndicatorError::invalid_parameter("iaf", iaf, "iaf > 0"));
    }
    if !(maxaf >= iaf) {
        return Err(IndicatorError::invalid_parameter(
            "maxaf",
            maxaf,
            "maxaf >= iaf",
        ));
    }
    check_lengths(close, &[high, low])?;

    let h = high.as_slice();
    let l = low.as_slice();
    let len = close.len();

    let iaf = T::from_f64_lossy(iaf);
    let maxaf = T::from_f64_lossy(maxaf);

    let mut sar = close.as_slice().to_vec();
    let mut bull = vec![T::ZERO; len];
    let mut bear = vec![T::ZERO; len];

    if len == 0 {
        return Ok(PsarOutput {
            psar: close.with_values(sar),
            bull: close.with_values(bull),
            bear: close.with_values(bear),
        });
    }

    let mut trend = Trend::Bull;
    let mut af = iaf;
    let mut hp = h[0];
    let mut lp = l[0];

    for i in 2..len {
        let prev = sar[i - 1];
        let mut stop = match trend {
            Trend::Bull => prev + af * (hp - prev),
            Trend::Bear => prev + af * (lp - prev),
        };

        let reversed = match trend {
            Trend::Bull if l[i] < stop => {
                trend = Trend::Bear;
                stop = hp;
                lp = l[i];
                af = iaf;
                true
            }
            Trend::Bear if h[i] > stop => {
                trend = Trend::Bull;
                stop = lp;
                hp = h[i];
                af = iaf;
                true
            }
            _ => false,
        };

        if reversed {
            trace!(bar = i, ?trend, "psar reversal");
        } else {
            match trend {
                Trend::Bull => {
                    if h[i] > hp {
                        hp = h[i];
                        af = (af + iaf).min(maxaf);
                    }
                    // the stop never enters the prior two bars' range
                    if l[i - 1] < stop {
                        stop = l[i - 1];
                    }
                    if l[i - 2] < stop {
                        stop = l[i - 2];
                    }
                }
                Trend::Bear => {
                    if l[i] < lp {
                        lp = l[i];
                        af = (af + iaf).min(maxaf);
                    }
                    if h[i - 1] > stop {
                        stop = h[i - 1];
                    }
                    if h[i - 2] > stop {
                        stop = h[i - 2];
                    }
                }
            }
        }

        sar[i] = stop;
        match trend {
            Trend::Bull => bull[i] = stop,
            Trend::Bear => bear[i] = stop,
        }
    }

    Ok(PsarOutput {
        psar: close.with_values(sar),
        bull: close.with_values(bull),
        bear: close.with_values(bear),
    })
}

/// Configuration for the PSAR indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PsarConfig {
    /// Initial acceleration factor and its increment per new extreme.
    pub iaf: f64,
    /// Maximum acceleration factor.
    pub maxaf: f64,
}

impl Default for PsarConfig {
    fn default() -> Self {
        Self::new(0.02, 0.2)
    }
}

impl PsarConfig {
    /// Create a new PSAR configuration.
    pub fn new(iaf: f64, maxaf: f64) -> Self {
        Self { iaf, maxaf }
    }
}

/// Parabolic SAR indicator over the high, low and close columns.
#[derive(Debug, Clone)]
pub struct Psar<T: TaFloat> {
    config: PsarConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Psar<T> {
    type Output = PsarOutput<T>;
    type Config = PsarConfig;

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
        3
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "psar", len = data.len(), "calculate");
        psar(
            data.high(),
            data.low(),
            data.close(),
            self.config.iaf,
            self.config.maxaf,
        )
    }
}
