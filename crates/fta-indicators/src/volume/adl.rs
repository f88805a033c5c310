//! Accumulation/Distribution Line (ADL).
//!
//! Accumulates the close location value of each bar: +1 for a close at the
//! high, -1 for a close at the low.

use std::marker::PhantomData;

use fta_core::{Indicator, OhlcvSeries, Result, Series, TaFloat};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::check_lengths;

/// Accumulation/distribution line: cumulative sum of `((close - low) - (high - close)) / (high - low)`.
///
/// A bar with `high == low` has no close location: it is NaN in the output
/// and contributes nothing to later values.
///
/// # Errors
///
/// Returns [`IndicatorError::LengthMismatch`](fta_core::IndicatorError::LengthMismatch)
/// if the inputs differ in length.
///
/// # Example
///
/// ```
/// use fta_core::Series;
/// use fta_indicators::volume::adl;
///
/// let high: Series<f64> = vec![10.0, 10.0, 10.0].into();
/// let low: Series<f64> = vec![8.0, 10.0, 6.0].into();
/// let close: Series<f64> = vec![10.0, 10.0, 7.0].into();
///
/// let line = adl(&high, &low, &close).unwrap();
/// assert_eq!(line[0], 1.0);
/// assert!(line[1].is_nan());
/// assert_eq!(line[2], 0.5);
/// ```
pub fn adl<T: TaFloat>(high: &Series<T>, low: &Series<T>, close: &Series<T>) -> Result<Series<T>> {
    check_lengths(close, &[high, low])?;

    let location = &(&(close - low) - &(high - close)) / &(high - low);
    Ok(location.cumsum())
}

/// Configuration for the ADL indicator. ADL has no parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdlConfig;

/// Accumulation/Distribution Line indicator.
#[derive(Debug, Clone)]
pub struct Adl<T: TaFloat> {
    config: AdlConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TaFloat> Indicator<T> for Adl<T> {
    type Output = Series<T>;
    type Config = AdlConfig;

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
        1
    }

    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
        trace!(indicator = "adl", len = data.len(), "calculate");
        adl(data.high(), data.low(), data.close())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fta_core::IndicatorError;

    #[test]
    fn test_adl_accumulates() {
        let high: Series<f64> = vec![12.0, 13.0, 14.0, 15.0].into();
        let low: Series<f64> = vec![10.0, 11.0, 10.0, 11.0].into();
        let close: Series<f64> = vec![11.0, 13.0, 11.0, 14.0].into();

        let line = adl(&high, &low, &close).unwrap();

        // locations: 0, 1, -0.5, 0.5
        assert_relative_eq!(line[0], 0.0);
        assert_relative_eq!(line[1], 1.0);
        assert_relative_eq!(line[2], 0.5);
        assert_relative_eq!(line[3], 1.0);
    }

    #[test]
    fn test_adl_bounded_by_bar_count() {
        let high: Series<f64> = vec![5.0, 6.0, 7.0, 8.0, 9.0].into();
        let low: Series<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0].into();
        let close: Series<f64> = vec![2.0, 6.0, 3.5, 7.0, 5.0].into();

        let line = adl(&high, &low, &close).unwrap();
        for (i, &v) in line.iter().enumerate() {
            assert!(v.abs() <= (i + 1) as f64);
        }
    }

    #[test]
    fn test_adl_length_mismatch() {
        let a: Series<f64> = vec![1.0, 2.0].into();
        let b: Series<f64> = vec![1.0].into();

        assert!(matches!(
            adl(&a, &b, &a),
            Err(IndicatorError::LengthMismatch { expected: 2, actual: 1 })
        ));
    }
}
