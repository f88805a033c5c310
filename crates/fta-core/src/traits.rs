//! Core trait definitions for indicators.

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::num::TaFloat;
use crate::ohlcv::OhlcvSeries;

/// Configuration trait bounds for indicator configurations.
#[cfg(feature = "serde")]
pub trait IndicatorConfig: Clone + Default + Serialize + DeserializeOwned + Send + Sync {}

/// Configuration trait bounds for indicator configurations.
#[cfg(not(feature = "serde"))]
pub trait IndicatorConfig: Clone + Default + Send + Sync {}

#[cfg(feature = "serde")]
impl<T> IndicatorConfig for T where T: Clone + Default + Serialize + DeserializeOwned + Send + Sync {}

#[cfg(not(feature = "serde"))]
impl<T> IndicatorConfig for T where T: Clone + Default + Send + Sync {}

/// Core trait for technical indicators.
///
/// An indicator owns its configuration and computes its output over a whole
/// [`OhlcvSeries`] in one call. Outputs are aligned to the input index.
///
/// # Example Implementation
///
/// ```rust
/// use fta_core::prelude::*;
///
/// struct Range {
///     config: (),
/// }
///
/// impl<T: TaFloat> Indicator<T> for Range {
///     type Output = Series<T>;
///     type Config = ();
///
///     fn new(config: Self::Config) -> Self {
///         Self { config }
///     }
///
///     fn config(&self) -> &Self::Config {
///         &self.config
///     }
///
///     fn min_periods(&self) -> usize {
///         1
///     }
///
///     fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output> {
///         Ok(data.high() - data.low())
///     }
/// }
///
/// let bars: [Bar<f64>; 1] = [Bar::new(0, 1.0, 3.0, 0.5, 2.0, 10.0)];
/// let ohlcv = OhlcvSeries::from_bars(60, &bars).unwrap();
/// let range = <Range as Indicator<f64>>::new(());
///
/// assert_eq!(range.calculate(&ohlcv).unwrap().as_slice(), &[2.5]);
/// ```
pub trait Indicator<T: TaFloat>: Send + Sync {
    /// The output type of calculations.
    type Output;

    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Create a new indicator with the given configuration.
    fn new(config: Self::Config) -> Self;

    /// Get a reference to the current configuration.
    fn config(&self) -> &Self::Config;

    /// Number of leading bars before the output is computed over full windows.
    fn min_periods(&self) -> usize;

    /// Perform batch calculation on an OHLCV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn calculate(&self, data: &OhlcvSeries<T>) -> Result<Self::Output>;
}
