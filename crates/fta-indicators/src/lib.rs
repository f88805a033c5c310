//! # fta-indicators
//!
//! Technical indicators for the fta library.
//!
//! Every indicator is available in two forms: a free function over
//! [`Series`](fta_core::Series) values, and an [`Indicator`](fta_core::Indicator)
//! implementation that reads its inputs from an
//! [`OhlcvSeries`](fta_core::OhlcvSeries) according to its configuration.
//!
//! - **Trend**: SMA, SMM, SSMA, EMA, WMA, HMA, PSAR
//! - **Momentum**: ROC, KST, FISH, MACD, RSI, CRSI, VZO, STOCH, STOCHD, StochRSI
//! - **Volatility**: Bollinger Bands, %B
//! - **Volume**: ADL, Chaikin oscillator
//!
//! Outputs always have the length and index of their inputs. Leading windows
//! shorter than the period are computed over the available prefix.
//!
//! # Example
//!
//! ```
//! use fta_core::prelude::*;
//! use fta_indicators::prelude::*;
//!
//! let bars: Vec<Bar<f64>> = (0..30)
//!     .map(|i| {
//!         let close = 100.0 + i as f64;
//!         Bar::new(i * 60, close, close + 1.0, close - 1.0, close, 1_000.0)
//!     })
//!     .collect();
//! let ohlcv = OhlcvSeries::from_bars(60, &bars).unwrap();
//!
//! let rsi = Rsi::<f64>::new(RsiConfig::default());
//! let values = rsi.calculate(&ohlcv).unwrap();
//! assert_eq!(values.len(), 30);
//! assert_eq!(values[29], 100.0);
//!
//! let fast = sma(ohlcv.close(), 5).unwrap();
//! assert_eq!(fast[29], 127.0);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

use fta_core::{IndicatorError, Result, Series, TaFloat};

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub mod prelude;

pub use prelude::*;

/// Reject a zero window length.
pub(crate) fn check_period(period: usize) -> Result<()> {
    if period == 0 {
        Err(IndicatorError::InvalidWindow(0))
    } else {
        Ok(())
    }
}

/// Reject inputs whose lengths differ from `expected`.
pub(crate) fn check_lengths<T: TaFloat>(expected: &Series<T>, others: &[&Series<T>]) -> Result<()> {
    others
        .iter()
        .try_for_each(|s| IndicatorError::ensure_len(expected.len(), s.len()))
}
