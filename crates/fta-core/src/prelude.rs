//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use fta_core::prelude::*;
//!
//! let series: Series<f64> = Series::from_vec(vec![1.0, 2.0, 3.0]);
//! let bar: Bar<f64> = Bar::new(0, 100.0, 105.0, 98.0, 103.0, 1_000_000.0);
//! assert_eq!(series.rolling(3).max()[2], 3.0);
//! assert_eq!(bar.range(), 7.0);
//! ```

// Core types
pub use crate::ewm::{Decay, Ewm};
pub use crate::index::TimeIndex;
pub use crate::num::TaFloat;
pub use crate::ohlcv::{Bar, OhlcvSeries, PriceColumn};
pub use crate::resample::{Buckets, Resampler, ORIGIN_EPOCH};
pub use crate::series::Series;
pub use crate::window::Rolling;

// Error types
pub use crate::error::{IndicatorError, Result};

// Traits
pub use crate::traits::{Indicator, IndicatorConfig};

#[cfg(feature = "csv")]
pub use crate::error::ReadError;
#[cfg(feature = "csv")]
pub use crate::io::{read_csv, TimeUnit};
