//! # fta-core
//!
//! Core types for the fta technical analysis library.
//!
//! This crate provides the time-series engine every indicator is built on:
//!
//! - [`TaFloat`] - Trait for numeric types (f32/f64)
//! - [`TimeIndex`] - Shared, strictly increasing timestamp grid
//! - [`Series`] - Values aligned to a [`TimeIndex`], with elementwise arithmetic
//! - [`Rolling`] - Trailing-window reductions with shrinking leading windows
//! - [`Ewm`] - Exponentially weighted recursion (alpha, span or center of mass)
//! - [`Resampler`] - Origin-aligned bucket aggregation to a coarser frequency
//! - [`Bar`] and [`OhlcvSeries`] - OHLCV price data sharing one index
//! - [`Indicator`] - Batch indicator computation trait
//!
//! ## Feature Flags
//!
//! - `csv` (default) - Enable [`io::read_csv`] ingestion
//! - `serde` - Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```rust
//! use fta_core::prelude::*;
//!
//! let closes: Series<f64> = Series::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
//! let sma = closes.rolling(2).mean();
//!
//! assert_eq!(sma.as_slice(), &[1.0, 1.5, 2.5, 3.5, 4.5]);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod ewm;
pub mod index;
#[cfg(feature = "csv")]
pub mod io;
pub mod num;
pub mod ohlcv;
pub mod prelude;
pub mod resample;
pub mod series;
pub mod traits;
pub mod window;

// Re-export core types at crate root
pub use error::{IndicatorError, Result};
pub use ewm::{Decay, Ewm};
pub use index::TimeIndex;
pub use num::TaFloat;
pub use ohlcv::{Bar, OhlcvSeries, PriceColumn};
pub use resample::{Buckets, Resampler, ORIGIN_EPOCH};
pub use series::Series;
pub use traits::Indicator;
pub use window::Rolling;

#[cfg(feature = "csv")]
pub use error::ReadError;
