//! Volatility indicators.
//!
//! This module contains volatility indicators:
//! - Bollinger Bands
//! - %B (position within the Bollinger Bands)

mod bollinger;

pub use bollinger::{bbands, percent_b, BollingerBands, BollingerConfig, BollingerOutput, PercentB};
