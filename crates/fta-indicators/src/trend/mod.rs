//! Trend indicators.
//!
//! This module contains the moving-average family and the trend detector:
//! - SMA (Simple Moving Average), SMM (Simple Moving Median)
//! - SSMA (Smoothed Simple Moving Average), EMA (Exponential Moving Average)
//! - WMA (Weighted Moving Average), HMA (Hull Moving Average)
//! - PSAR (Parabolic Stop And Reverse)

mod ema;
mod psar;
mod sma;
mod wma;

pub use ema::{ema, ssma, Ema, EmaConfig, Ssma, SsmaConfig};
pub use psar::{psar, Psar, PsarConfig, PsarOutput};
pub use sma::{sma, smm, Sma, SmaConfig, Smm, SmmConfig};
pub use wma::{hma, wma, Hma, HmaConfig, Wma, WmaConfig};
