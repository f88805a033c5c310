//! Momentum indicators.
//!
//! This module contains momentum indicators and oscillators:
//! - ROC (Rate of Change)
//! - KST (Know Sure Thing)
//! - FISH (Fisher Transform)
//! - MACD (Moving Average Convergence Divergence)
//! - RSI (Relative Strength Index)
//! - CRSI (Connors RSI)
//! - VZO (Volume Zone Oscillator)
//! - STOCH / STOCHD (Stochastic Oscillator)
//! - StochRSI (Stochastic RSI)

mod crsi;
mod fish;
mod kst;
mod macd;
mod roc;
mod rsi;
mod stoch_rsi;
mod stochastic;
mod vzo;

pub use crsi::{crsi, streak, Crsi, CrsiConfig};
pub use fish::{fish, Fish, FishConfig};
pub use kst::{kst, Kst, KstConfig, KstOutput};
pub use macd::{macd, Macd, MacdConfig, MacdOutput};
pub use roc::{roc, Roc, RocConfig};
pub use rsi::{rsi, Rsi, RsiConfig};
pub use stoch_rsi::{stoch_rsi, StochRsi, StochRsiConfig};
pub use stochastic::{stoch, stochd, Stoch, StochConfig, StochD, StochDConfig};
pub use vzo::{vzo, Vzo, VzoConfig};
