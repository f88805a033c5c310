//! Prelude for fta-indicators.
//!
//! This module re-exports all indicator functions, configurations and
//! indicator types.

// Momentum indicators
pub use crate::momentum::{
    crsi, fish, kst, macd, roc, rsi, stoch, stoch_rsi, stochd, streak, vzo,
    Crsi, CrsiConfig,
    Fish, FishConfig,
    Kst, KstConfig, KstOutput,
    Macd, MacdConfig, MacdOutput,
    Roc, RocConfig,
    Rsi, RsiConfig,
    Stoch, StochConfig, StochD, StochDConfig,
    StochRsi, StochRsiConfig,
    Vzo, VzoConfig,
};

// Trend indicators
pub use crate::trend::{
    ema, hma, psar, sma, smm, ssma, wma,
    Ema, EmaConfig,
    Hma, HmaConfig,
    Psar, PsarConfig, PsarOutput,
    Sma, SmaConfig,
    Smm, SmmConfig,
    Ssma, SsmaConfig,
    Wma, WmaConfig,
};

// Volatility indicators
pub use crate::volatility::{
    bbands, percent_b,
    BollingerBands, BollingerConfig, BollingerOutput, PercentB,
};

// Volume indicators
pub use crate::volume::{adl, chaikin, Adl, AdlConfig, Chaikin, ChaikinConfig};

// Core trait
pub use fta_core::Indicator;
