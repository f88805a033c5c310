//! Volume-flow indicators.
//!
//! This module contains accumulation/distribution based indicators:
//! - ADL (Accumulation/Distribution Line)
//! - Chaikin Oscillator

mod adl;
mod chaikin;

pub use adl::{adl, Adl, AdlConfig};
pub use chaikin::{chaikin, Chaikin, ChaikinConfig};
