//! Shared timestamp index.
//!
//! A [`TimeIndex`] is the time axis of one or more [`Series`](crate::Series).
//! The timestamps live behind an `Arc`, so every column of an
//! [`OhlcvSeries`](crate::OhlcvSeries) and every indicator output computed
//! from it refers to the same allocation instead of owning a private copy.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};

/// Strictly increasing `i64` timestamps on a grid of spacing `freq`.
///
/// # Example
///
/// ```rust
/// use fta_core::TimeIndex;
///
/// let index = TimeIndex::new(60, vec![0, 60, 120]).unwrap();
/// let shared = index.clone();
///
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.freq(), 60);
/// assert!(index.ptr_eq(&shared));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawIndex", into = "RawIndex"))]
pub struct TimeIndex {
    timestamps: Arc<[i64]>,
    freq: i64,
}

impl TimeIndex {
    /// Build an index, validating `freq > 0` and strictly increasing timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InvalidFrequency`] or
    /// [`IndicatorError::UnorderedIndex`].
    pub fn new(freq: i64, timestamps: Vec<i64>) -> Result<Self> {
        if freq <= 0 {
            return Err(IndicatorError::InvalidFrequency(freq));
        }
        if let Some(position) = timestamps.windows(2).position(|w| w[0] >= w[1]) {
            return Err(IndicatorError::UnorderedIndex {
                position: position + 1,
            });
        }

        Ok(Self {
            timestamps: timestamps.into(),
            freq,
        })
    }

    /// Index `0, 1, .., len - 1` with unit spacing, for values without time information.
    #[must_use]
    pub fn positional(len: usize) -> Self {
        Self {
            timestamps: (0..len as i64).collect(),
            freq: 1,
        }
    }

    /// Number of timestamps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns `true` if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Grid spacing.
    #[must_use]
    pub fn freq(&self) -> i64 {
        self.freq
    }

    /// Timestamps as a slice.
    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Timestamp at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<i64> {
        self.timestamps.get(position).copied()
    }

    /// Copy of the sub-range `start..end`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            timestamps: self.timestamps[start..end].into(),
            freq: self.freq,
        }
    }

    /// Returns `true` if both indexes share the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.timestamps, &other.timestamps) && self.freq == other.freq
    }

    /// Returns `true` if both indexes describe the same time axis.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self == other
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawIndex {
    freq: i64,
    timestamps: Vec<i64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawIndex> for TimeIndex {
    type Error = IndicatorError;

    fn try_from(raw: RawIndex) -> Result<Self> {
        Self::new(raw.freq, raw.timestamps)
    }
}

#[cfg(feature = "serde")]
impl From<TimeIndex> for RawIndex {
    fn from(index: TimeIndex) -> Self {
        Self {
            freq: index.freq,
            timestamps: index.timestamps.to_vec(),
        }
    }
}
