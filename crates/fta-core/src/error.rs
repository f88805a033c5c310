//! Error types for series and indicator operations.
//!
//! Numeric degeneracies (division by zero on flat bars or bands) are not
//! errors: they surface as NaN in the output series. Errors are reserved for
//! invalid parameters and malformed inputs.

use thiserror::Error;

/// Result type alias for series and indicator operations that may fail.
pub type Result<T> = core::result::Result<T, IndicatorError>;

/// Errors that can occur while building series or computing indicators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    /// Invalid window size parameter.
    #[error("Invalid window size: {0} (must be > 0)")]
    InvalidWindow(usize),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {value} (expected {expected})")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Provided value as string.
        value: String,
        /// Description of expected value.
        expected: &'static str,
    },

    /// Series length mismatch in computation.
    #[error("Series length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Grid spacing must be positive.
    #[error("Invalid frequency: {0} (must be > 0)")]
    InvalidFrequency(i64),

    /// Timestamps must be strictly increasing.
    #[error("Timestamps not strictly increasing at position {position}")]
    UnorderedIndex {
        /// Position of the first offending timestamp.
        position: usize,
    },
}

impl IndicatorError {
    /// Shorthand for [`IndicatorError::InvalidParameter`].
    #[must_use]
    pub fn invalid_parameter(
        name: &'static str,
        value: impl core::fmt::Display,
        expected: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            expected,
        }
    }

    /// Check two lengths, returning [`IndicatorError::LengthMismatch`] on failure.
    pub fn ensure_len(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::LengthMismatch { expected, actual })
        }
    }
}

/// Errors raised while ingesting OHLCV records.
#[cfg(feature = "csv")]
#[derive(Debug, Error)]
pub enum ReadError {
    /// The underlying CSV reader failed.
    #[error("read csv: {0}")]
    Csv(#[from] csv::Error),

    /// A record had fewer fields than expected.
    #[error("row {row}: missing field '{field}'")]
    MissingField {
        /// One-based record number.
        row: usize,
        /// Name of the missing column.
        field: &'static str,
    },

    /// A timestamp field could not be parsed.
    #[error("row {row}: parse int: field '{field}': {source}")]
    ParseInt {
        /// One-based record number.
        row: usize,
        /// Name of the column.
        field: &'static str,
        /// Parser error.
        source: core::num::ParseIntError,
    },

    /// A price or volume field could not be parsed.
    #[error("row {row}: parse float: field '{field}': {source}")]
    ParseFloat {
        /// One-based record number.
        row: usize,
        /// Name of the column.
        field: &'static str,
        /// Parser error.
        source: core::num::ParseFloatError,
    },

    /// The parsed records did not form a valid frame.
    #[error("build frame")]
    Frame(#[from] IndicatorError),
}
