//! CSV ingestion of OHLCV records.
//!
//! Records are read without a header in the column order
//! `Time, Open, High, Low, Close, Volume`. Raw timestamps are scaled to
//! nanoseconds according to a [`TimeUnit`], so the frame frequency is given
//! in nanoseconds as well.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{IndicatorError, ReadError};
use crate::index::TimeIndex;
use crate::num::TaFloat;
use crate::ohlcv::OhlcvSeries;

/// Nanoseconds per second.
pub const SECOND: i64 = 1_000_000_000;
/// Nanoseconds per minute.
pub const MINUTE: i64 = 60 * SECOND;
/// Nanoseconds per hour.
pub const HOUR: i64 = 60 * MINUTE;

/// Unit of the raw `Time` column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeUnit {
    /// Seconds since the Unix epoch.
    #[default]
    Seconds,
    /// Milliseconds since the Unix epoch.
    Milliseconds,
    /// Nanoseconds since the Unix epoch.
    Nanoseconds,
}

impl TimeUnit {
    /// Nanoseconds per unit.
    #[must_use]
    pub fn nanos(self) -> i64 {
        match self {
            Self::Seconds => SECOND,
            Self::Milliseconds => 1_000_000,
            Self::Nanoseconds => 1,
        }
    }
}

const COLUMNS: [&str; 6] = ["Time", "Open", "High", "Low", "Close", "Volume"];

/// Read OHLCV records into a frame on a grid of spacing `freq` nanoseconds.
///
/// # Errors
///
/// Returns [`ReadError`] if a record cannot be read or parsed, or if the
/// timestamps do not form a valid index.
///
/// # Example
///
/// ```rust
/// use fta_core::io::{read_csv, TimeUnit, MINUTE};
///
/// let data = "0,1.0,2.0,0.5,1.5,100\n60,1.5,2.5,1.0,2.0,80\n";
/// let ohlcv = read_csv::<f64, _>(data.as_bytes(), MINUTE, TimeUnit::Seconds).unwrap();
///
/// assert_eq!(ohlcv.len(), 2);
/// assert_eq!(ohlcv.index().timestamps(), &[0, MINUTE]);
/// assert_eq!(ohlcv.close().as_slice(), &[1.5, 2.0]);
/// ```
pub fn read_csv<T, R>(reader: R, freq: i64, unit: TimeUnit) -> Result<OhlcvSeries<T>, ReadError>
where
    T: TaFloat,
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut timestamps = Vec::new();
    let mut columns: [Vec<T>; 5] = Default::default();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;

        let raw = field(&record, row, 0)?;
        let ts: i64 = raw.parse().map_err(|source| ReadError::ParseInt {
            row,
            field: COLUMNS[0],
            source,
        })?;
        let ts = ts.checked_mul(unit.nanos()).ok_or_else(|| {
            IndicatorError::invalid_parameter(COLUMNS[0], raw, "timestamp representable in nanoseconds")
        })?;
        timestamps.push(ts);

        for (position, column) in columns.iter_mut().enumerate() {
            let raw = field(&record, row, position + 1)?;
            let value: f64 = raw.parse().map_err(|source| ReadError::ParseFloat {
                row,
                field: COLUMNS[position + 1],
                source,
            })?;
            column.push(T::from_f64_lossy(value));
        }
    }

    debug!(rows = timestamps.len(), freq, ?unit, "read ohlcv csv");

    let index = TimeIndex::new(freq, timestamps)?;
    let [open, high, low, close, volume] = columns;
    Ok(OhlcvSeries::from_columns(index, open, high, low, close, volume)?)
}

fn field(record: &StringRecord, row: usize, position: usize) -> Result<&str, ReadError> {
    record.get(position).ok_or(ReadError::MissingField {
        row,
        field: COLUMNS[position],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_scale_to_nanoseconds() {
        let data = "1000,1,1,1,1,1\n";

        let ohlcv = read_csv::<f64, _>(data.as_bytes(), 1, TimeUnit::Milliseconds).unwrap();
        assert_eq!(ohlcv.index().timestamps(), &[SECOND]);

        let ohlcv = read_csv::<f64, _>(data.as_bytes(), 1, TimeUnit::Nanoseconds).unwrap();
        assert_eq!(ohlcv.index().timestamps(), &[1000]);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let data = "0, 1.0, 2.0 ,0.5,1.5, 100\n";
        let ohlcv = read_csv::<f32, _>(data.as_bytes(), MINUTE, TimeUnit::Seconds).unwrap();
        assert_eq!(ohlcv.high()[0], 2.0);
    }

    #[test]
    fn test_bad_float_names_field_and_row() {
        let data = "0,1,2,0.5,1.5,100\n60,1,x,0.5,1.5,100\n";
        let err = read_csv::<f64, _>(data.as_bytes(), MINUTE, TimeUnit::Seconds).unwrap_err();

        assert!(matches!(
            err,
            ReadError::ParseFloat { row: 2, field: "High", .. }
        ));
    }

    #[test]
    fn test_bad_timestamp() {
        let data = "noon,1,2,0.5,1.5,100\n";
        let err = read_csv::<f64, _>(data.as_bytes(), MINUTE, TimeUnit::Seconds).unwrap_err();

        assert!(matches!(err, ReadError::ParseInt { row: 1, field: "Time", .. }));
    }

    #[test]
    fn test_short_record() {
        let data = "0,1,2\n";
        let err = read_csv::<f64, _>(data.as_bytes(), MINUTE, TimeUnit::Seconds).unwrap_err();

        assert!(matches!(err, ReadError::MissingField { row: 1, field: "Low" }));
    }

    #[test]
    fn test_unordered_timestamps() {
        let data = "60,1,2,0.5,1.5,100\n0,1,2,0.5,1.5,100\n";
        let err = read_csv::<f64, _>(data.as_bytes(), MINUTE, TimeUnit::Seconds).unwrap_err();

        assert!(matches!(
            err,
            ReadError::Frame(IndicatorError::UnorderedIndex { position: 1 })
        ));
    }

    #[test]
    fn test_empty_input() {
        let ohlcv = read_csv::<f64, _>("".as_bytes(), MINUTE, TimeUnit::Seconds).unwrap();
        assert!(ohlcv.is_empty());
    }
}
