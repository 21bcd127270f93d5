//! Fatal input errors.

use thiserror::Error;

/// Errors that stop aggregation at the offending row.
///
/// Every variant carries the 1-based position of the row in the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// The row did not have the expected number of fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The timestamp field did not match `YYYY-MM-DD HH:MM:SS`.
    #[error("line {line}: failed to parse time value {value:?}")]
    MalformedTimestamp {
        line: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A `done` event arrived for a series with no open `start`.
    #[error("line {line}: found done event with no start event: {series}")]
    UnmatchedDone { line: usize, series: String },
}

impl AggregateError {
    /// Returns the 1-based line number of the row that caused the error.
    pub const fn line(&self) -> usize {
        match self {
            Self::MalformedRow { line, .. }
            | Self::MalformedTimestamp { line, .. }
            | Self::UnmatchedDone { line, .. } => *line,
        }
    }
}
