//! Tokenized event rows and the timestamp format they use.

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::AggregateError;

/// Literal timestamp layout of the first column, e.g. `2020-01-01 00:00:05`.
///
/// Spreadsheet-friendly and without an offset; values are compared as naive times.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of fields in a well-formed row.
pub const FIELDS_PER_ROW: usize = 4;

/// Parses a timestamp column value.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
}

/// Formats a timestamp the way it is written to the first column.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// One input record: `timestamp, origin, series, event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    /// Raw timestamp text, parsed during aggregation.
    pub timestamp: String,
    /// Where the event came from. Not used for pairing.
    pub origin: String,
    /// Series the event belongs to.
    pub series: String,
    /// Raw event kind text.
    pub event: String,
}

impl EventRow {
    pub fn new(
        timestamp: impl Into<String>,
        origin: impl Into<String>,
        series: impl Into<String>,
        event: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            origin: origin.into(),
            series: series.into(),
            event: event.into(),
        }
    }

    /// Builds a row from decoded fields, checking the field count.
    pub fn from_fields<S: AsRef<str>>(line: usize, fields: &[S]) -> Result<Self, AggregateError> {
        match fields {
            [timestamp, origin, series, event] => Ok(Self::new(
                timestamp.as_ref(),
                origin.as_ref(),
                series.as_ref(),
                event.as_ref(),
            )),
            _ => Err(AggregateError::MalformedRow {
                line,
                expected: FIELDS_PER_ROW,
                found: fields.len(),
            }),
        }
    }

    /// Classifies the event column.
    pub fn kind(&self) -> EventKind<'_> {
        EventKind::from(self.event.as_str())
    }

    /// Returns the fields in column order.
    pub fn fields(&self) -> [&str; FIELDS_PER_ROW] {
        [&self.timestamp, &self.origin, &self.series, &self.event]
    }
}

/// What an event row does to its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind<'a> {
    /// Opens (or reopens) the series timer.
    Start,
    /// Closes the open timer and records a duration.
    Done,
    /// Anything else. Ignored by aggregation.
    Other(&'a str),
}

impl<'a> From<&'a str> for EventKind<'a> {
    fn from(s: &'a str) -> Self {
        match s {
            "start" => Self::Start,
            "done" => Self::Done,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for EventKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::Done => "done",
            Self::Other(other) => other,
        };
        write!(f, "{s}")
    }
}
