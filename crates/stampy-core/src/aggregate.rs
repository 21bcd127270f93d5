//! Start/done pairing.
//!
//! Rows are consumed in input order. A `start` opens a timer for its series; the next `done`
//! for the same series closes it and appends the elapsed whole seconds to the series'
//! duration list.
//!
//! # Tolerated input
//!
//! - A second `start` before a `done` replaces the pending start.
//! - Event kinds other than `start` and `done` are ignored.
//! - Starts still open at end of input are dropped.
//! - A `done` earlier than its `start` records a negative duration.
//!
//! A malformed timestamp or a `done` without an open start is fatal and no table is produced.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::error::AggregateError;
use crate::row::{EventKind, EventRow, parse_timestamp};

/// Durations per series, in the order each series recorded its first duration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationTable {
    series: Vec<SeriesDurations>,
    index: HashMap<String, usize>,
}

/// One series and its durations in seconds, in the order they were matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesDurations {
    pub name: String,
    pub durations: Vec<i64>,
}

impl DurationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `series` with no durations if it is not present yet.
    ///
    /// Aggregation never produces empty series; this exists for callers building tables by hand.
    #[must_use]
    pub fn with_series(mut self, series: &str) -> Self {
        self.entry(series);
        self
    }

    /// Appends a duration to `series`, registering the series on first use.
    pub fn push(&mut self, series: &str, seconds: i64) {
        self.entry(series).durations.push(seconds);
    }

    fn entry(&mut self, series: &str) -> &mut SeriesDurations {
        let idx = match self.index.get(series) {
            Some(&idx) => idx,
            None => {
                let idx = self.series.len();
                self.series.push(SeriesDurations {
                    name: series.to_string(),
                    durations: Vec::new(),
                });
                self.index.insert(series.to_string(), idx);
                idx
            }
        };
        &mut self.series[idx]
    }

    /// Returns the durations recorded for `series`.
    pub fn get(&self, series: &str) -> Option<&[i64]> {
        self.index
            .get(series)
            .map(|&idx| self.series[idx].durations.as_slice())
    }

    /// Iterates series in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, SeriesDurations> {
        self.series.iter()
    }

    /// Series names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Length of the longest duration list, 0 for an empty table.
    pub fn max_len(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.durations.len())
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a DurationTable {
    type Item = &'a SeriesDurations;
    type IntoIter = std::slice::Iter<'a, SeriesDurations>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: AsRef<str>> FromIterator<(S, Vec<i64>)> for DurationTable {
    fn from_iter<I: IntoIterator<Item = (S, Vec<i64>)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (series, durations) in iter {
            table.entry(series.as_ref()).durations.extend(durations);
        }
        table
    }
}

/// Incremental aggregation state.
///
/// Feed rows with [`Aggregator::push`] and collect the table with [`Aggregator::finish`].
#[derive(Debug, Default)]
pub struct Aggregator {
    open_starts: HashMap<String, NaiveDateTime>,
    table: DurationTable,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one row. `line` is the row's 1-based position in the input.
    pub fn push(&mut self, line: usize, row: &EventRow) -> Result<(), AggregateError> {
        let timestamp =
            parse_timestamp(&row.timestamp).map_err(|source| AggregateError::MalformedTimestamp {
                line,
                value: row.timestamp.clone(),
                source,
            })?;

        match row.kind() {
            EventKind::Start => {
                if let Some(previous) = self.open_starts.insert(row.series.clone(), timestamp) {
                    tracing::debug!(
                        line,
                        series = %row.series,
                        %previous,
                        "start replaces pending start"
                    );
                }
            }
            EventKind::Done => {
                let Some(started) = self.open_starts.remove(&row.series) else {
                    return Err(AggregateError::UnmatchedDone {
                        line,
                        series: row.series.clone(),
                    });
                };
                let seconds = (timestamp - started).num_seconds();
                tracing::trace!(line, series = %row.series, seconds, "matched done");
                self.table.push(&row.series, seconds);
            }
            kind @ EventKind::Other(_) => {
                tracing::debug!(line, series = %row.series, %kind, "ignoring event");
            }
        }

        Ok(())
    }

    /// Series with a start that has not been closed yet.
    pub fn open_series(&self) -> impl Iterator<Item = &str> {
        self.open_starts.keys().map(String::as_str)
    }

    /// Returns the duration table, discarding any still-open starts.
    pub fn finish(self) -> DurationTable {
        if !self.open_starts.is_empty() {
            let open: Vec<&str> = self.open_series().collect();
            tracing::debug!(?open, "discarding starts with no matching done");
        }
        self.table
    }
}

/// Aggregates a complete row sequence. Line numbers are assigned from position, starting at 1.
pub fn aggregate<'a, I>(rows: I) -> Result<DurationTable, AggregateError>
where
    I: IntoIterator<Item = &'a EventRow>,
{
    let mut aggregator = Aggregator::new();
    for (idx, row) in rows.into_iter().enumerate() {
        aggregator.push(idx + 1, row)?;
    }
    Ok(aggregator.finish())
}
