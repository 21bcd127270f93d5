//! Stamp command for appending timestamped events to a CSV log.
//!
//! Each call appends one `timestamp,origin,series,event` row, the same layout
//! `stampy graph` reads.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use fs2::FileExt;
use stampy_core::EventRow;
use stampy_core::row::format_timestamp;

/// Appends an event stamped with the current local time.
pub fn run(csv_file: &Path, origin: &str, series: &str, event: &str) -> Result<()> {
    stamp_at(csv_file, origin, series, event, Local::now().naive_local())
}

/// Appends an event stamped with `at`, creating the file if needed.
///
/// The file is locked for the duration of the write so concurrent stamps never
/// interleave partial rows.
pub fn stamp_at(
    csv_file: &Path,
    origin: &str,
    series: &str,
    event: &str,
    at: NaiveDateTime,
) -> Result<()> {
    let row = EventRow::new(format_timestamp(&at), origin, series, event);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_file)
        .with_context(|| format!("failed to open {}", csv_file.display()))?;
    file.lock_exclusive().context("failed to acquire lock")?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(&file);
    writer
        .write_record(row.fields())
        .context("failed to write event")?;
    writer.flush().context("failed to flush event")?;

    tracing::info!(
        file = %csv_file.display(),
        timestamp = %row.timestamp,
        series,
        event,
        "stamped event"
    );

    Ok(())
}
