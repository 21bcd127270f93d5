//! Graph command: turns an event log into a duration table.
//!
//! Input rows are `timestamp,origin,series,event` with no header. Errors name the physical
//! line the offending row starts on. Output is the duration
//! table as CSV in the requested orientation. Nothing is written unless the whole input
//! aggregates cleanly.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use stampy_core::{Aggregator, DurationTable, EventRow, Orientation, render};

/// Reads events from `input` (`-` for stdin) and writes the duration grid to `writer`.
pub fn run<W: Write>(writer: &mut W, input: &Path, orientation: Orientation) -> Result<()> {
    let table = if input == Path::new("-") {
        read_table(io::stdin().lock()).context("failed to aggregate events from stdin")?
    } else {
        let file = File::open(input)
            .with_context(|| format!("failed to open {}", input.display()))?;
        read_table(BufReader::new(file))
            .with_context(|| format!("failed to aggregate events from {}", input.display()))?
    };

    tracing::debug!(series = table.len(), %orientation, "writing duration table");
    write_table(writer, &table, orientation)
}

/// Decodes CSV rows and aggregates them.
pub fn read_table<R: Read>(mut reader: R) -> Result<DurationTable> {
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .context("failed to read input")?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_slice());
    let mut lines = LineCounter::new(&input);

    let mut aggregator = Aggregator::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let row_number = idx + 1;
        let record = record.with_context(|| format!("failed to read row {row_number}"))?;
        let line = record
            .position()
            .map_or(row_number, |pos| lines.line_at(pos.byte()));
        let fields: Vec<&str> = record.iter().collect();
        let row = EventRow::from_fields(line, &fields)?;
        aggregator.push(line, &row)?;
    }

    Ok(aggregator.finish())
}

/// Maps record offsets to 1-based physical lines.
///
/// The CSV reader skips blank lines without counting them as records, and a record's
/// offset points before any blank lines it skipped. Offsets must be non-decreasing.
struct LineCounter<'a> {
    input: &'a [u8],
    scanned: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            scanned: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: u64) -> usize {
        let offset = usize::try_from(offset)
            .unwrap_or(self.input.len())
            .clamp(self.scanned, self.input.len());
        let start = self.input[offset..]
            .iter()
            .position(|b| !matches!(b, b'\r' | b'\n'))
            .map_or(self.input.len(), |skip| offset + skip);

        self.line += self.input[self.scanned..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.scanned = start;
        self.line
    }
}

/// Encodes the rendered grid as CSV.
pub fn write_table<W: Write>(
    writer: &mut W,
    table: &DurationTable,
    orientation: Orientation,
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    for row in render(table, orientation) {
        csv_writer
            .write_record(&row)
            .context("failed to write row")?;
    }
    csv_writer.flush().context("failed to flush output")?;

    Ok(())
}
