//! Core logic for stampy.
//!
//! This crate contains:
//! - Event rows: the `timestamp, origin, series, event` record and its timestamp format
//! - Aggregation: pairing `start`/`done` events into per-series durations
//! - Grids: laying out the duration table horizontally or vertically

mod aggregate;
mod error;
pub mod grid;
pub mod row;

pub use aggregate::{Aggregator, DurationTable, SeriesDurations, aggregate};
pub use error::AggregateError;
pub use grid::{Orientation, render};
pub use row::{EventKind, EventRow, TIMESTAMP_FORMAT};
