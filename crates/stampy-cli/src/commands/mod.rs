//! CLI subcommand implementations.

pub mod graph;
pub mod stamp;
