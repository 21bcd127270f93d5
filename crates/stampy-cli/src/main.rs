use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stampy_cli::commands::{graph, stamp};
use stampy_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so they never mix with CSV on stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Stamp {
            csv_file,
            origin,
            series,
            event,
        }) => {
            stamp::run(csv_file, origin, series, event)?;
        }
        Some(Commands::Graph {
            orientation,
            csv_file,
        }) => {
            let config = Config::load_from(cli.config.as_deref())
                .context("failed to load configuration")?
                .with_orientation(orientation.as_deref());
            tracing::debug!(?config, "loaded configuration");

            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            graph::run(&mut writer, csv_file, config.orientation)?;
            writer.flush().context("failed to flush output")?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
