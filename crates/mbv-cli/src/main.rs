//! MBV CLI - Inspect 10-bit `.mbv` raw sensor captures.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{
    histogram::HistogramArgs, inspect::InspectArgs, preview::PreviewArgs, probe::ProbeArgs, Cli,
    Commands, ExitCode,
};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();

    let result = match cli.command {
        Some(Commands::Inspect(args)) => {
            commands::inspect::run(&InspectArgs::with_config(args, &config)).map(|r| r.exit_code)
        }
        Some(Commands::Histogram(args)) => {
            commands::histogram::run(&HistogramArgs::with_config(args, &config))
                .map(|()| ExitCode::Success)
        }
        Some(Commands::Probe(args)) => {
            commands::probe::run(&ProbeArgs::with_config(args, &config)).map(|()| ExitCode::Success)
        }
        Some(Commands::Preview(args)) => {
            commands::preview::run(&PreviewArgs::with_config(args, &config))
                .map(|()| ExitCode::Success)
        }
        None => {
            // Default behavior: run inspect with flattened args
            if cli.inspect.paths.is_empty() {
                eprintln!("error: No paths specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            commands::inspect::run(&InspectArgs::with_config(cli.inspect, &config))
                .map(|r| r.exit_code)
        }
    };

    let exit_code = result.unwrap_or_else(|e| {
        eprintln!("error: {e:#}");
        ExitCode::Error
    });

    exit_code.into()
}
