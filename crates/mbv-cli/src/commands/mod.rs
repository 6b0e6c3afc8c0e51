//! CLI command definitions and handlers.

pub mod histogram;
pub mod inspect;
pub mod preview;
pub mod probe;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mbv_core::ViewState;

use crate::config::AppConfig;

/// MBV - Inspect 10-bit `.mbv` raw sensor captures
#[derive(Parser)]
#[command(name = "mbv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared inspect arguments (paths, output flags).
    #[command(flatten)]
    pub inspect: inspect::InspectArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Decode captures and report their dimensions and intensity statistics
    Inspect(inspect::InspectArgs),
    /// Print the histogram series of one capture
    Histogram(histogram::HistogramArgs),
    /// Report the sample under a cursor position
    Probe(probe::ProbeArgs),
    /// Print a decimated overview of one capture as ASCII art
    Preview(preview::PreviewArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every capture was decoded.
    Success = 0,
    /// At least one capture was skipped.
    SomeSkipped = 1,
    /// The command failed.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Windowing arguments shared by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct ViewArgs {
    /// Low bits discarded when windowing to 8-bit gray (0-8)
    #[arg(long, value_name = "BITS", value_parser = clap::value_parser!(u32).range(0..=8))]
    pub shift: Option<u32>,

    /// Rows skipped from the top of the capture
    #[arg(long, value_name = "ROWS")]
    pub padding: Option<usize>,
}

impl ViewArgs {
    /// Fills unset options from the configuration file.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.shift = self.shift.or(config.view.bit_shift);
        self.padding = self.padding.or(config.view.row_padding);
        self
    }

    /// Builds the view state from these options, the config and the defaults.
    ///
    /// Scale and neighborhood come from the config only.
    pub fn view_state(&self, config: &AppConfig) -> Result<ViewState> {
        let defaults = ViewState::default();
        let view = defaults
            .with_bit_shift(self.shift.unwrap_or(defaults.bit_shift))
            .context("Invalid bit shift")?
            .with_scale(config.view.scale.unwrap_or(defaults.scale))
            .context("Invalid magnification scale")?
            .with_neighborhood(config.view.neighborhood.unwrap_or(defaults.neighborhood))
            .context("Invalid neighborhood size")?
            .with_row_padding(self.padding.unwrap_or(0));
        Ok(view)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_view_args_precedence() {
        let config: AppConfig = toml::from_str(
            r"
[view]
bit_shift = 4
row_padding = 7
neighborhood = 20
",
        )
        .unwrap();

        let args = ViewArgs {
            shift: Some(1),
            padding: None,
        }
        .with_config(&config);
        let view = args.view_state(&config).unwrap();

        assert_eq!(view.bit_shift, 1);
        assert_eq!(view.row_padding, 7);
        assert_eq!(view.neighborhood, 20);
        assert_eq!(view.scale, 2);
    }

    #[test]
    fn test_view_args_defaults() {
        let view = ViewArgs::default()
            .view_state(&AppConfig::default())
            .unwrap();
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["mbv", "histogram", "a.mbv", "--windowed"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Histogram(_))));

        let cli = Cli::try_parse_from(["mbv", "a.mbv", "b.mbv", "-r"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.inspect.paths.len(), 2);

        assert!(Cli::try_parse_from(["mbv", "--shift", "9", "a.mbv"]).is_err());
    }
}
