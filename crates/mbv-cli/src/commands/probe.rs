//! Probe command - report the sample under a viewport position.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mbv_adapters::FsByteSource;
use mbv_core::{FocusPoint, Session};
use tracing::info;

use super::ViewArgs;
use crate::config::AppConfig;
use crate::output::JsonOutput;

/// Arguments for the probe command.
#[derive(Args, Clone)]
pub struct ProbeArgs {
    /// Capture file
    pub file: PathBuf,

    /// Viewport column
    #[arg(short, long, allow_negative_numbers = true)]
    pub x: i64,

    /// Viewport row, counted from the first visible row
    #[arg(short, long, allow_negative_numbers = true)]
    pub y: i64,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Magnifier neighborhood side length
    #[arg(long, value_name = "PIXELS")]
    pub neighborhood: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[arg(skip)]
    config: Option<AppConfig>,
}

impl ProbeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.neighborhood = args.neighborhood.or(config.view.neighborhood);
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        args.view = args.view.with_config(config);
        args.config = Some(config.clone());
        args
    }
}

/// Run the probe command.
pub fn run(args: &ProbeArgs) -> Result<()> {
    let config = args.config.clone().unwrap_or_default();
    let mut session = Session::new(args.view.view_state(&config)?);

    session
        .load(&FsByteSource::new(&args.file))
        .with_context(|| format!("Failed to load capture: {}", args.file.display()))?;
    if let Some(padding) = args.view.padding {
        session.set_row_padding(padding)?;
    }
    if let Some(neighborhood) = args.neighborhood {
        session.set_neighborhood(neighborhood)?;
    }

    let cursor = FocusPoint::new(args.x, args.y);
    info!(x = cursor.x, y = cursor.y, "Probing {}", args.file.display());

    let probe = session
        .probe(cursor)
        .with_context(|| format!("Position ({}, {}) is outside the capture", args.x, args.y))?;

    JsonOutput::stdout().write_value(&probe, args.pretty)
}
