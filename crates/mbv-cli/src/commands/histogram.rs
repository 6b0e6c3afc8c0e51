//! Histogram command - print the intensity histogram of one capture.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use mbv_adapters::load_capture;
use mbv_core::{AxisScale, HistogramSeries, Orientation, Session, ValueAxis};
use serde::Serialize;
use tracing::info;

use super::ViewArgs;
use crate::config::AppConfig;
use crate::output::JsonOutput;

/// Arguments for the histogram command.
#[derive(Args, Clone)]
pub struct HistogramArgs {
    /// Capture file
    pub file: PathBuf,

    /// Bin windowed gray levels instead of raw samples
    #[arg(long)]
    pub windowed: bool,

    /// Linear count axis instead of logarithmic
    #[arg(long)]
    pub linear: bool,

    /// Emit (count, label) points instead of (label, count)
    #[arg(long)]
    pub horizontal: bool,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[arg(skip)]
    config: Option<AppConfig>,
}

impl HistogramArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.windowed {
            args.windowed = config.histogram.full_range == Some(false);
        }
        if !args.linear {
            args.linear = config.histogram.logarithmic == Some(false);
        }
        if !args.horizontal {
            args.horizontal = config.histogram.orientation.as_deref() == Some("horizontal");
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        args.view = args.view.with_config(config);
        args.config = Some(config.clone());
        args
    }

    const fn orientation(&self) -> Orientation {
        if self.horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    const fn scale(&self) -> AxisScale {
        if self.linear {
            AxisScale::Linear
        } else {
            AxisScale::Logarithmic
        }
    }
}

/// Serialized histogram chart data.
#[derive(Debug, Serialize)]
pub struct HistogramReport {
    pub path: String,
    pub full_range: bool,
    pub orientation: Orientation,
    pub axis: ValueAxis,
    pub min: u64,
    pub max: u64,
    pub total: u64,
    pub points: Vec<[u64; 2]>,
}

impl HistogramReport {
    fn new(path: String, series: &HistogramSeries, orientation: Orientation, scale: AxisScale) -> Self {
        Self {
            path,
            full_range: series.full_range,
            orientation,
            axis: ValueAxis::for_series(series, scale),
            min: series.min,
            max: series.max,
            total: series.total(),
            points: series.points(orientation),
        }
    }
}

/// Run the histogram command.
pub fn run(args: &HistogramArgs) -> Result<()> {
    info!("Computing histogram of {}", args.file.display());

    let config = args.config.clone().unwrap_or_default();
    let mut session = Session::new(args.view.view_state(&config)?);
    let grid = load_capture(&args.file)?;
    session.publish(grid);
    if let Some(padding) = args.view.padding {
        session.set_row_padding(padding)?;
    }

    let Some(series) = session.histogram(!args.windowed) else {
        anyhow::bail!("No capture loaded");
    };

    let report = HistogramReport::new(
        args.file.display().to_string(),
        &series,
        args.orientation(),
        args.scale(),
    );
    JsonOutput::stdout().write_value(&report, args.pretty)
}
