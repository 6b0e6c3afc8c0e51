//! Inspect command - decode captures and report their statistics.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use mbv_adapters::FsCaptureSource;
use mbv_core::pipeline::{compute_histogram, load};
use mbv_core::{
    ByteSource, CaptureReport, CaptureSource, GridDimensions, IntensityGrid, ProgressEvent,
    ProgressSink, ReportOutput, ViewState,
};
use tracing::{debug, info};

use super::{ExitCode, ViewArgs};
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Shared arguments for capture inspection.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct InspectArgs {
    /// Capture files or directories to inspect
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Include the histogram bins in each report
    #[arg(long)]
    pub histogram: bool,

    /// Bin windowed gray levels instead of raw samples
    #[arg(long)]
    pub windowed: bool,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl InspectArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Windowed histogram: config full_range = false enables it
        if !args.windowed {
            args.windowed = config.histogram.full_range == Some(false);
        }

        args.view = args.view.with_config(config);

        // Output format: CLI > config (accessor provides fallback)
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.config = Some(config.clone());

        args
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }

    fn view_state(&self) -> Result<ViewState> {
        self.view
            .view_state(self.config.as_ref().unwrap_or(&AppConfig::default()))
    }
}

/// Result of running the inspect command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct InspectResult {
    /// Number of captures decoded.
    pub processed: usize,
    /// Number of captures skipped.
    pub skipped: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the inspect command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &InspectArgs) -> Result<InspectResult> {
    info!("Running inspect command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let view = args.view_state()?;
    let source = FsCaptureSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout();

    let (result, reports) = inspect_captures(&source, &view, &output, &progress_bar, args)?;

    // For JSON format, output all reports as array via adapter
    if matches!(args.format(), OutputFormat::Json) {
        output.write_array(&reports, args.pretty)?;
        output.flush()?;
    }

    Ok(result)
}

/// Decode every capture of a source and emit one report each.
///
/// JSONL reports are streamed to `output`; for JSON the reports are
/// returned so the caller can write them as one array.
fn inspect_captures(
    source: &dyn CaptureSource,
    view: &ViewState,
    output: &dyn ReportOutput,
    progress: &dyn ProgressSink,
    args: &InspectArgs,
) -> Result<(InspectResult, Vec<CaptureReport>)> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut all_reports: Vec<CaptureReport> = Vec::new();

    for (index, capture) in source.captures().enumerate() {
        let path = capture.name();

        progress.on_event(ProgressEvent::Started {
            path: path.clone(),
            index,
            total,
        });

        let report = match build_report(capture.as_ref(), view, args) {
            Ok(report) => report,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path,
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Completed {
            report: report.clone(),
        });

        match args.format() {
            OutputFormat::Jsonl => output.write(&report)?,
            OutputFormat::Json => all_reports.push(report),
        }

        processed += 1;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if skipped > 0 {
        ExitCode::SomeSkipped
    } else {
        ExitCode::Success
    };

    let result = InspectResult {
        processed,
        skipped,
        exit_code,
    };
    Ok((result, all_reports))
}

/// Decode one capture and summarize it.
fn build_report(
    capture: &dyn ByteSource,
    view: &ViewState,
    args: &InspectArgs,
) -> Result<CaptureReport> {
    let grid = load(capture)?;
    view.check_padding(grid.height())?;
    debug!("Decoded {} ({}x{})", capture.name(), grid.width(), grid.height());
    Ok(report_for(capture.name(), &grid, view, args))
}

fn report_for(
    path: String,
    grid: &IntensityGrid,
    view: &ViewState,
    args: &InspectArgs,
) -> CaptureReport {
    let histogram = compute_histogram(grid, view, !args.windowed);
    CaptureReport {
        path,
        timestamp: iso_timestamp(),
        dimensions: GridDimensions::new(grid.width(), grid.height()),
        padded_height: view.padded_height(grid.height()),
        sample_range: grid.sample_range(),
        histogram: histogram.summary(args.histogram),
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
