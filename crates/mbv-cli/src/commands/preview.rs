//! Preview command - render the overview of one capture.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use mbv_adapters::{load_capture, ImageSink};
use mbv_core::{PixelSink, Session};
use tracing::info;

use super::ViewArgs;
use crate::config::AppConfig;

const DEFAULT_WIDTH: u32 = 100;
const DEFAULT_HEIGHT: u32 = 600;

/// Dark to bright.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Arguments for the preview command.
#[derive(Args, Clone)]
pub struct PreviewArgs {
    /// Capture file
    pub file: PathBuf,

    /// Overview width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Overview height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    #[command(flatten)]
    pub view: ViewArgs,

    #[arg(skip)]
    config: Option<AppConfig>,
}

impl PreviewArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.width = args.width.or(config.overview.width);
        args.height = args.height.or(config.overview.height);
        args.view = args.view.with_config(config);
        args.config = Some(config.clone());
        args
    }

    fn size(&self) -> (u32, u32) {
        (
            self.width.unwrap_or(DEFAULT_WIDTH).max(1),
            self.height.unwrap_or(DEFAULT_HEIGHT).max(1),
        )
    }
}

/// Run the preview command.
pub fn run(args: &PreviewArgs) -> Result<()> {
    let config = args.config.clone().unwrap_or_default();
    let mut session = Session::new(args.view.view_state(&config)?);
    session.publish(load_capture(&args.file)?);
    if let Some(padding) = args.view.padding {
        session.set_row_padding(padding)?;
    }

    let (width, height) = args.size();
    info!(width, height, "Rendering overview of {}", args.file.display());

    let mut sink = ImageSink::new(width, height);
    session.render_overview(&mut sink, width, height);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(ascii_art(&sink).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// One character per overview pixel. Unwritten pixels print as spaces.
fn ascii_art(sink: &ImageSink) -> String {
    let (width, height) = sink.dimensions();
    let mut out = String::with_capacity(text_capacity(width, height));
    for y in 0..height {
        let line: String = (0..width)
            .map(|x| match sink.pixel(x, y) {
                Some(color) if color.alpha() > 0 => {
                    let index = usize::from(color.blue()) * (RAMP.len() - 1) / 255;
                    char::from(RAMP[index])
                }
                _ => ' ',
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Upper bound on the text size: one byte per pixel plus a newline per row.
fn text_capacity(width: u32, height: u32) -> usize {
    (width as usize + 1).saturating_mul(height as usize)
}
