//! Configuration file support for mbv.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/mbv/config.toml` (lowest priority)
//! - Project-local: `.mbv.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use mbv_core::domain::{MAX_BIT_SHIFT, MAX_SCALE};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A config value outside its accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidValue {
    #[error("view.bit_shift must be 0-{MAX_BIT_SHIFT}, got {0}")]
    BitShift(u32),
    #[error("view.scale must be 1-{MAX_SCALE}, got {0}")]
    Scale(u32),
    #[error("view.neighborhood must be at least 1, got 0")]
    Neighborhood,
    #[error("overview dimensions must be at least 1")]
    Overview,
    #[error("histogram.orientation must be 'vertical' or 'horizontal', got '{0}'")]
    Orientation(String),
    #[error("output.format must be 'json' or 'jsonl', got '{0}'")]
    Format(String),
}

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Rendering parameters.
    pub view: ViewConfig,
    /// Overview thumbnail size.
    pub overview: OverviewConfig,
    /// Histogram presentation.
    pub histogram: HistogramConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Rendering parameter configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Low bits discarded when windowing (0-8).
    pub bit_shift: Option<u32>,
    /// Rows skipped from the top of each capture.
    pub row_padding: Option<usize>,
    /// Magnifier replication factor (1-16).
    pub scale: Option<u32>,
    /// Magnifier neighborhood side length (at least 1).
    pub neighborhood: Option<u32>,
}

/// Overview configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OverviewConfig {
    /// Overview width in pixels.
    pub width: Option<u32>,
    /// Overview height in pixels.
    pub height: Option<u32>,
}

/// Histogram configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Bin the raw 10-bit domain instead of the windowed levels.
    pub full_range: Option<bool>,
    /// Logarithmic count axis.
    pub logarithmic: Option<bool>,
    /// Series orientation: "vertical" or "horizontal".
    pub orientation: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/mbv/config.toml`
    /// 2. Project-local: `.mbv.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as
    /// warnings and dropped so that the built-in defaults apply.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        config.sanitize();
        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), InvalidValue> {
        if let Some(s) = self.view.bit_shift {
            if s > MAX_BIT_SHIFT {
                return Err(InvalidValue::BitShift(s));
            }
        }
        if let Some(s) = self.view.scale {
            if s == 0 || s > MAX_SCALE {
                return Err(InvalidValue::Scale(s));
            }
        }
        if self.view.neighborhood == Some(0) {
            return Err(InvalidValue::Neighborhood);
        }
        if self.overview.width == Some(0) || self.overview.height == Some(0) {
            return Err(InvalidValue::Overview);
        }

        if let Some(ref o) = self.histogram.orientation {
            if o != "vertical" && o != "horizontal" {
                return Err(InvalidValue::Orientation(o.clone()));
            }
        }

        // Output format validation
        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(InvalidValue::Format(f.clone()));
            }
        }

        Ok(())
    }

    /// Drops invalid values one at a time, warning about each, until the
    /// config validates.
    fn sanitize(&mut self) {
        while let Err(e) = self.validate() {
            warn!("Ignoring config value: {e}");
            match e {
                InvalidValue::BitShift(_) => self.view.bit_shift = None,
                InvalidValue::Scale(_) => self.view.scale = None,
                InvalidValue::Neighborhood => self.view.neighborhood = None,
                InvalidValue::Overview => self.overview = OverviewConfig::default(),
                InvalidValue::Orientation(_) => self.histogram.orientation = None,
                InvalidValue::Format(_) => self.output.format = None,
            }
        }
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // View
        self.view.bit_shift = other.view.bit_shift.or(self.view.bit_shift);
        self.view.row_padding = other.view.row_padding.or(self.view.row_padding);
        self.view.scale = other.view.scale.or(self.view.scale);
        self.view.neighborhood = other.view.neighborhood.or(self.view.neighborhood);

        // Overview
        self.overview.width = other.overview.width.or(self.overview.width);
        self.overview.height = other.overview.height.or(self.overview.height);

        // Histogram
        self.histogram.full_range = other.histogram.full_range.or(self.histogram.full_range);
        self.histogram.logarithmic = other.histogram.logarithmic.or(self.histogram.logarithmic);
        self.histogram.orientation = other
            .histogram
            .orientation
            .or_else(|| self.histogram.orientation.take());

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mbv").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.mbv.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".mbv.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
