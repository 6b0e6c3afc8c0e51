//! Per-capture inspection report.

use serde::{Deserialize, Serialize};

use super::SampleRange;

/// Summary of one decoded capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureReport {
    /// Path or name of the capture.
    pub path: String,
    /// Timestamp of inspection (ISO 8601).
    pub timestamp: String,
    /// Full grid dimensions.
    pub dimensions: GridDimensions,
    /// Rows visible after row padding.
    pub padded_height: usize,
    /// Smallest and largest sample, absent for an empty grid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_range: Option<SampleRange>,
    /// Histogram bounds and, optionally, its bins.
    pub histogram: HistogramSummary,
}

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl GridDimensions {
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Histogram extract carried by a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramSummary {
    /// Whether the raw 10-bit domain was binned.
    pub full_range: bool,
    /// Smallest bin count.
    pub min: u64,
    /// Largest bin count.
    pub max: u64,
    /// Total samples counted.
    pub total: u64,
    /// `(label, count)` pairs, included on request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<Vec<(u16, u64)>>,
}
