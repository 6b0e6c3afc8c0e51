//! Intensity histograms and their chart value axis.
//!
//! Counting happens in one of two domains:
//!
//! - **full range**: 1024 counters indexed by the raw sample, then summed in
//!   groups of 4 so the series never has more than 256 bars
//! - **windowed**: 256 counters indexed by the windowed gray level
//!
//! Either way the output is an ordered series of `(label, count)` bins.
//! Whether a chart shows the counts on a linear or logarithmic axis does not
//! change the counts; see [`ValueAxis`].

use serde::{Deserialize, Serialize};

use super::cut::gray_level;
use crate::domain::{HistogramSummary, IntensityGrid, ViewState, MAX_SAMPLE};

/// Raw counters in full-range mode.
pub const FULL_RANGE_COUNTERS: usize = MAX_SAMPLE as usize + 1;
/// Bars in either output series.
pub const VISIBLE_BINS: usize = 256;
/// Raw counters summed into one full-range output bin.
pub const GROUP_SIZE: usize = FULL_RANGE_COUNTERS / VISIBLE_BINS;

/// One bar of a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// First raw sample of the group (full range) or the gray level (windowed).
    pub label: u16,
    pub count: u64,
}

/// Presentation axis pairing for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Labels along x, counts along y.
    #[default]
    Vertical,
    /// Counts along x, labels along y.
    Horizontal,
}

/// Ordered histogram bins plus the extreme bin counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramSeries {
    pub bins: Vec<HistogramBin>,
    /// Smallest bin count.
    pub min: u64,
    /// Largest bin count.
    pub max: u64,
    pub full_range: bool,
}

impl HistogramSeries {
    fn from_counts(counts: Vec<u64>, full_range: bool) -> Self {
        let step = if full_range { GROUP_SIZE } else { 1 };
        let bins: Vec<HistogramBin> = counts
            .into_iter()
            .enumerate()
            .map(|(index, count)| HistogramBin {
                // labels stay below 1024
                label: u16::try_from(index * step).unwrap_or(u16::MAX),
                count,
            })
            .collect();
        let min = bins.iter().map(|b| b.count).min().unwrap_or(0);
        let max = bins.iter().map(|b| b.count).max().unwrap_or(0);
        Self {
            bins,
            min,
            max,
            full_range,
        }
    }

    /// Samples counted across all bins.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// `(label, count)` pairs.
    pub fn vertical(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.bins.iter().map(|b| (b.label, b.count))
    }

    /// `(count, label)` pairs.
    pub fn horizontal(&self) -> impl Iterator<Item = (u64, u16)> + '_ {
        self.bins.iter().map(|b| (b.count, b.label))
    }

    /// Both orientations as `[x, y]` points.
    #[must_use]
    pub fn points(&self, orientation: Orientation) -> Vec<[u64; 2]> {
        match orientation {
            Orientation::Vertical => self
                .vertical()
                .map(|(label, count)| [u64::from(label), count])
                .collect(),
            Orientation::Horizontal => self
                .horizontal()
                .map(|(count, label)| [count, u64::from(label)])
                .collect(),
        }
    }

    /// Where a raw-sample window bound sits on this series' label axis.
    ///
    /// Full-range labels are raw samples; windowed labels are in the 256
    /// level domain, so the bound is divided by 4.
    #[must_use]
    pub fn window_marker(&self, bound: u16) -> f64 {
        if self.full_range {
            f64::from(bound)
        } else {
            f64::from(bound) / 4.0
        }
    }

    /// Condensed form for reports.
    #[must_use]
    pub fn summary(&self, include_bins: bool) -> HistogramSummary {
        HistogramSummary {
            full_range: self.full_range,
            min: self.min,
            max: self.max,
            total: self.total(),
            bins: include_bins.then(|| self.vertical().collect()),
        }
    }
}

/// Counts every visible sample of the grid.
///
/// Rows above `view.row_padding` are skipped. In full-range mode samples
/// wider than 10 bits land in the top counter.
#[must_use]
pub fn compute_histogram(
    grid: &IntensityGrid,
    view: &ViewState,
    full_range: bool,
) -> HistogramSeries {
    if full_range {
        let mut counters = vec![0_u64; FULL_RANGE_COUNTERS];
        for row in grid.rows_from(view.row_padding) {
            for &sample in row {
                counters[usize::from(sample.min(MAX_SAMPLE))] += 1;
            }
        }
        let grouped = counters
            .chunks_exact(GROUP_SIZE)
            .map(|group| group.iter().sum())
            .collect();
        HistogramSeries::from_counts(grouped, true)
    } else {
        let mut counters = vec![0_u64; VISIBLE_BINS];
        for row in grid.rows_from(view.row_padding) {
            for &sample in row {
                counters[usize::from(gray_level(sample, view.bit_shift))] += 1;
            }
        }
        HistogramSeries::from_counts(counters, false)
    }
}

/// Scale of a chart's count axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisScale {
    Linear,
    #[default]
    Logarithmic,
}

/// Count axis for plotting a [`HistogramSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAxis {
    pub scale: AxisScale,
    pub lower: f64,
    pub upper: f64,
}

impl ValueAxis {
    /// Axis spanning a series.
    ///
    /// A logarithmic axis starts at `min + 1` so that the lower bound stays
    /// positive. A linear axis starts at zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn for_series(series: &HistogramSeries, scale: AxisScale) -> Self {
        let lower = match scale {
            AxisScale::Linear => 0.0,
            AxisScale::Logarithmic => series.min as f64 + 1.0,
        };
        Self {
            scale,
            lower,
            upper: series.max as f64,
        }
    }

    /// Position of `count` along the axis, clamped to `[0, 1]`.
    ///
    /// Degenerate axes map everything to 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, count: u64) -> f64 {
        let value = count as f64;
        let (value, lower, upper) = match self.scale {
            AxisScale::Linear => (value, self.lower, self.upper),
            AxisScale::Logarithmic => {
                if value <= 0.0 {
                    return 0.0;
                }
                (value.log10(), self.lower.log10(), self.upper.log10())
            }
        };
        let span = upper - lower;
        if !span.is_finite() || span <= 0.0 {
            return 0.0;
        }
        ((value - lower) / span).clamp(0.0, 1.0)
    }
}
