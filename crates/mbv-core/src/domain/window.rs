//! Display window and tail policies for the windowed renderer.

use serde::{Deserialize, Serialize};

use super::grid::MAX_SAMPLE;
use crate::error::WindowError;

/// Replacement rule for samples falling outside the display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailPolicy {
    /// Clamp to the nearest window bound.
    #[default]
    Border,
    /// Replace with 0.
    Zero,
    /// Replace with 255.
    Max,
}

impl TailPolicy {
    /// Resolves the `to_max` / `to_zero` toggle pair. `to_max` wins when both are set,
    /// and neither set means border clamp.
    #[must_use]
    pub const fn from_flags(to_max: bool, to_zero: bool) -> Self {
        match (to_max, to_zero) {
            (true, _) => Self::Max,
            (false, true) => Self::Zero,
            (false, false) => Self::Border,
        }
    }

    /// The replacement sample for an out-of-window value next to `bound`.
    #[must_use]
    pub const fn replace(self, bound: u16) -> u16 {
        match self {
            Self::Border => bound,
            Self::Zero => 0,
            Self::Max => 255,
        }
    }
}

/// How the windowed renderer maps samples before windowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Linear stretch of the raw sample by `1023 / (high - low)`, offset by `low`.
    #[default]
    Stretch,
    /// Replace out-of-window samples according to the tail policies.
    Clip,
}

/// Half-open rectangle `[left, right) x [top, bottom)` in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl Region {
    #[must_use]
    pub const fn new(left: usize, right: usize, top: usize, bottom: usize) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The region covering a whole `width x height` grid.
    #[must_use]
    pub const fn full(width: usize, height: usize) -> Self {
        Self::new(0, width, 0, height)
    }

    /// Intersection with a `width x height` grid.
    #[must_use]
    pub fn clamp_to(self, width: usize, height: usize) -> Self {
        let right = self.right.min(width);
        let bottom = self.bottom.min(height);
        Self {
            left: self.left.min(right),
            right,
            top: self.top.min(bottom),
            bottom,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}

/// Visible intensity window plus its tail policies and target region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowSpec {
    low: u16,
    high: u16,
    /// Policy for samples below `low`.
    pub left: TailPolicy,
    /// Policy for samples above `high`.
    pub right: TailPolicy,
    pub region: Region,
}

impl WindowSpec {
    /// Creates a window with border clamping on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Bounds`] unless `low < high <= 1023`.
    pub const fn new(low: u16, high: u16, region: Region) -> Result<Self, WindowError> {
        if low >= high || high > MAX_SAMPLE {
            return Err(WindowError::Bounds { low, high });
        }
        Ok(Self {
            low,
            high,
            left: TailPolicy::Border,
            right: TailPolicy::Border,
            region,
        })
    }

    /// Sets both tail policies from the four toggles of the viewer.
    #[must_use]
    pub fn with_tails(
        mut self,
        left_to_max: bool,
        left_to_zero: bool,
        right_to_max: bool,
        right_to_zero: bool,
    ) -> Self {
        self.left = TailPolicy::from_flags(left_to_max, left_to_zero);
        self.right = TailPolicy::from_flags(right_to_max, right_to_zero);
        self
    }

    #[must_use]
    pub const fn low(&self) -> u16 {
        self.low
    }

    #[must_use]
    pub const fn high(&self) -> u16 {
        self.high
    }

    /// Stretch coefficient `1023 / (high - low)`.
    #[must_use]
    pub fn stretch_coefficient(&self) -> f64 {
        f64::from(MAX_SAMPLE) / f64::from(self.high - self.low)
    }
}
