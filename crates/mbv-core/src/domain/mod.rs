//! Core domain types for `.mbv` inspection.

mod color;
mod grid;
mod report;
mod view;
mod window;

pub use color::Argb;
pub use grid::{IntensityGrid, SampleRange, MAX_SAMPLE};
pub use report::{CaptureReport, GridDimensions, HistogramSummary};
pub use view::{FocusPoint, FocusTracker, ViewState, MAX_BIT_SHIFT, MAX_SCALE};
pub use window::{Region, TailPolicy, WindowMode, WindowSpec};
