//! MBV Core - Domain types and pixel pipeline for `.mbv` captures
//!
//! This crate decodes the 10-bit `.mbv` raster format and renders it through
//! bit-shift windowing, overview decimation, a magnifier with nearest and
//! bilinear sampling, histogram binning and a contrast-stretch renderer.
//! Rendering targets and byte sources are ports implemented elsewhere.

pub mod domain;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod session;

pub use domain::{
    Argb, CaptureReport, FocusPoint, FocusTracker, GridDimensions, HistogramSummary,
    IntensityGrid, Region, SampleRange, TailPolicy, ViewState, WindowMode, WindowSpec,
};
pub use error::{AccessError, FormatError, LoadError, ViewError, WindowError};
pub use pipeline::{
    compute_histogram, cut, decode, render_full, render_magnified, render_overview,
    render_windowed, AxisScale, HistogramSeries, MagnifierMode, Orientation, Sampling, ValueAxis,
};
pub use ports::{ByteSource, CaptureSource, PixelSink, ProgressEvent, ProgressSink, ReportOutput};
pub use session::{Probe, Session};
