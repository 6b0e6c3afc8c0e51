//! The per-pixel pipeline: decoding, windowing and every renderer.
//!
//! All renderers are pure functions of a borrowed [`IntensityGrid`] and
//! their parameters, with a single side effect on the caller's
//! [`PixelSink`].
//!
//! [`IntensityGrid`]: crate::domain::IntensityGrid
//! [`PixelSink`]: crate::ports::PixelSink

pub mod cut;
pub mod decoder;
pub mod histogram;
pub mod magnifier;
pub mod render;
pub mod windowed;

pub use cut::{cut, gray_level};
pub use decoder::{decode, encode, load, HEADER_LEN};
pub use histogram::{
    compute_histogram, AxisScale, HistogramBin, HistogramSeries, Orientation, ValueAxis,
};
pub use magnifier::{
    render_magnified, LightRange, Magnifier, MagnifierMode, Neighborhood, Sampling,
};
pub use render::{overview_strides, render_full, render_overview, scroll_fraction};
pub use windowed::{render_windowed, windowed_sample};
