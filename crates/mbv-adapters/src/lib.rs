//! MBV Adapters - External adapters for mbv.
//!
//! This crate provides adapters for:
//! - Filesystem capture sources
//! - An in-memory raster sink for rendering

pub mod fs;
pub mod raster;

pub use fs::{load_capture, FsByteSource, FsCaptureSource};
pub use raster::ImageSink;
