//! Test support utilities for mbv.
//!
//! Provides mocks, synthetic grid builders, and utilities for testing
//! the `.mbv` decoding and rendering pipeline.
//!
//! # Example
//!
//! ```
//! use mbv_test_support::{MockByteSource, SyntheticGridBuilder};
//!
//! // Create a synthetic capture
//! let grid = SyntheticGridBuilder::horizontal_gradient(64, 32);
//! let bytes = SyntheticGridBuilder::to_mbv_bytes(&grid);
//!
//! // Serve it through a mock byte source
//! let source = MockByteSource::new("gradient.mbv", bytes);
//! ```

mod builders;
mod mocks;

pub use builders::{ramp_capture, two_pixel_capture, SyntheticGridBuilder};
pub use mocks::{
    MockByteSource, MockCaptureSource, MockPixelSink, MockProgressSink, MockReportOutput,
};
