//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the pixel pipeline and its
//! collaborators: where bytes come from, where pixels go, and where
//! reports and progress are delivered.

mod byte_source;
mod pixel_sink;
mod progress;
mod report_output;

pub use byte_source::{ByteSource, CaptureSource};
pub use pixel_sink::PixelSink;
pub use progress::{ProgressEvent, ProgressSink};
pub use report_output::ReportOutput;
