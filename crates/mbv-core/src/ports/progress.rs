//! Progress reporting port for UI integration.

use crate::domain::CaptureReport;

/// Events emitted during batch inspection for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Inspection started for a capture.
    Started {
        /// Name of the capture.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total captures in batch, if known.
        total: Option<usize>,
    },
    /// Inspection completed for a capture.
    Completed {
        /// The inspection report.
        report: CaptureReport,
    },
    /// A capture was skipped because it could not be loaded.
    Skipped {
        /// Name of the capture.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All captures have been processed.
    Finished {
        /// Total captures inspected successfully.
        processed: usize,
        /// Total captures skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
