//! Mock implementations of core port traits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use mbv_core::domain::{Argb, CaptureReport};
use mbv_core::error::AccessError;
use mbv_core::ports::{
    ByteSource, CaptureSource, PixelSink, ProgressEvent, ProgressSink, ReportOutput,
};

/// Mock implementation of `ByteSource` for testing.
///
/// Serves fixed bytes, or fails with `NotFound`, and counts reads.
#[derive(Clone)]
pub struct MockByteSource {
    name: String,
    bytes: Option<Vec<u8>>,
    read_count: Arc<Mutex<usize>>,
}

impl MockByteSource {
    /// Creates a source serving `bytes` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes: Some(bytes),
            read_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates a source whose every read fails with `NotFound`.
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes: None,
            read_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns the number of times the source has been read.
    #[must_use]
    pub fn read_count(&self) -> usize {
        *self
            .read_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ByteSource for MockByteSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn read_all(&self) -> Result<Vec<u8>, AccessError> {
        if let Ok(mut c) = self.read_count.lock() {
            *c += 1;
        }
        self.bytes
            .clone()
            .ok_or_else(|| AccessError::NotFound(self.name.clone()))
    }
}

/// Mock implementation of `CaptureSource` for testing.
pub struct MockCaptureSource {
    captures: Vec<MockByteSource>,
}

impl MockCaptureSource {
    /// Creates a source yielding the given captures in order.
    #[must_use]
    pub fn new(captures: Vec<MockByteSource>) -> Self {
        Self { captures }
    }

    /// Creates an empty capture source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl CaptureSource for MockCaptureSource {
    fn captures(&self) -> Box<dyn Iterator<Item = Box<dyn ByteSource>> + Send + '_> {
        Box::new(
            self.captures
                .iter()
                .cloned()
                .map(|c| Box::new(c) as Box<dyn ByteSource>),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.captures.len())
    }
}

/// Mock implementation of `PixelSink` for testing.
///
/// Records every write in a sparse map and counts resizes and clears.
/// Writes outside the current dimensions are ignored, as the port requires.
#[derive(Debug, Default)]
pub struct MockPixelSink {
    width: u32,
    height: u32,
    pixels: HashMap<(u32, u32), Argb>,
    writes: usize,
    resize_count: usize,
    clear_count: usize,
}

impl MockPixelSink {
    /// Creates a sink with fixed dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Returns the pixel at `(x, y)`, if it has been written.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Argb> {
        self.pixels.get(&(x, y)).copied()
    }

    /// Returns the number of distinct pixels currently set.
    #[must_use]
    pub fn written(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the number of accepted `set_pixel` calls, repeats included.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }

    #[must_use]
    pub const fn resize_count(&self) -> usize {
        self.resize_count
    }

    #[must_use]
    pub const fn clear_count(&self) -> usize {
        self.clear_count
    }

    /// Iterates over every written pixel.
    pub fn pixels(&self) -> impl Iterator<Item = ((u32, u32), Argb)> + '_ {
        self.pixels.iter().map(|(&pos, &color)| (pos, color))
    }
}

impl PixelSink for MockPixelSink {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.resize_count += 1;
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Argb) {
        if x < self.width && y < self.height {
            self.pixels.insert((x, y), color);
            self.writes += 1;
        }
    }

    fn clear(&mut self) {
        self.pixels.clear();
        self.clear_count += 1;
    }
}

/// Mock implementation of `ReportOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockReportOutput {
    reports: Arc<Mutex<Vec<CaptureReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockReportOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<CaptureReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockReportOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportOutput for MockReportOutput {
    fn write(&self, report: &CaptureReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Started { .. }))
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Completed { .. }))
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Skipped { .. }))
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&ProgressEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
