//! Error types for decoding and view configuration.

use std::io;

use thiserror::Error;

/// The byte stream is not a well-formed `.mbv` capture.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer than the 4 header bytes were available.
    #[error("empty")]
    Empty,
    /// Width or height has its top bit set (negative as signed 16-bit).
    #[error("invalid bounds")]
    InvalidBounds,
    /// The stream ended before every sample of the grid was read.
    #[error("truncated")]
    Truncated,
}

/// The byte stream could not be read at all.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("capture not found: {0}")]
    NotFound(String),
    #[error("access denied: {0}")]
    PermissionDenied(String),
    #[error("failed to read {name}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl AccessError {
    /// Classifies an I/O error raised while reading `name`.
    #[must_use]
    pub fn from_io(name: impl Into<String>, source: io::Error) -> Self {
        let name = name.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(name),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(name),
            _ => Self::Io { name, source },
        }
    }
}

/// Any failure of a load attempt. The previously loaded grid stays authoritative.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("malformed .mbv capture: {0}")]
    Format(#[from] FormatError),
}

/// A view parameter was set outside its allowed range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    #[error("bit shift must be 0..=8, got {0}")]
    BitShift(u32),
    #[error("magnification scale must be 1..=16, got {0}")]
    Scale(u32),
    #[error("neighborhood size must be at least 1, got {0}")]
    Neighborhood(u32),
    #[error("row padding {padding} must be below the image height {height}")]
    RowPadding { padding: usize, height: usize },
}

/// The display window of the windowed renderer is malformed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    #[error("window bounds must satisfy 0 <= low < high <= 1023, got {low}..{high}")]
    Bounds { low: u16, high: u16 },
}
