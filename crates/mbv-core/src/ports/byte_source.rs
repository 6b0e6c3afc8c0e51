//! Byte stream ports feeding the decoder.

use crate::error::AccessError;

/// A single readable capture, such as a picked file.
pub trait ByteSource: Send + Sync {
    /// Human-readable name used in reports and log messages.
    fn name(&self) -> String;

    /// Reads the entire stream into memory.
    ///
    /// # Errors
    ///
    /// Returns an [`AccessError`] if the stream is missing or unreadable.
    fn read_all(&self) -> Result<Vec<u8>, AccessError>;
}

/// Port for enumerating captures from a source.
pub trait CaptureSource: Send + Sync {
    /// Returns the captures found by this source.
    fn captures(&self) -> Box<dyn Iterator<Item = Box<dyn ByteSource>> + Send + '_>;

    /// Returns the total number of captures, if known.
    fn count_hint(&self) -> Option<usize>;
}
