//! `.mbv` capture decoding.
//!
//! Layout, all little-endian:
//!
//! | offset | size | meaning |
//! |---|---|---|
//! | 0 | 2 | width (top bit clear) |
//! | 2 | 2 | height (top bit clear) |
//! | 4 | 2 x width x height | row-major samples |
//!
//! Each sample keeps its low byte in full and only the two lowest bits of
//! its high byte: `(high & 0x3) << 8 | low`.

use tracing::debug;

use crate::domain::IntensityGrid;
use crate::error::{FormatError, LoadError};
use crate::ports::ByteSource;

/// Size of the width/height header in bytes.
pub const HEADER_LEN: usize = 4;

const SIGN_BIT: u16 = 0x8000;
const HIGH_BYTE_MASK: u8 = 0x03;

/// Decodes a complete `.mbv` byte buffer.
///
/// Trailing bytes beyond the last sample are ignored.
///
/// # Errors
///
/// - [`FormatError::Empty`] if fewer than 4 bytes are present
/// - [`FormatError::InvalidBounds`] if width or height has its top bit set
/// - [`FormatError::Truncated`] if the buffer ends before the grid is filled
pub fn decode(bytes: &[u8]) -> Result<IntensityGrid, FormatError> {
    let Some((header, body)) = bytes.split_first_chunk::<HEADER_LEN>() else {
        return Err(FormatError::Empty);
    };

    let width = u16::from_le_bytes([header[0], header[1]]);
    let height = u16::from_le_bytes([header[2], header[3]]);
    if width & SIGN_BIT != 0 || height & SIGN_BIT != 0 {
        return Err(FormatError::InvalidBounds);
    }

    let (width, height) = (usize::from(width), usize::from(height));
    let count = width * height;
    let body = body.get(..count * 2).ok_or(FormatError::Truncated)?;

    let samples = body
        .chunks_exact(2)
        .map(|pair| (u16::from(pair[1] & HIGH_BYTE_MASK) << 8) | u16::from(pair[0]))
        .collect();

    debug!(width, height, "decoded .mbv capture");
    IntensityGrid::new(width, height, samples).ok_or(FormatError::Truncated)
}

/// Reads a source completely and decodes it.
///
/// # Errors
///
/// Returns [`LoadError::Access`] if the source cannot be read, and
/// [`LoadError::Format`] if its bytes are not a valid capture.
pub fn load(source: &dyn ByteSource) -> Result<IntensityGrid, LoadError> {
    let bytes = source.read_all()?;
    Ok(decode(&bytes)?)
}

/// Encodes a grid in the `.mbv` layout.
///
/// Samples are written as-is in little-endian order, so bits above bit 9
/// survive encoding but are dropped again by [`decode`].
///
/// Returns `None` if a dimension does not fit the 15-bit header fields.
#[must_use]
pub fn encode(grid: &IntensityGrid) -> Option<Vec<u8>> {
    let width = u16::try_from(grid.width()).ok().filter(|w| w & SIGN_BIT == 0)?;
    let height = u16::try_from(grid.height()).ok().filter(|h| h & SIGN_BIT == 0)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + grid.samples().len() * 2);
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    for sample in grid.samples() {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    Some(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_two_pixel_capture() {
        let bytes = [0x02, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFF, 0x03];
        let grid = decode(&bytes).expect("valid capture");
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.samples(), &[0, 1023]);
    }

    #[test]
    fn test_decode_masks_high_byte() {
        // 0xFF high byte keeps only its two low bits
        let bytes = [0x01, 0x00, 0x01, 0x00, 0x34, 0xFF];
        let grid = decode(&bytes).unwrap();
        assert_eq!(grid.sample(0, 0), 0x334);
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(&[]), Err(FormatError::Empty));
        assert_eq!(decode(&[0x01, 0x00, 0x01]), Err(FormatError::Empty));
    }

    #[test]
    fn test_decode_invalid_bounds() {
        assert_eq!(
            decode(&[0x00, 0x80, 0x01, 0x00]),
            Err(FormatError::InvalidBounds)
        );
        assert_eq!(
            decode(&[0x01, 0x00, 0xFF, 0xFF]),
            Err(FormatError::InvalidBounds)
        );
    }

    #[test]
    fn test_decode_truncated() {
        // 2x2 needs 8 sample bytes, only 7 present
        let bytes = [0x02, 0x00, 0x02, 0x00, 1, 0, 2, 0, 3, 0, 4];
        assert_eq!(decode(&bytes), Err(FormatError::Truncated));
    }

    #[test]
    fn test_decode_zero_sized_grid() {
        let grid = decode(&[0x00, 0x00, 0x05, 0x00]).unwrap();
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.height(), 5);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let bytes = [0x01, 0x00, 0x01, 0x00, 0x07, 0x00, 0xAA, 0xBB];
        assert_eq!(decode(&bytes).unwrap().samples(), &[7]);
    }

    #[test]
    fn test_encode_round_trip() {
        let grid = IntensityGrid::from_fn(5, 3, |x, y| ((x * 97 + y * 331) % 1024) as u16);
        let bytes = encode(&grid).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 2 * 15);
        assert_eq!(decode(&bytes).unwrap(), grid);
    }

    #[test]
    fn test_encode_rejects_oversized_dimensions() {
        let grid = IntensityGrid::new(0x8000, 0, vec![]).unwrap();
        assert!(encode(&grid).is_none());
    }
}
