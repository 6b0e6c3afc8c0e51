//! Synthetic capture builders for testing.

use mbv_core::domain::{IntensityGrid, MAX_SAMPLE};
use mbv_core::pipeline::encode;

/// Builder for creating synthetic intensity grids.
///
/// Provides convenience methods for generating grids with specific
/// characteristics (flat, gradients, sharp edges) and their `.mbv` bytes.
pub struct SyntheticGridBuilder;

impl SyntheticGridBuilder {
    // === Flat Grids ===

    /// Creates a grid where every sample equals `value`.
    ///
    /// Useful for flat-neighborhood normalization and single-bin histograms.
    #[must_use]
    pub fn uniform(width: usize, height: usize, value: u16) -> IntensityGrid {
        IntensityGrid::from_fn(width, height, |_, _| value)
    }

    /// Creates an all-zero grid.
    #[must_use]
    pub fn black(width: usize, height: usize) -> IntensityGrid {
        Self::uniform(width, height, 0)
    }

    /// Creates a grid saturated at the 10-bit maximum.
    #[must_use]
    pub fn saturated(width: usize, height: usize) -> IntensityGrid {
        Self::uniform(width, height, MAX_SAMPLE)
    }

    // === Gradients ===

    /// Creates a left-to-right gradient spanning `0..=1023`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: usize, height: usize) -> IntensityGrid {
        let span = width.saturating_sub(1).max(1);
        IntensityGrid::from_fn(width, height, |x, _| {
            (usize::from(MAX_SAMPLE) * x / span) as u16
        })
    }

    /// Creates a top-to-bottom gradient spanning `0..=1023`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn vertical_gradient(width: usize, height: usize) -> IntensityGrid {
        let span = height.saturating_sub(1).max(1);
        IntensityGrid::from_fn(width, height, |_, y| {
            (usize::from(MAX_SAMPLE) * y / span) as u16
        })
    }

    /// Creates a row-major ramp `(row * width + col) % 1024`.
    ///
    /// Every sample is distinct for grids of up to 1024 pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn ramp(width: usize, height: usize) -> IntensityGrid {
        IntensityGrid::from_fn(width, height, |x, y| ((y * width + x) % 1024) as u16)
    }

    // === Sharp Edges ===

    /// Creates a checkerboard alternating `low` and `high` in `cell`-sized squares.
    #[must_use]
    pub fn checkerboard(
        width: usize,
        height: usize,
        cell: usize,
        low: u16,
        high: u16,
    ) -> IntensityGrid {
        let cell = cell.max(1);
        IntensityGrid::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                high
            } else {
                low
            }
        })
    }

    /// Creates a grid whose first `rows` rows are `marker` and the rest zero.
    ///
    /// Useful for checking that row padding hides the top of the capture.
    #[must_use]
    pub fn top_band(width: usize, height: usize, rows: usize, marker: u16) -> IntensityGrid {
        IntensityGrid::from_fn(width, height, |_, y| if y < rows { marker } else { 0 })
    }

    // === Encoded Captures ===

    /// Encodes a grid as `.mbv` bytes.
    ///
    /// Returns an empty buffer if a dimension does not fit the header.
    #[must_use]
    pub fn to_mbv_bytes(grid: &IntensityGrid) -> Vec<u8> {
        encode(grid).unwrap_or_default()
    }

    /// Builds a raw `.mbv` buffer from a header and little-endian sample pairs.
    #[must_use]
    pub fn raw_capture(width: u16, height: u16, samples: &[(u8, u8)]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + samples.len() * 2);
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        for &(low, high) in samples {
            bytes.push(low);
            bytes.push(high);
        }
        bytes
    }
}

// === Convenience Functions ===

/// A 64x64 ramp capture.
#[must_use]
pub fn ramp_capture() -> IntensityGrid {
    SyntheticGridBuilder::ramp(64, 64)
}

/// The two-pixel capture `[[0, 1023]]` as bytes.
#[must_use]
pub fn two_pixel_capture() -> Vec<u8> {
    SyntheticGridBuilder::raw_capture(2, 1, &[(0x00, 0x00), (0xFF, 0x03)])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mbv_core::pipeline::decode;

    #[test]
    fn test_uniform() {
        let grid = SyntheticGridBuilder::uniform(3, 2, 77);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.samples().iter().all(|&s| s == 77));
    }

    #[test]
    fn test_gradient_range() {
        let h = SyntheticGridBuilder::horizontal_gradient(11, 2);
        assert_eq!(h.sample(0, 0), 0);
        assert_eq!(h.sample(1, 10), 1023);

        let v = SyntheticGridBuilder::vertical_gradient(2, 5);
        assert_eq!(v.sample(0, 1), 0);
        assert_eq!(v.sample(4, 0), 1023);
    }

    #[test]
    fn test_single_pixel_gradient_does_not_divide_by_zero() {
        let grid = SyntheticGridBuilder::horizontal_gradient(1, 1);
        assert_eq!(grid.samples(), &[0]);
    }

    #[test]
    fn test_checkerboard_pattern() {
        let grid = SyntheticGridBuilder::checkerboard(4, 4, 2, 10, 900);
        assert_eq!(grid.sample(0, 0), 900);
        assert_eq!(grid.sample(0, 2), 10);
        assert_eq!(grid.sample(2, 2), 900);
    }

    #[test]
    fn test_top_band() {
        let grid = SyntheticGridBuilder::top_band(2, 4, 1, 500);
        assert_eq!(grid.row(0), &[500, 500]);
        assert_eq!(grid.row(1), &[0, 0]);
    }

    #[test]
    fn test_bytes_decode_back() {
        let grid = SyntheticGridBuilder::ramp(7, 5);
        let bytes = SyntheticGridBuilder::to_mbv_bytes(&grid);
        assert_eq!(decode(&bytes).unwrap(), grid);
    }

    #[test]
    fn test_two_pixel_capture() {
        let grid = decode(&two_pixel_capture()).unwrap();
        assert_eq!(grid.samples(), &[0, 1023]);
        assert_eq!(ramp_capture().width(), 64);
    }
}
