//! Decoded intensity samples.

use serde::{Deserialize, Serialize};

/// Largest sample value allowed by the 10-bit `.mbv` format.
pub const MAX_SAMPLE: u16 = 0x03FF;

/// A rectangular, row-major matrix of raw intensity samples.
///
/// Samples produced by the decoder lie in `0..=1023`; wider values are
/// accepted by every operation and handled arithmetically. A grid is
/// immutable once built and is replaced wholesale on the next load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityGrid {
    width: usize,
    height: usize,
    samples: Vec<u16>,
}

impl IntensityGrid {
    /// Builds a grid from row-major samples.
    ///
    /// Returns `None` when `samples.len() != width * height`.
    #[must_use]
    pub fn new(width: usize, height: usize, samples: Vec<u16>) -> Option<Self> {
        (width.checked_mul(height)? == samples.len()).then_some(Self {
            width,
            height,
            samples,
        })
    }

    /// Builds a grid by evaluating `f(column, row)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u16) -> Self {
        let mut samples = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                samples.push(f(col, row));
            }
        }
        Self {
            width,
            height,
            samples,
        }
    }

    /// Builds a grid from nested rows. Returns `None` for ragged input.
    #[must_use]
    pub fn from_rows(rows: &[Vec<u16>]) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Self::new(width, rows.len(), rows.concat())
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// True when the grid has no pixels at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Sample at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics when the coordinates lie outside the grid.
    #[must_use]
    pub fn sample(&self, row: usize, col: usize) -> u16 {
        assert!(
            col < self.width,
            "column {col} out of bounds for width {}",
            self.width
        );
        self.samples[row * self.width + col]
    }

    /// Sample at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u16> {
        (row < self.height && col < self.width).then(|| self.samples[row * self.width + col])
    }

    /// One row of samples.
    #[must_use]
    pub fn row(&self, row: usize) -> &[u16] {
        &self.samples[row * self.width..(row + 1) * self.width]
    }

    /// Rows starting at `first_row`, top to bottom.
    pub fn rows_from(&self, first_row: usize) -> impl Iterator<Item = &[u16]> {
        self.samples
            .chunks_exact(self.width.max(1))
            .skip(first_row)
            .take(self.height.saturating_sub(first_row))
    }

    /// All samples in row-major order.
    #[must_use]
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Smallest and largest sample, or `None` for an empty grid.
    #[must_use]
    pub fn sample_range(&self) -> Option<SampleRange> {
        let min = *self.samples.iter().min()?;
        let max = *self.samples.iter().max()?;
        Some(SampleRange { min, max })
    }
}

/// Inclusive range of sample values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: u16,
    pub max: u16,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(IntensityGrid::new(2, 2, vec![0; 3]).is_none());
        assert!(IntensityGrid::new(2, 2, vec![0; 4]).is_some());
    }

    #[test]
    fn test_from_rows_and_indexing() {
        let grid = IntensityGrid::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.sample(1, 2), 6);
        assert_eq!(grid.row(0), &[1, 2, 3]);
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(IntensityGrid::from_rows(&[vec![1, 2], vec![3]]).is_none());
    }

    #[test]
    fn test_empty_grids() {
        let grid = IntensityGrid::new(0, 5, vec![]).unwrap();
        assert!(grid.is_empty());
        assert!(grid.sample_range().is_none());
        assert_eq!(grid.rows_from(0).count(), 0);
    }

    #[test]
    fn test_rows_from_skips_padding() {
        let grid = IntensityGrid::from_fn(2, 4, |_, row| row as u16);
        let firsts: Vec<u16> = grid.rows_from(1).map(|r| r[0]).collect();
        assert_eq!(firsts, vec![1, 2, 3]);
        assert_eq!(grid.rows_from(9).count(), 0);
    }

    #[test]
    fn test_sample_range() {
        let grid = IntensityGrid::from_rows(&[vec![7, 1023], vec![0, 12]]).unwrap();
        assert_eq!(
            grid.sample_range(),
            Some(SampleRange { min: 0, max: 1023 })
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_sample_panics_outside_columns() {
        let grid = IntensityGrid::from_fn(2, 2, |_, _| 0);
        let _ = grid.sample(0, 2);
    }
}
