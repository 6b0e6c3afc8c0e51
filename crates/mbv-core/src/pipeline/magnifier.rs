//! Magnified rendering of a square neighborhood around the focus point.
//!
//! Two sampling algorithms, each with an optional per-neighborhood contrast
//! normalization, share one neighborhood extraction and min/max scan:
//!
//! | sampling | raw | normalized |
//! |---|---|---|
//! | nearest | `cut(sample)` | `round((sample - min) * 255 / (max - min))` |
//! | bilinear | `cut(interpolated)` | `trunc(clamp((interpolated - min) * 255 / (max - min)))` |
//!
//! Every source pixel becomes a `scale x scale` block in the sink.

use serde::{Deserialize, Serialize};

use super::cut::cut;
use crate::domain::{Argb, FocusPoint, IntensityGrid, ViewState};
use crate::ports::PixelSink;

/// Sampling algorithm of the magnifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// Replicate each source pixel.
    #[default]
    Nearest,
    /// Interpolate between each pixel and its right, lower and diagonal neighbors.
    Bilinear,
}

impl Sampling {
    /// Extra rows and columns read past the nominal neighborhood.
    const fn margin(self) -> i64 {
        match self {
            Self::Nearest => 0,
            Self::Bilinear => 1,
        }
    }
}

/// Full magnifier configuration: sampling algorithm and normalization switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MagnifierMode {
    pub sampling: Sampling,
    pub normalize: bool,
}

impl MagnifierMode {
    #[must_use]
    pub const fn new(sampling: Sampling, normalize: bool) -> Self {
        Self {
            sampling,
            normalize,
        }
    }
}

/// Smallest and largest sample inside a neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightRange {
    pub min: u16,
    pub max: u16,
}

/// The square block of source pixels a magnifier reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    /// Leftmost grid column.
    pub left: i64,
    /// Topmost grid row, row padding included.
    pub top: i64,
    /// Side length in source pixels.
    pub size: usize,
}

impl Neighborhood {
    /// The neighborhood centered on `focus` (viewport coordinates).
    ///
    /// The corner is `focus - size / 2`, then shifted down by the row padding.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn around(focus: FocusPoint, view: &ViewState) -> Self {
        let half = i64::from(view.neighborhood / 2);
        Self {
            left: focus.x - half,
            top: focus.y - half + view.row_padding as i64,
            size: view.neighborhood as usize,
        }
    }

    /// Whether every pixel `sampling` reads lies inside the grid.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn fits(&self, grid: &IntensityGrid, sampling: Sampling) -> bool {
        let reach = self.size as i64 + sampling.margin();
        self.left >= 0
            && self.top >= 0
            && self.left + reach <= grid.width() as i64
            && self.top + reach <= grid.height() as i64
    }

    /// Smallest and largest sample of the `size x size` block.
    ///
    /// # Panics
    ///
    /// Panics if the block is not inside the grid.
    #[must_use]
    pub fn light_range(&self, grid: &IntensityGrid) -> LightRange {
        let (left, top) = self.origin();
        let mut range = LightRange {
            min: u16::MAX,
            max: u16::MIN,
        };
        for row in top..top + self.size {
            for &sample in &grid.row(row)[left..left + self.size] {
                range.min = range.min.min(sample);
                range.max = range.max.max(sample);
            }
        }
        range
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn origin(&self) -> (usize, usize) {
        assert!(
            self.left >= 0 && self.top >= 0,
            "magnifier neighborhood out of bounds at ({}, {})",
            self.left,
            self.top
        );
        (self.left as usize, self.top as usize)
    }
}

/// Linear rescale of a neighborhood's `[min, max]` to `[0, 255]`.
#[derive(Debug, Clone, Copy)]
struct Normalizer {
    min: f64,
    /// `None` for a flat neighborhood, which renders black.
    coef: Option<f64>,
}

impl Normalizer {
    fn new(range: LightRange) -> Self {
        let span = range.max.saturating_sub(range.min);
        Self {
            min: f64::from(range.min),
            coef: (span > 0).then(|| 255.0 / f64::from(span)),
        }
    }

    fn scaled(&self, value: f64) -> Option<f64> {
        self.coef.map(|coef| (value - self.min) * coef)
    }

    /// Level of a source sample, rounded to the nearest gray.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rounded(&self, sample: u16) -> u8 {
        self.scaled(f64::from(sample))
            .map_or(0, |level| level.round().clamp(0.0, 255.0) as u8)
    }

    /// Level of an interpolated value, truncated toward zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn truncated(&self, value: f64) -> u8 {
        self.scaled(value)
            .map_or(0, |level| level.clamp(0.0, 255.0) as u8)
    }
}

/// Bilinear basis of one source cell: `value = a*fx + b*fy + c*fx*fy + d`.
#[derive(Debug, Clone, Copy)]
struct Cell {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Cell {
    fn at(grid: &IntensityGrid, row: usize, col: usize) -> Self {
        let d = f64::from(grid.sample(row, col));
        let a = f64::from(grid.sample(row, col + 1)) - d;
        let b = f64::from(grid.sample(row + 1, col)) - d;
        let c = f64::from(grid.sample(row + 1, col + 1)) - a - b - d;
        Self { a, b, c, d }
    }

    fn value(&self, fx: f64, fy: f64) -> f64 {
        self.a * fx + self.b * fy + self.c * fx * fy + self.d
    }
}

/// Renders the neighborhood around `focus` into `sink` at `view.scale`.
///
/// The sink is neither resized nor cleared; block `(i, j)` of the
/// neighborhood covers sink pixels `[j*scale, (j+1)*scale) x [i*scale, (i+1)*scale)`.
///
/// # Panics
///
/// Panics if the neighborhood (plus one row and column for bilinear sampling)
/// is not inside the grid. Check [`Neighborhood::fits`] first.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_magnified(
    grid: &IntensityGrid,
    focus: FocusPoint,
    view: &ViewState,
    mode: MagnifierMode,
    sink: &mut dyn PixelSink,
) {
    let area = Neighborhood::around(focus, view);
    assert!(
        area.fits(grid, mode.sampling),
        "magnifier neighborhood out of bounds: {area:?} in {}x{} grid",
        grid.width(),
        grid.height()
    );

    let (left, top) = area.origin();
    let normalizer = mode.normalize.then(|| Normalizer::new(area.light_range(grid)));
    let scale = view.scale;
    let steps = f64::from(scale);

    for i in 0..area.size {
        for j in 0..area.size {
            let (row, col) = (top + i, left + j);
            let (x0, y0) = (j as u32 * scale, i as u32 * scale);

            match mode.sampling {
                Sampling::Nearest => {
                    let sample = grid.sample(row, col);
                    let color = normalizer.map_or_else(
                        || cut(sample, view.bit_shift),
                        |n| Argb::gray(n.rounded(sample)),
                    );
                    fill_block(sink, x0, y0, scale, color);
                }
                Sampling::Bilinear => {
                    let cell = Cell::at(grid, row, col);
                    for dy in 0..scale {
                        for dx in 0..scale {
                            let value = cell.value(f64::from(dx) / steps, f64::from(dy) / steps);
                            let color = normalizer.map_or_else(
                                // Saturating float cast truncates toward zero.
                                || cut(value as u16, view.bit_shift),
                                |n| Argb::gray(n.truncated(value)),
                            );
                            sink.set_pixel(x0 + dx, y0 + dy, color);
                        }
                    }
                }
            }
        }
    }
}

fn fill_block(sink: &mut dyn PixelSink, x0: u32, y0: u32, scale: u32, color: Argb) {
    for dy in 0..scale {
        for dx in 0..scale {
            sink.set_pixel(x0 + dx, y0 + dy, color);
        }
    }
}

/// Magnifier with a dirty flag telling the collaborator when its sink
/// holds a stale render.
#[derive(Debug, Clone, Copy, Default)]
pub struct Magnifier {
    pub mode: MagnifierMode,
    dirty: bool,
}

impl Magnifier {
    #[must_use]
    pub const fn new(mode: MagnifierMode) -> Self {
        Self { mode, dirty: false }
    }

    /// Renders and marks the sink dirty. See [`render_magnified`].
    ///
    /// # Panics
    ///
    /// Panics if the neighborhood is not inside the grid.
    pub fn render(
        &mut self,
        grid: &IntensityGrid,
        focus: FocusPoint,
        view: &ViewState,
        sink: &mut dyn PixelSink,
    ) {
        render_magnified(grid, focus, view, self.mode, sink);
        self.dirty = true;
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the sink if a render is on it. Returns whether it cleared.
    pub fn clear(&mut self, sink: &mut dyn PixelSink) -> bool {
        if !self.dirty {
            return false;
        }
        sink.clear();
        self.dirty = false;
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapSink {
        size: (u32, u32),
        pixels: HashMap<(u32, u32), Argb>,
        clears: usize,
    }

    impl PixelSink for MapSink {
        fn dimensions(&self) -> (u32, u32) {
            self.size
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
        fn set_pixel(&mut self, x: u32, y: u32, color: Argb) {
            self.pixels.insert((x, y), color);
        }
        fn clear(&mut self) {
            self.pixels.clear();
            self.clears += 1;
        }
    }

    fn view(neighborhood: u32, scale: u32) -> ViewState {
        ViewState {
            bit_shift: 0,
            row_padding: 0,
            scale,
            neighborhood,
        }
    }

    #[test]
    fn test_neighborhood_corner_and_padding() {
        let v = ViewState {
            row_padding: 3,
            ..view(5, 2)
        };
        let area = Neighborhood::around(FocusPoint::new(10, 10), &v);
        assert_eq!(area.left, 8);
        assert_eq!(area.top, 11);
        assert_eq!(area.size, 5);
    }

    #[test]
    fn test_neighborhood_fits() {
        let grid = IntensityGrid::from_fn(10, 10, |_, _| 0);
        let v = view(4, 1);
        // corner (6, 6), reads 6..10
        let edge = Neighborhood::around(FocusPoint::new(8, 8), &v);
        assert!(edge.fits(&grid, Sampling::Nearest));
        assert!(!edge.fits(&grid, Sampling::Bilinear));
        let outside = Neighborhood::around(FocusPoint::new(1, 5), &v);
        assert!(!outside.fits(&grid, Sampling::Nearest));
    }

    #[test]
    fn test_nearest_replicates_blocks() {
        let grid = IntensityGrid::from_fn(6, 6, |x, y| (y * 6 + x) as u16);
        let mut sink = MapSink::default();
        render_magnified(
            &grid,
            FocusPoint::new(2, 2),
            &view(2, 3),
            MagnifierMode::new(Sampling::Nearest, false),
            &mut sink,
        );
        // corner (1, 1), 2x2 source pixels, 3x3 blocks
        assert_eq!(sink.pixels.len(), 36);
        assert_eq!(sink.pixels[&(0, 0)], Argb::gray(7));
        assert_eq!(sink.pixels[&(2, 2)], Argb::gray(7));
        assert_eq!(sink.pixels[&(3, 0)], Argb::gray(8));
        assert_eq!(sink.pixels[&(5, 5)], Argb::gray(14));
    }

    #[test]
    fn test_nearest_normalized_spans_full_range() {
        let grid = IntensityGrid::from_rows(&[vec![300, 400], vec![500, 600]]).unwrap();
        let mut sink = MapSink::default();
        render_magnified(
            &grid,
            FocusPoint::new(1, 1),
            &view(2, 1),
            MagnifierMode::new(Sampling::Nearest, true),
            &mut sink,
        );
        assert_eq!(sink.pixels[&(0, 0)], Argb::gray(0));
        assert_eq!(sink.pixels[&(1, 0)], Argb::gray(85));
        assert_eq!(sink.pixels[&(0, 1)], Argb::gray(170));
        assert_eq!(sink.pixels[&(1, 1)], Argb::gray(255));
    }

    #[test]
    fn test_flat_neighborhood_normalizes_to_black() {
        let grid = IntensityGrid::from_fn(4, 4, |_, _| 512);
        let mut sink = MapSink::default();
        render_magnified(
            &grid,
            FocusPoint::new(2, 2),
            &view(2, 2),
            MagnifierMode::new(Sampling::Bilinear, true),
            &mut sink,
        );
        assert!(sink.pixels.values().all(|&c| c == Argb::gray(0)));
    }

    #[test]
    fn test_bilinear_hits_corners_exactly() {
        let grid = IntensityGrid::from_rows(&[vec![0, 100, 7], vec![200, 40, 9], vec![1, 2, 3]])
            .unwrap();
        let mut sink = MapSink::default();
        render_magnified(
            &grid,
            FocusPoint::new(1, 1),
            &view(2, 4),
            MagnifierMode::new(Sampling::Bilinear, false),
            &mut sink,
        );
        // The top-left pixel of each block is the source sample itself.
        assert_eq!(sink.pixels[&(0, 0)], Argb::gray(0));
        assert_eq!(sink.pixels[&(4, 0)], Argb::gray(100));
        assert_eq!(sink.pixels[&(0, 4)], Argb::gray(200));
        assert_eq!(sink.pixels[&(4, 4)], Argb::gray(40));
    }

    #[test]
    fn test_bilinear_interpolates_midpoints() {
        let grid = IntensityGrid::from_rows(&[vec![0, 100], vec![200, 40]]).unwrap();
        let mut sink = MapSink::default();
        let v = view(1, 2);
        // neighborhood of 1 at (0, 0) reads the whole 2x2 grid
        render_magnified(
            &grid,
            FocusPoint::new(0, 0),
            &v,
            MagnifierMode::new(Sampling::Bilinear, false),
            &mut sink,
        );
        assert_eq!(sink.pixels[&(1, 0)], Argb::gray(50));
        assert_eq!(sink.pixels[&(0, 1)], Argb::gray(100));
        // a=100, b=200, c=-260: 50 + 100 - 65 + 0 = 85
        assert_eq!(sink.pixels[&(1, 1)], Argb::gray(85));
    }

    #[test]
    fn test_bilinear_normalized_clamps() {
        // The 2x2 block spans 100..200; the extra column and row read by
        // interpolation lie outside that range.
        let grid =
            IntensityGrid::from_rows(&[vec![100, 200, 1000], vec![100, 200, 1000], vec![0, 0, 0]])
                .unwrap();
        let mut sink = MapSink::default();
        render_magnified(
            &grid,
            FocusPoint::new(1, 1),
            &view(2, 2),
            MagnifierMode::new(Sampling::Bilinear, true),
            &mut sink,
        );
        assert_eq!(sink.pixels[&(0, 0)], Argb::gray(0));
        assert_eq!(sink.pixels[&(2, 0)], Argb::gray(255));
        // Halfway from 200 toward 1000 overshoots the 100..200 range.
        assert_eq!(sink.pixels[&(3, 0)], Argb::gray(255));
        // Halfway from 100 toward 0 undershoots.
        assert_eq!(sink.pixels[&(0, 3)], Argb::gray(0));
    }

    #[test]
    fn test_normalized_bilinear_truncates_nearest_rounds() {
        let grid =
            IntensityGrid::from_rows(&[vec![0, 3, 3], vec![3, 3, 3], vec![3, 3, 3]]).unwrap();
        let mut sink = MapSink::default();
        render_magnified(
            &grid,
            FocusPoint::new(1, 1),
            &view(2, 2),
            MagnifierMode::new(Sampling::Bilinear, true),
            &mut sink,
        );
        // 1.5 * 85 = 127.5
        assert_eq!(sink.pixels[&(1, 0)], Argb::gray(127));
        assert_eq!(sink.pixels[&(2, 0)], Argb::gray(255));

        // 1 * 255 / 6 = 42.5
        let grid = IntensityGrid::from_rows(&[vec![0, 1], vec![6, 6]]).unwrap();
        let mut sink = MapSink::default();
        render_magnified(
            &grid,
            FocusPoint::new(1, 1),
            &view(2, 1),
            MagnifierMode::new(Sampling::Nearest, true),
            &mut sink,
        );
        assert_eq!(sink.pixels[&(1, 0)], Argb::gray(43));
    }

    #[test]
    fn test_light_range_ignores_values_outside_block() {
        let grid = IntensityGrid::from_rows(&[vec![900, 5], vec![300, 301]]).unwrap();
        let area = Neighborhood {
            left: 0,
            top: 1,
            size: 1,
        };
        assert_eq!(area.light_range(&grid), LightRange { min: 300, max: 300 });
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_overrun_panics() {
        let grid = IntensityGrid::from_fn(4, 4, |_, _| 0);
        let mut sink = MapSink::default();
        render_magnified(
            &grid,
            FocusPoint::new(3, 3),
            &view(4, 1),
            MagnifierMode::default(),
            &mut sink,
        );
    }

    #[test]
    fn test_magnifier_dirty_flag() {
        let grid = IntensityGrid::from_fn(8, 8, |_, _| 10);
        let mut magnifier = Magnifier::new(MagnifierMode::default());
        let mut sink = MapSink::default();
        assert!(!magnifier.is_dirty());
        assert!(!magnifier.clear(&mut sink));

        magnifier.render(&grid, FocusPoint::new(4, 4), &view(2, 2), &mut sink);
        assert!(magnifier.is_dirty());
        assert!(!sink.pixels.is_empty());

        assert!(magnifier.clear(&mut sink));
        assert!(!magnifier.is_dirty());
        assert_eq!(sink.clears, 1);
        assert!(sink.pixels.is_empty());
    }
}
