//! Full-size and overview renderers.

use tracing::trace;

use super::cut::cut;
use crate::domain::{IntensityGrid, ViewState};
use crate::ports::PixelSink;

/// Renders every visible row of the grid at 1:1.
///
/// The sink is resized to `(width, height - row_padding)` and row `i` of the
/// grid lands on sink row `i - row_padding`. Empty grids leave the sink
/// untouched.
#[allow(clippy::cast_possible_truncation)]
pub fn render_full(grid: &IntensityGrid, view: &ViewState, sink: &mut dyn PixelSink) {
    if grid.is_empty() {
        return;
    }

    // Dimensions are bounded by the 15-bit header, so they fit in u32.
    let visible = view.padded_height(grid.height());
    sink.resize(grid.width() as u32, visible as u32);

    for (y, row) in grid.rows_from(view.row_padding).enumerate() {
        for (x, &sample) in row.iter().enumerate() {
            sink.set_pixel(x as u32, y as u32, cut(sample, view.bit_shift));
        }
    }
}

/// Integer decimation strides `(dx, dy)` fitting a grid into a target size.
///
/// Strides truncate toward zero and are clamped to at least 1, so grids
/// smaller than the target are sampled pixel by pixel.
#[must_use]
pub fn overview_strides(
    grid_width: usize,
    grid_height: usize,
    target_width: u32,
    target_height: u32,
) -> (usize, usize) {
    let stride = |extent: usize, target: u32| {
        let target = usize::try_from(target).unwrap_or(usize::MAX).max(1);
        (extent / target).max(1)
    };
    (
        stride(grid_width, target_width),
        stride(grid_height, target_height),
    )
}

/// Renders a nearest-sample decimation of the grid into a fixed-size sink.
///
/// The top-left sample of each `dx x dy` cell is windowed and written at
/// `(col / dx, (row - row_padding) / dy)`. The vertical stride is derived
/// from the full grid height. Cells that land outside the target are
/// skipped. The sink is not resized.
#[allow(clippy::cast_possible_truncation)]
pub fn render_overview(
    grid: &IntensityGrid,
    view: &ViewState,
    sink: &mut dyn PixelSink,
    target_width: u32,
    target_height: u32,
) {
    if grid.is_empty() {
        return;
    }

    let (dx, dy) = overview_strides(grid.width(), grid.height(), target_width, target_height);
    trace!(dx, dy, "overview strides");

    for row in (view.row_padding..grid.height()).step_by(dy) {
        let y = (row - view.row_padding) / dy;
        if y >= target_height as usize {
            break;
        }
        let samples = grid.row(row);
        for col in (0..grid.width()).step_by(dx) {
            let x = col / dx;
            if x >= target_width as usize {
                break;
            }
            sink.set_pixel(x as u32, y as u32, cut(samples[col], view.bit_shift));
        }
    }
}

/// Fraction of the full image to scroll to after a click at `click_y` on an
/// overview of height `overview_height`, clamped to `[0, 1]`.
#[must_use]
pub fn scroll_fraction(click_y: f64, overview_height: f64) -> f64 {
    if overview_height <= 0.0 {
        return 0.0;
    }
    (click_y / overview_height).clamp(0.0, 1.0)
}
