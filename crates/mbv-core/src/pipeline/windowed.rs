//! Contrast-stretch and tail-clipping renderer for a rectangular region.

use tracing::trace;

use super::cut::cut;
use crate::domain::{IntensityGrid, WindowMode, WindowSpec};
use crate::ports::PixelSink;

/// The sample fed to [`cut`] for one source sample.
///
/// In [`WindowMode::Stretch`] the raw sample is scaled by
/// `1023 / (high - low)`, offset by `low` and rounded. The result is not
/// clamped to 10 bits and wraps at 16 bits, so large stretches fold over.
/// In [`WindowMode::Clip`] samples outside `[low, high]` are replaced by the
/// tail policy of their side.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn windowed_sample(sample: u16, window: &WindowSpec, mode: WindowMode) -> u16 {
    match mode {
        WindowMode::Stretch => {
            let stretched = f64::from(sample)
                .mul_add(window.stretch_coefficient(), f64::from(window.low()))
                .round();
            // Saturate into u32, then keep the low 16 bits.
            stretched as u32 as u16
        }
        WindowMode::Clip => {
            if sample > window.high() {
                window.right.replace(window.high())
            } else if sample < window.low() {
                window.left.replace(window.low())
            } else {
                sample
            }
        }
    }
}

/// Renders `window.region` of the grid into the sink.
///
/// Grid pixel `(row, col)` lands on sink pixel `(col, row)`; the caller folds
/// any row padding into the region. The region is clipped to the grid and
/// the sink is never resized.
#[allow(clippy::cast_possible_truncation)]
pub fn render_windowed(
    grid: &IntensityGrid,
    window: &WindowSpec,
    mode: WindowMode,
    bit_shift: u32,
    sink: &mut dyn PixelSink,
) {
    let region = window.region.clamp_to(grid.width(), grid.height());
    if region.is_empty() {
        return;
    }
    trace!(?region, ?mode, "windowed render");

    for row in region.top..region.bottom {
        let samples = &grid.row(row)[region.left..region.right];
        for (col, &sample) in (region.left..).zip(samples) {
            let value = windowed_sample(sample, window, mode);
            sink.set_pixel(col as u32, row as u32, cut(value, bit_shift));
        }
    }
}
