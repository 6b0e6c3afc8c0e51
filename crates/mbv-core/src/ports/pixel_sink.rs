//! Pixel sink port written by every renderer.

use crate::domain::Argb;

/// A resizable ARGB pixel buffer owned by the caller.
///
/// Renderers only ever write through this trait. Writes outside the current
/// dimensions must be ignored by implementations.
pub trait PixelSink {
    /// Current `(width, height)` of the sink.
    fn dimensions(&self) -> (u32, u32);

    /// Resizes the sink. Existing content need not be preserved.
    fn resize(&mut self, width: u32, height: u32);

    /// Writes one pixel.
    fn set_pixel(&mut self, x: u32, y: u32, color: Argb);

    /// Resets every pixel to transparent.
    fn clear(&mut self) {
        let (width, height) = self.dimensions();
        for y in 0..height {
            for x in 0..width {
                self.set_pixel(x, y, Argb::TRANSPARENT);
            }
        }
    }
}
