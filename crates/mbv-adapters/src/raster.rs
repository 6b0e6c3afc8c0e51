//! In-memory raster sink backed by the `image` crate.

use image::{Rgba, RgbaImage};
use mbv_core::{Argb, PixelSink};

/// A [`PixelSink`] writing into an [`RgbaImage`].
#[derive(Debug, Clone)]
pub struct ImageSink {
    image: RgbaImage,
}

impl ImageSink {
    /// Creates a transparent sink of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Color at `(x, y)`, or `None` outside the sink.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Argb> {
        self.image
            .get_pixel_checked(x, y)
            .map(|pixel| Argb::from_rgba(pixel.0))
    }
}

impl PixelSink for ImageSink {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Argb) {
        if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
            *pixel = Rgba(color.to_rgba());
        }
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read_pixel() {
        let mut sink = ImageSink::new(3, 2);
        sink.set_pixel(2, 1, Argb::gray(0x80));
        assert_eq!(sink.pixel(2, 1), Some(Argb(0xFF80_8080)));
        assert_eq!(sink.pixel(0, 0), Some(Argb::TRANSPARENT));
        assert_eq!(sink.image().get_pixel(2, 1).0, [0x80, 0x80, 0x80, 0xFF]);
    }

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut sink = ImageSink::new(2, 2);
        sink.set_pixel(2, 0, Argb::gray(1));
        sink.set_pixel(0, 5, Argb::gray(1));
        assert!(sink.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
        assert_eq!(sink.pixel(2, 0), None);
    }

    #[test]
    fn test_resize_and_clear() {
        let mut sink = ImageSink::new(1, 1);
        sink.set_pixel(0, 0, Argb::gray(9));
        sink.resize(4, 3);
        assert_eq!(sink.dimensions(), (4, 3));
        assert_eq!(sink.pixel(0, 0), Some(Argb::TRANSPARENT));

        sink.set_pixel(3, 2, Argb::gray(9));
        sink.clear();
        assert_eq!(sink.pixel(3, 2), Some(Argb::TRANSPARENT));
    }
}
