//! Packed ARGB color words.

use std::fmt;

/// A 32-bit `0xAARRGGBB` color word, as accepted by pixel sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb(pub u32);

impl Argb {
    /// Fully transparent black, used when a sink is cleared.
    pub const TRANSPARENT: Self = Self(0);

    /// Opaque gray with `level` replicated into R, G and B.
    #[must_use]
    pub const fn gray(level: u8) -> Self {
        let l = level as u32;
        Self(0xFF00_0000 | (l << 16) | (l << 8) | l)
    }

    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// `[r, g, b, a]` byte order, as used by RGBA raster buffers.
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Inverse of [`Argb::to_rgba`].
    #[must_use]
    pub const fn from_rgba([r, g, b, a]: [u8; 4]) -> Self {
        Self(u32::from_be_bytes([a, r, g, b]))
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}
