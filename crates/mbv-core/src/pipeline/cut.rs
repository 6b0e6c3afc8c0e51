//! Bit-shift windowing of wide samples to 8-bit gray.

use crate::domain::Argb;

/// Maps a sample to an opaque gray color.
///
/// The sample is logically shifted right by `bit_shift` bits and the low
/// 8 bits of the result become the gray level. Wider-than-10-bit samples
/// wrap the same way. Shifts of 16 or more yield black.
#[must_use]
pub fn cut(sample: u16, bit_shift: u32) -> Argb {
    Argb::gray(gray_level(sample, bit_shift))
}

/// The 8-bit gray level [`cut`] produces.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn gray_level(sample: u16, bit_shift: u32) -> u8 {
    // Truncation to the low byte is the windowing itself.
    match sample.checked_shr(bit_shift) {
        Some(shifted) => (shifted & 0xFF) as u8,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_extremes() {
        assert_eq!(cut(1023, 2), Argb(0xFFFF_FFFF));
        assert_eq!(cut(0, 2), Argb(0xFF00_0000));
    }

    #[test]
    fn test_cut_wraps_above_window() {
        // 1023 >> 1 = 511, low byte 0xFF; 512 >> 1 = 256, low byte 0x00
        assert_eq!(gray_level(1023, 1), 0xFF);
        assert_eq!(gray_level(512, 1), 0x00);
        assert_eq!(gray_level(0x0300, 0), 0x00);
    }

    #[test]
    fn test_cut_shift_eight_keeps_top_bits() {
        assert_eq!(gray_level(1023, 8), 3);
        assert_eq!(gray_level(u16::MAX, 8), 0xFF);
    }

    #[test]
    fn test_cut_oversized_shift_is_black() {
        assert_eq!(gray_level(u16::MAX, 16), 0);
        assert_eq!(gray_level(u16::MAX, 40), 0);
    }

    #[test]
    fn test_cut_monotonic_within_window() {
        // From shift 2 on the full 10-bit domain maps without wrapping.
        for offset in 2..=8 {
            let mut previous = 0;
            for sample in 0..=1023_u16 {
                let level = gray_level(sample, offset);
                assert!(level >= previous, "not monotonic at {sample}");
                previous = level;
            }
        }
    }

    #[test]
    fn test_cut_idempotent_with_zero_shift() {
        for sample in 0..=1023_u16 {
            let once = gray_level(sample, 2);
            assert_eq!(gray_level(u16::from(once), 0), once);
        }
    }
}
