//! Viewer parameters and the magnifier focus point.

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// Largest accepted bit shift for the 10-bit to 8-bit windowing.
pub const MAX_BIT_SHIFT: u32 = 8;

/// Largest accepted magnifier replication factor.
pub const MAX_SCALE: u32 = 16;

/// Rendering parameters shared by every pipeline stage.
///
/// Each field is validated on its own by the `with_*` builders; the only
/// cross-field constraint, `row_padding < height`, depends on the loaded
/// grid and is checked by [`ViewState::check_padding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Low bits discarded when mapping a sample to an 8-bit gray level.
    pub bit_shift: u32,
    /// Rows skipped from the top of the grid before any render.
    pub row_padding: usize,
    /// Replication factor per sampled pixel in the magnifier.
    pub scale: u32,
    /// Side length of the square magnifier neighborhood, in source pixels.
    pub neighborhood: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            bit_shift: 2,
            row_padding: 0,
            scale: 2,
            neighborhood: 50,
        }
    }
}

impl ViewState {
    pub fn with_bit_shift(mut self, bit_shift: u32) -> Result<Self, ViewError> {
        if bit_shift > MAX_BIT_SHIFT {
            return Err(ViewError::BitShift(bit_shift));
        }
        self.bit_shift = bit_shift;
        Ok(self)
    }

    pub fn with_scale(mut self, scale: u32) -> Result<Self, ViewError> {
        if scale == 0 || scale > MAX_SCALE {
            return Err(ViewError::Scale(scale));
        }
        self.scale = scale;
        Ok(self)
    }

    pub fn with_neighborhood(mut self, neighborhood: u32) -> Result<Self, ViewError> {
        if neighborhood == 0 {
            return Err(ViewError::Neighborhood(neighborhood));
        }
        self.neighborhood = neighborhood;
        Ok(self)
    }

    /// Sets the row padding without checking it against a grid.
    #[must_use]
    pub fn with_row_padding(mut self, row_padding: usize) -> Self {
        self.row_padding = row_padding;
        self
    }

    /// Checks `row_padding < height` for a grid of the given height.
    ///
    /// An empty grid accepts only a padding of zero.
    pub const fn check_padding(&self, height: usize) -> Result<(), ViewError> {
        if self.row_padding == 0 || self.row_padding < height {
            Ok(())
        } else {
            Err(ViewError::RowPadding {
                padding: self.row_padding,
                height,
            })
        }
    }

    /// Number of visible rows once padding is removed.
    #[must_use]
    pub const fn padded_height(&self, height: usize) -> usize {
        height.saturating_sub(self.row_padding)
    }
}

/// Cursor position in viewport coordinates (padding already removed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FocusPoint {
    pub x: i64,
    pub y: i64,
}

impl FocusPoint {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Tracks the magnifier focus: follows the cursor unless pinned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusTracker {
    current: FocusPoint,
    held: bool,
}

impl FocusTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: FocusPoint::new(0, 0),
            held: false,
        }
    }

    /// Follows a cursor move; ignored while the focus is held.
    /// Returns the focus point in effect afterwards.
    pub fn track(&mut self, cursor: FocusPoint) -> FocusPoint {
        if !self.held {
            self.current = cursor;
        }
        self.current
    }

    /// Toggles the hold. The click position becomes the current focus either way.
    pub fn toggle_hold(&mut self, cursor: FocusPoint) -> bool {
        self.held = !self.held;
        self.current = cursor;
        self.held
    }

    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.held
    }

    #[must_use]
    pub const fn current(&self) -> FocusPoint {
        self.current
    }
}
