//! Viewer session: the loaded grid plus every piece of mutable view state.
//!
//! A [`Session`] is what a front end binds its controls to. It owns the
//! current grid behind an [`Arc`] so a new load is published with a single
//! swap, and it applies the parameter and cursor rules that keep the pure
//! renderers inside their contracts.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{FocusPoint, FocusTracker, IntensityGrid, ViewState, WindowMode, WindowSpec};
use crate::error::{LoadError, ViewError};
use crate::pipeline::{
    self, compute_histogram, gray_level, HistogramSeries, LightRange, Magnifier, MagnifierMode,
    Neighborhood,
};
use crate::ports::{ByteSource, PixelSink};

/// What lies under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Probe {
    /// Cursor position in the viewport.
    pub cursor: FocusPoint,
    /// Grid row under the cursor, padding included.
    pub row: usize,
    /// Grid column under the cursor.
    pub col: usize,
    /// Raw sample.
    pub sample: u16,
    /// Gray level the sample renders as.
    pub level: u8,
    /// Range of the magnifier neighborhood around the cursor, when it fits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<LightRange>,
}

#[derive(Debug, Default)]
pub struct Session {
    grid: Option<Arc<IntensityGrid>>,
    view: ViewState,
    focus: FocusTracker,
    magnifier: Magnifier,
    clear_requested: bool,
}

impl Session {
    #[must_use]
    pub fn new(view: ViewState) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    /// Reads and decodes a capture, then publishes it.
    ///
    /// On failure the previously loaded grid stays current.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the source is unreadable or malformed.
    pub fn load(&mut self, source: &dyn ByteSource) -> Result<Arc<IntensityGrid>, LoadError> {
        let name = source.name();
        match pipeline::load(source) {
            Ok(grid) => {
                info!(%name, width = grid.width(), height = grid.height(), "capture loaded");
                Ok(self.publish(grid))
            }
            Err(e) => {
                warn!(%name, error = %e, "load failed, keeping previous capture");
                Err(e)
            }
        }
    }

    /// Publishes an already decoded grid.
    ///
    /// A row padding that does not fit the new grid is reset to zero.
    pub fn publish(&mut self, grid: IntensityGrid) -> Arc<IntensityGrid> {
        if self.view.check_padding(grid.height()).is_err() {
            debug!(padding = self.view.row_padding, "row padding reset for new capture");
            self.view.row_padding = 0;
        }
        let grid = Arc::new(grid);
        self.grid = Some(Arc::clone(&grid));
        grid
    }

    /// Snapshot of the current grid. Stays valid across later loads.
    #[must_use]
    pub fn grid(&self) -> Option<Arc<IntensityGrid>> {
        self.grid.clone()
    }

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// # Errors
    ///
    /// Returns [`ViewError::BitShift`] above 8; the previous value is kept.
    pub fn set_bit_shift(&mut self, bit_shift: u32) -> Result<(), ViewError> {
        self.view = self.view.with_bit_shift(bit_shift)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ViewError::RowPadding`] unless the padding is below the
    /// loaded grid's height; the previous value is kept.
    pub fn set_row_padding(&mut self, row_padding: usize) -> Result<(), ViewError> {
        let candidate = self.view.with_row_padding(row_padding);
        if let Some(grid) = &self.grid {
            candidate.check_padding(grid.height())?;
        }
        self.view = candidate;
        Ok(())
    }

    /// Changes the magnification. Requests a magnifier clear if it is dirty.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Scale`] outside `1..=16`; the previous value is kept.
    pub fn set_scale(&mut self, scale: u32) -> Result<(), ViewError> {
        self.view = self.view.with_scale(scale)?;
        self.request_clear();
        Ok(())
    }

    /// Changes the neighborhood size. Requests a magnifier clear if it is dirty.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Neighborhood`] for zero; the previous value is kept.
    pub fn set_neighborhood(&mut self, neighborhood: u32) -> Result<(), ViewError> {
        self.view = self.view.with_neighborhood(neighborhood)?;
        self.request_clear();
        Ok(())
    }

    fn request_clear(&mut self) {
        if self.magnifier.is_dirty() {
            self.clear_requested = true;
        }
    }

    /// Whether the magnifier sink holds a render made with stale parameters.
    #[must_use]
    pub const fn clear_requested(&self) -> bool {
        self.clear_requested
    }

    #[must_use]
    pub const fn magnifier_mode(&self) -> MagnifierMode {
        self.magnifier.mode
    }

    pub fn set_magnifier_mode(&mut self, mode: MagnifierMode) {
        self.magnifier.mode = mode;
    }

    #[must_use]
    pub const fn focus(&self) -> FocusPoint {
        self.focus.current()
    }

    /// Follows the cursor unless the focus is held.
    pub fn track(&mut self, cursor: FocusPoint) -> FocusPoint {
        self.focus.track(cursor)
    }

    /// Pins or releases the focus at `cursor`. Returns whether it is now held.
    pub fn toggle_hold(&mut self, cursor: FocusPoint) -> bool {
        self.focus.toggle_hold(cursor)
    }

    /// Whether the magnifier can render around `focus` without leaving the grid.
    ///
    /// The focus must sit more than half a neighborhood inside the visible
    /// viewport on every side, and every pixel the current sampling reads
    /// must exist.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn can_magnify(&self, focus: FocusPoint) -> bool {
        let Some(grid) = &self.grid else {
            return false;
        };
        let half = i64::from(self.view.neighborhood / 2);
        let width = grid.width() as i64;
        let visible = self.view.padded_height(grid.height()) as i64;
        let inside = focus.x > half
            && focus.y > half
            && focus.x < width - half
            && focus.y < visible - half;
        inside && Neighborhood::around(focus, &self.view).fits(grid, self.magnifier.mode.sampling)
    }

    /// Renders the magnifier at the current focus. Returns whether it rendered.
    pub fn magnify(&mut self, sink: &mut dyn PixelSink) -> bool {
        let focus = self.focus.current();
        if !self.can_magnify(focus) {
            return false;
        }
        let Some(grid) = &self.grid else {
            return false;
        };
        self.magnifier.render(grid, focus, &self.view, sink);
        self.clear_requested = false;
        true
    }

    /// Clears the magnifier sink if it holds a render. Returns whether it cleared.
    pub fn clear_magnifier(&mut self, sink: &mut dyn PixelSink) -> bool {
        self.clear_requested = false;
        self.magnifier.clear(sink)
    }

    #[must_use]
    pub const fn magnifier_dirty(&self) -> bool {
        self.magnifier.is_dirty()
    }

    /// Full-size render. No-op without a grid.
    pub fn render_full(&self, sink: &mut dyn PixelSink) {
        if let Some(grid) = &self.grid {
            pipeline::render_full(grid, &self.view, sink);
        }
    }

    /// Overview render. No-op without a grid.
    pub fn render_overview(&self, sink: &mut dyn PixelSink, width: u32, height: u32) {
        if let Some(grid) = &self.grid {
            pipeline::render_overview(grid, &self.view, sink, width, height);
        }
    }

    /// Windowed render with the current bit shift. No-op without a grid.
    pub fn render_windowed(&self, window: &WindowSpec, mode: WindowMode, sink: &mut dyn PixelSink) {
        if let Some(grid) = &self.grid {
            pipeline::render_windowed(grid, window, mode, self.view.bit_shift, sink);
        }
    }

    /// Histogram of the visible rows, or `None` without a grid.
    #[must_use]
    pub fn histogram(&self, full_range: bool) -> Option<HistogramSeries> {
        self.grid
            .as_ref()
            .map(|grid| compute_histogram(grid, &self.view, full_range))
    }

    /// The sample under `cursor`, or `None` outside the visible grid.
    #[must_use]
    pub fn probe(&self, cursor: FocusPoint) -> Option<Probe> {
        let grid = self.grid.as_ref()?;
        let col = usize::try_from(cursor.x).ok()?;
        let row = usize::try_from(cursor.y).ok()? + self.view.row_padding;
        let sample = grid.get(row, col)?;

        let neighborhood = self.can_magnify(cursor).then(|| {
            Neighborhood::around(cursor, &self.view).light_range(grid)
        });

        Some(Probe {
            cursor,
            row,
            col,
            sample,
            level: gray_level(sample, self.view.bit_shift),
            neighborhood,
        })
    }
}
