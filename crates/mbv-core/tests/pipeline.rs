//! End-to-end pipeline tests over synthetic captures.

#![allow(clippy::unwrap_used)]

use mbv_core::domain::{Argb, FocusPoint, Region, ViewState, WindowMode, WindowSpec};
use mbv_core::error::{FormatError, LoadError};
use mbv_core::pipeline::{
    compute_histogram, cut, decode, overview_strides, render_full, render_magnified,
    render_overview, render_windowed, MagnifierMode, Sampling,
};
use mbv_core::ports::PixelSink;
use mbv_core::session::Session;
use mbv_test_support::{two_pixel_capture, MockByteSource, MockPixelSink, SyntheticGridBuilder};

#[test]
fn test_two_pixel_capture_renders_black_and_white() {
    let grid = decode(&two_pixel_capture()).unwrap();
    let mut sink = MockPixelSink::default();
    render_full(&grid, &ViewState::default(), &mut sink);

    assert_eq!(sink.dimensions(), (2, 1));
    assert_eq!(sink.pixel(0, 0), Some(Argb(0xFF00_0000)));
    assert_eq!(sink.pixel(1, 0), Some(Argb(0xFFFF_FFFF)));
}

#[test]
fn test_decoded_samples_stay_in_ten_bits() {
    // Every high byte set: decoder must mask down to 2 bits.
    let samples: Vec<(u8, u8)> = (0..=255).map(|low| (low, 0xFF)).collect();
    let bytes = SyntheticGridBuilder::raw_capture(16, 16, &samples);
    let grid = decode(&bytes).unwrap();
    assert!(grid.samples().iter().all(|&s| s <= 1023));
}

#[test]
fn test_session_load_failure_keeps_grid() {
    let mut session = Session::default();
    let good = MockByteSource::new("good.mbv", two_pixel_capture());
    session.load(&good).unwrap();

    let truncated = MockByteSource::new("bad.mbv", vec![0x02, 0x00, 0x02, 0x00, 0x01]);
    let err = session.load(&truncated).unwrap_err();
    assert!(matches!(err, LoadError::Format(FormatError::Truncated)));
    assert_eq!(err.to_string(), "malformed .mbv capture: truncated");

    assert_eq!(session.grid().unwrap().width(), 2);
    assert_eq!(good.read_count(), 1);
}

#[test]
fn test_overview_samples_lie_on_stride_lattice() {
    let grid = SyntheticGridBuilder::ramp(97, 61);
    let (w, h) = (10, 6);
    let (dx, dy) = overview_strides(grid.width(), grid.height(), w, h);
    let view = ViewState {
        bit_shift: 0,
        ..ViewState::default()
    };
    let mut sink = MockPixelSink::new(w, h);
    render_overview(&grid, &view, &mut sink, w, h);

    assert_eq!(sink.written(), (w * h) as usize);
    for ((x, y), color) in sink.pixels() {
        let (row, col) = (y as usize * dy, x as usize * dx);
        assert_eq!(color, cut(grid.sample(row, col), 0));
    }
}

#[test]
fn test_histogram_totals_for_padded_capture() {
    let grid = SyntheticGridBuilder::horizontal_gradient(40, 30);
    let view = ViewState::default().with_row_padding(7);
    for full_range in [true, false] {
        let series = compute_histogram(&grid, &view, full_range);
        assert_eq!(series.total(), 40 * 23);
    }
}

#[test]
fn test_padding_hides_top_band_from_every_renderer() {
    let grid = SyntheticGridBuilder::top_band(8, 8, 2, 1020);
    let view = ViewState {
        bit_shift: 2,
        row_padding: 2,
        ..ViewState::default()
    };

    let mut full = MockPixelSink::default();
    render_full(&grid, &view, &mut full);
    assert!(full.pixels().all(|(_, c)| c == Argb::gray(0)));

    let series = compute_histogram(&grid, &view, false);
    assert_eq!(series.bins[255].count, 0);
}

#[test]
fn test_normalized_magnifier_spans_extremes() {
    let grid = SyntheticGridBuilder::checkerboard(60, 60, 3, 200, 700);
    let view = ViewState {
        neighborhood: 10,
        scale: 2,
        ..ViewState::default()
    };
    for sampling in [Sampling::Nearest, Sampling::Bilinear] {
        let mut sink = MockPixelSink::new(20, 20);
        render_magnified(
            &grid,
            FocusPoint::new(30, 30),
            &view,
            MagnifierMode::new(sampling, true),
            &mut sink,
        );
        let levels: Vec<u8> = sink.pixels().map(|(_, c)| c.blue()).collect();
        assert_eq!(levels.len(), 400);
        assert!(levels.contains(&0));
        assert!(levels.contains(&255));
    }
}

#[test]
fn test_windowed_clip_on_gradient() {
    let grid = SyntheticGridBuilder::horizontal_gradient(1024, 1);
    let window = WindowSpec::new(100, 200, Region::full(1024, 1))
        .unwrap()
        .with_tails(true, false, false, true);
    let mut sink = MockPixelSink::new(1024, 1);
    render_windowed(&grid, &window, WindowMode::Clip, 0, &mut sink);

    assert_eq!(sink.write_count(), 1024);
    assert_eq!(sink.resize_count(), 0);
    // below the window: to max
    assert_eq!(sink.pixel(50, 0), Some(Argb::gray(255)));
    // inside the window: 150 passes through
    assert_eq!(sink.pixel(150, 0), Some(Argb::gray(150)));
    // above the window: to zero
    assert_eq!(sink.pixel(900, 0), Some(Argb::gray(0)));
}
