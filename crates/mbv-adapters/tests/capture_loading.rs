//! Integration tests for capture discovery and loading.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mbv_adapters::{load_capture, FsByteSource, FsCaptureSource, ImageSink};
use mbv_core::pipeline::{load, render_full};
use mbv_core::{AccessError, Argb, ByteSource, CaptureSource, LoadError, ViewState};
use mbv_test_support::{two_pixel_capture, SyntheticGridBuilder};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_capture(dir: &Path, name: &str, bytes: &[u8]) {
    fs::write(dir.join(name), bytes).expect("write fixture");
}

#[test]
fn test_load_capture_from_disk() {
    let dir = TempDir::new().unwrap();
    write_capture(dir.path(), "two.mbv", &two_pixel_capture());

    let grid = load_capture(&dir.path().join("two.mbv")).expect("should decode");
    assert_eq!(grid.width(), 2);
    assert_eq!(grid.height(), 1);
    assert_eq!(grid.samples(), &[0, 1023]);
}

#[test]
fn test_load_capture_reports_path_on_failure() {
    let dir = TempDir::new().unwrap();
    write_capture(dir.path(), "short.mbv", &[0x01]);

    let err = load_capture(&dir.path().join("short.mbv")).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("short.mbv"));
    assert!(message.contains("empty"));
}

#[test]
fn test_missing_file_is_access_error() {
    let dir = TempDir::new().unwrap();
    let source = FsByteSource::new(dir.path().join("nope.mbv"));
    assert!(matches!(
        load(&source),
        Err(LoadError::Access(AccessError::NotFound(_)))
    ));
}

#[test]
fn test_directory_scan_filters_by_extension() {
    let dir = TempDir::new().unwrap();
    let bytes = SyntheticGridBuilder::to_mbv_bytes(&SyntheticGridBuilder::ramp(4, 4));
    write_capture(dir.path(), "b.mbv", &bytes);
    write_capture(dir.path(), "a.MBV", &bytes);
    write_capture(dir.path(), "notes.txt", b"hello");

    let source = FsCaptureSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(source.count_hint(), Some(2));

    let names: Vec<String> = source.captures().map(|c| c.name()).collect();
    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("a.MBV"));
    assert!(names[1].ends_with("b.mbv"));
}

#[test]
fn test_recursive_scan() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    write_capture(dir.path(), "top.mbv", &two_pixel_capture());
    write_capture(&nested, "deep.mbv", &two_pixel_capture());

    let flat = FsCaptureSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(flat.captures().count(), 1);

    let recursive = FsCaptureSource::new(vec![dir.path().to_path_buf()], true);
    assert_eq!(recursive.captures().count(), 2);
}

#[test]
fn test_missing_and_unsupported_paths_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_capture(dir.path(), "image.png", b"png");

    let source = FsCaptureSource::new(
        vec![dir.path().join("image.png"), dir.path().join("gone.mbv")],
        false,
    );
    assert_eq!(source.captures().count(), 0);
}

#[test]
fn test_render_into_image_sink() {
    let dir = TempDir::new().unwrap();
    write_capture(dir.path(), "two.mbv", &two_pixel_capture());
    let grid = load_capture(&dir.path().join("two.mbv")).unwrap();

    let mut sink = ImageSink::new(0, 0);
    render_full(&grid, &ViewState::default(), &mut sink);

    assert_eq!(sink.image().dimensions(), (2, 1));
    assert_eq!(sink.pixel(0, 0), Some(Argb::gray(0)));
    assert_eq!(sink.pixel(1, 0), Some(Argb::gray(255)));
}
