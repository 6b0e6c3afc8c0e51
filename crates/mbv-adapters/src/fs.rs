//! Filesystem adapter for loading `.mbv` captures.

use anyhow::{Context, Result};
use mbv_core::pipeline::load;
use mbv_core::{AccessError, ByteSource, CaptureSource, IntensityGrid};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supported capture extension.
const CAPTURE_EXTENSION: &str = "mbv";

/// A single capture file on disk.
#[derive(Debug, Clone)]
pub struct FsByteSource {
    path: PathBuf,
}

impl FsByteSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FsByteSource {
    fn name(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    fn read_all(&self) -> Result<Vec<u8>, AccessError> {
        std::fs::read(&self.path).map_err(|e| AccessError::from_io(self.name(), e))
    }
}

/// Filesystem capture source adapter.
pub struct FsCaptureSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsCaptureSource {
    /// Creates a new filesystem capture source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Collects all capture files from the configured paths, sorted per directory.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if is_capture(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && is_capture(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl CaptureSource for FsCaptureSource {
    fn captures(&self) -> Box<dyn Iterator<Item = Box<dyn ByteSource>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} capture files", files.len());

        Box::new(
            files
                .into_iter()
                .map(|path| Box::new(FsByteSource::new(path)) as Box<dyn ByteSource>),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has the capture extension.
fn is_capture(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(CAPTURE_EXTENSION))
}

/// Loads and decodes a capture from the filesystem.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid capture.
pub fn load_capture(path: &Path) -> Result<IntensityGrid> {
    load(&FsByteSource::new(path))
        .with_context(|| format!("Failed to load capture: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_capture() {
        assert!(is_capture(Path::new("scan.mbv")));
        assert!(is_capture(Path::new("scan.MBV")));
        assert!(!is_capture(Path::new("scan.png")));
        assert!(!is_capture(Path::new("mbv")));
    }

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let source = FsByteSource::new("/definitely/not/here.mbv");
        assert!(matches!(source.read_all(), Err(AccessError::NotFound(_))));
    }
}
