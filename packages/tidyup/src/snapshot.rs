//! Before/after content snapshots used for change detection.

use std::path::Path;

use crate::Error;

/// Full content of one file at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot(Vec<u8>);

impl FileSnapshot {
    /// Reads the current content of `path`.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read
    pub fn capture(path: &Path) -> Result<Self, Error> {
        std::fs::read(path).map(Self).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
