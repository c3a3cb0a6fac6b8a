//! Directory traversal.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::select::Selection;

/// Lazily yields every regular file under `root` that `selection` accepts.
///
/// Each call performs a fresh traversal. Entries are visited depth-first and
/// sorted by file name within each directory, so output is stable between runs
/// over an unchanged tree. Entries that cannot be read are logged and skipped.
pub fn enumerate_targets<'a>(
    root: &Path,
    selection: &'a Selection,
) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .filter(move |entry| selection.matches(entry.path()))
        .map(walkdir::DirEntry::into_path)
}
