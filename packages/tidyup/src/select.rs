//! File selection predicates.

use std::ffi::OsStr;
use std::path::Path;

/// Decides whether a file is eligible for a step.
///
/// Matching is exact: a suffix predicate compares the final extension only, and a
/// name predicate compares the whole file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Final extension is one of these (given without the leading dot)
    Suffixes(Vec<String>),
    /// File name is exactly one of these
    Names(Vec<String>),
}

impl Selection {
    /// Selects files whose final extension is one of `suffixes`.
    ///
    /// A leading dot is accepted and ignored, so `".cpp"` and `"cpp"` are equivalent.
    #[must_use]
    pub fn suffixes(suffixes: &[&str]) -> Self {
        Self::Suffixes(
            suffixes
                .iter()
                .map(|s| s.trim_start_matches('.').to_string())
                .collect(),
        )
    }

    /// Selects files whose name is exactly one of `names`.
    #[must_use]
    pub fn names(names: &[&str]) -> Self {
        Self::Names(names.iter().map(ToString::to_string).collect())
    }

    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Self::Suffixes(suffixes) => path
                .extension()
                .is_some_and(|ext| suffixes.iter().any(|s| ext == OsStr::new(s))),
            Self::Names(names) => path
                .file_name()
                .is_some_and(|name| names.iter().any(|n| name == OsStr::new(n))),
        }
    }
}
