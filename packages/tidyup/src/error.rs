//! Error types shared by every step.

use std::path::PathBuf;

use crate::tools::Status;

/// Errors raised while locating the files and configuration a step needs.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// No file with the given name exists anywhere under the search root
    #[error("Could not find {0}")]
    NotFound(String),

    /// More than one file with the given name exists under the search root
    #[error("Found multiple {name}")]
    Multiple {
        /// File name that was searched for
        name: String,
        /// Every match, in traversal order
        matches: Vec<PathBuf>,
    },

    /// The project configuration file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The project configuration file is not valid TOML for this tool
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}

/// Top-level error for a step or a chain of steps.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The external executable is absent or failed its presence probe
    #[error("{tool} is required")]
    ToolMissing {
        /// Name of the missing tool
        tool: String,
    },

    /// A required file was missing, ambiguous, or malformed
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The external command signalled failure while doing real work
    #[error("{tool} failed ({status})")]
    ToolInvocation {
        /// Name of the tool that failed
        tool: String,
        /// Status the tool exited with
        status: Status,
    },

    /// The user interrupted the run
    #[error("Interrupted")]
    Interrupted,

    /// One or more files failed a continue-on-failure check
    #[error("{} file(s) failed checks", failed.len())]
    ChecksFailed {
        /// Files whose check failed, in processing order
        failed: Vec<PathBuf>,
    },

    /// The report could not be written
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// A file could not be read while snapshotting or resolving it
    #[error("{}: {source}", path.display())]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code for this error. Every failure maps to `1`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        1
    }

    /// Whether this error is reported on stdout as an `ERROR:` line.
    ///
    /// Missing tools and configuration problems are detected before any file is
    /// touched and are part of the human-readable output; everything else is
    /// left to the external tool's own output and the log.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::ToolMissing { .. } | Self::Configuration(_))
    }
}
