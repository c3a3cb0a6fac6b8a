//! Core types for external tool definitions.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// One element of an invocation argument template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Passed through verbatim
    Literal(OsString),
    /// Replaced by the file being processed
    Target,
}

impl Arg {
    pub fn literal(value: impl Into<OsString>) -> Self {
        Self::Literal(value.into())
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<&Path> for Arg {
    fn from(value: &Path) -> Self {
        Self::literal(value)
    }
}

impl From<PathBuf> for Arg {
    fn from(value: PathBuf) -> Self {
        Self::literal(value)
    }
}

/// What happens to the rest of a batch when one invocation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failure ends the run
    Abort,
    /// Failures are recorded and the batch carries on
    Continue,
}

/// Definition of one external command.
///
/// A spec is immutable once built: the program, any fixed leading arguments (such
/// as the `fmt` in `muon fmt`), the arguments used to probe for presence, and the
/// template for the real invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Name used in messages (e.g. `clang-format`)
    pub name: String,

    /// Executable to run
    pub program: PathBuf,

    /// Arguments that precede both the probe and the invocation
    pub base_args: Vec<OsString>,

    /// Arguments used to verify the tool is present
    pub probe_args: Vec<OsString>,

    /// Template for the real invocation
    pub invocation: Vec<Arg>,
}

impl ToolSpec {
    /// Creates a spec whose program has the same name as the tool.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            program: PathBuf::from(&name),
            name,
            base_args: vec![],
            probe_args: vec![],
            invocation: vec![Arg::Target],
        }
    }

    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.base_args = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        self
    }

    #[must_use]
    pub fn with_probe_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.probe_args = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        self
    }

    #[must_use]
    pub fn with_invocation(mut self, invocation: Vec<Arg>) -> Self {
        self.invocation = invocation;
        self
    }

    /// Full argument list for the presence probe.
    #[must_use]
    pub fn probe(&self) -> Vec<OsString> {
        self.base_args
            .iter()
            .chain(&self.probe_args)
            .cloned()
            .collect()
    }

    /// Full argument list for the real invocation against `target`.
    ///
    /// Templates without an [`Arg::Target`] (whole-tree tools) ignore `target`.
    #[must_use]
    pub fn invocation_for(&self, target: &Path) -> Vec<OsString> {
        self.base_args
            .iter()
            .cloned()
            .chain(self.invocation.iter().map(|arg| match arg {
                Arg::Literal(value) => value.clone(),
                Arg::Target => target.as_os_str().to_owned(),
            }))
            .collect()
    }

    /// Whether the invocation template takes a per-file target.
    #[must_use]
    pub fn is_per_file(&self) -> bool {
        self.invocation.contains(&Arg::Target)
    }

    /// Human-readable command line for logging.
    #[must_use]
    pub fn display_command(&self, args: &[OsString]) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(OsStr::to_string_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
