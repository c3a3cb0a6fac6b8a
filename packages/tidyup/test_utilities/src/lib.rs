#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Fixtures for exercising tidyup steps without the real external tools.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tidyup::config::ProjectConfig;
use tidyup::tools::{CommandRunner, Output, Status};

/// A temporary project tree.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Creates an empty project
    ///
    /// # Panics
    ///
    /// * If fails to create a temporary directory
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `relative`, creating parent directories
    ///
    /// # Panics
    ///
    /// * If fails to create the parent directories or write the file
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Reads `relative` back as a string
    ///
    /// # Panics
    ///
    /// * If fails to read the file
    #[must_use]
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.root().join(relative)).expect("Failed to read file")
    }

    /// Absolute, symlink-resolved path of `relative` as it appears in reports
    ///
    /// # Panics
    ///
    /// * If the file does not exist
    #[must_use]
    pub fn resolved(&self, relative: &str) -> PathBuf {
        std::fs::canonicalize(self.root().join(relative)).expect("Failed to resolve path")
    }

    #[must_use]
    pub fn config(&self) -> ProjectConfig {
        ProjectConfig::new(self.root())
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// What the fake tool does when invoked on a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    /// Leaves the file untouched and succeeds
    Keep,
    /// Replaces the file content and succeeds
    Rewrite(String),
    /// Appends to the file content and succeeds
    Append(String),
    /// Leaves the file untouched and exits with this code
    Fail(i32),
    /// Leaves the file untouched and reports an interrupt
    Interrupt,
}

/// One recorded command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub output: Output,
}

impl Call {
    /// File name of the last argument, i.e. the target of a per-file invocation.
    #[must_use]
    pub fn target_name(&self) -> Option<String> {
        self.args
            .last()
            .and_then(|a| Path::new(a).file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// Scripted [`CommandRunner`] that records every call.
///
/// Probes succeed unless the program was marked missing. Real invocations look
/// up a behavior by program name first and then by the target's file name,
/// defaulting to [`Behavior::Keep`].
#[derive(Debug, Default)]
pub struct FakeRunner {
    missing: BTreeSet<String>,
    by_program: BTreeMap<String, Behavior>,
    by_file: BTreeMap<String, Behavior>,
    calls: RefCell<Vec<Call>>,
}

impl FakeRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `program` fail to start, as if it were not installed
    #[must_use]
    pub fn with_missing(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    /// Sets the behavior for every real invocation of `program`
    #[must_use]
    pub fn with_program(mut self, program: &str, behavior: Behavior) -> Self {
        self.by_program.insert(program.to_string(), behavior);
        self
    }

    /// Sets the behavior for invocations whose target is named `file_name`
    #[must_use]
    pub fn with_file(mut self, file_name: &str, behavior: Behavior) -> Self {
        self.by_file.insert(file_name.to_string(), behavior);
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Real invocations only, as `(program, target file name)`
    #[must_use]
    pub fn invocations(&self) -> Vec<(String, String)> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.output == Output::Inherit)
            .map(|c| (c.program.clone(), c.target_name().unwrap_or_default()))
            .collect()
    }

    /// Programs probed, in order
    #[must_use]
    pub fn probes(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.output == Output::Capture)
            .map(|c| c.program.clone())
            .collect()
    }

    fn behavior(&self, program: &str, call: &Call) -> Behavior {
        self.by_program
            .get(program)
            .or_else(|| call.target_name().and_then(|n| self.by_file.get(&n)))
            .cloned()
            .unwrap_or(Behavior::Keep)
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &Path, args: &[OsString], output: Output) -> std::io::Result<Status> {
        let program = program.to_string_lossy().into_owned();
        let call = Call {
            program: program.clone(),
            args: args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
            output,
        };
        self.calls.borrow_mut().push(call.clone());

        if self.missing.contains(&program) {
            return Err(std::io::ErrorKind::NotFound.into());
        }
        if output == Output::Capture {
            return Ok(Status::Success);
        }

        let target = args.last().map(PathBuf::from);
        let behavior = self.behavior(&program, &call);
        log::debug!("fake {program} {:?}: {behavior:?}", call.args);

        match behavior {
            Behavior::Keep => Ok(Status::Success),
            Behavior::Rewrite(content) => {
                if let Some(target) = target {
                    std::fs::write(target, content)?;
                }
                Ok(Status::Success)
            }
            Behavior::Append(suffix) => {
                if let Some(target) = target {
                    let mut content = std::fs::read_to_string(&target)?;
                    content.push_str(&suffix);
                    std::fs::write(target, content)?;
                }
                Ok(Status::Success)
            }
            Behavior::Fail(code) => Ok(Status::Failed(Some(code))),
            Behavior::Interrupt => Ok(Status::Interrupted),
        }
    }
}
