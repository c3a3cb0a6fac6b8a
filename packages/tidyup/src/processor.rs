//! Batch file processing.
//!
//! Every formatter step follows the same pattern:
//!
//! 1. Probe each tool it needs ([`ensure_tool_available`])
//! 2. Walk the tree for matching files ([`crate::walk::enumerate_targets`])
//! 3. Run the tool passes on each file, diffing the content before and after
//!    ([`process_one`])
//! 4. Print a line for every file that changed ([`report_and_aggregate`])
//!
//! Change detection never trusts a tool's exit code: a file is reported only
//! when its bytes differ after the passes ran.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Error;
use crate::snapshot::FileSnapshot;
use crate::tools::{CommandRunner, Output, Status, ToolSpec};

/// Result of processing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
}

/// Outcome for one file, keyed by its absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Aggregate of a completed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Files processed, in order
    pub processed: Vec<PathBuf>,
    /// Files whose content changed, in order
    pub changed: Vec<PathBuf>,
}

/// Verifies that `tool` can be run by running its presence probe.
///
/// Probe output is captured and discarded.
///
/// # Errors
///
/// * [`Error::ToolMissing`] if the executable cannot be started or the probe
///   does not succeed
/// * [`Error::Interrupted`] if the probe was interrupted
pub fn ensure_tool_available(runner: &dyn CommandRunner, tool: &ToolSpec) -> Result<(), Error> {
    let args = tool.probe();
    log::debug!("Probing: {}", tool.display_command(&args));

    match runner.run(&tool.program, &args, Output::Capture) {
        Ok(Status::Success) => Ok(()),
        Ok(Status::Interrupted) => Err(Error::Interrupted),
        Ok(status) => {
            log::debug!("Probe for '{}' failed: {status}", tool.name);
            Err(Error::ToolMissing {
                tool: tool.name.clone(),
            })
        }
        Err(e) => {
            log::debug!("Probe for '{}' could not start: {e}", tool.name);
            Err(Error::ToolMissing {
                tool: tool.name.clone(),
            })
        }
    }
}

/// Runs the real invocation of `tool` against `target` with output passed
/// through to the terminal.
///
/// # Errors
///
/// * [`Error::Io`] if the executable cannot be started
pub fn invoke(runner: &dyn CommandRunner, tool: &ToolSpec, target: &Path) -> Result<Status, Error> {
    let args = tool.invocation_for(target);
    log::debug!("Running: {}", tool.display_command(&args));

    let status = runner
        .run(&tool.program, &args, Output::Inherit)
        .map_err(|source| Error::Io {
            path: tool.program.clone(),
            source,
        })?;

    log::trace!("'{}' finished: {status}", tool.name);

    Ok(status)
}

/// Like [`invoke`], but any non-success status is an error.
///
/// # Errors
///
/// * [`Error::Interrupted`] if the tool was interrupted
/// * [`Error::ToolInvocation`] if the tool failed
/// * [`Error::Io`] if the executable cannot be started
pub fn invoke_checked(
    runner: &dyn CommandRunner,
    tool: &ToolSpec,
    target: &Path,
) -> Result<(), Error> {
    match invoke(runner, tool, target)? {
        Status::Success => Ok(()),
        Status::Interrupted => Err(Error::Interrupted),
        status @ Status::Failed(_) => Err(Error::ToolInvocation {
            tool: tool.name.clone(),
            status,
        }),
    }
}

/// Runs `passes` in order against `file` and reports whether its content changed.
///
/// The content is captured before the first pass and after the last one, so
/// intermediate rewrites that cancel out are reported as unchanged.
///
/// # Errors
///
/// * If the file cannot be read
/// * If any pass fails or is interrupted; later passes are not run
pub fn process_one(
    runner: &dyn CommandRunner,
    file: &Path,
    passes: &[ToolSpec],
) -> Result<FileOutcome, Error> {
    let before = FileSnapshot::capture(file)?;

    for pass in passes {
        invoke_checked(runner, pass, file)?;
    }

    let after = FileSnapshot::capture(file)?;
    let outcome = if before == after {
        Outcome::Unchanged
    } else {
        Outcome::Changed
    };

    log::debug!("{}: {outcome:?}", file.display());

    Ok(FileOutcome {
        path: absolute(file),
        outcome,
    })
}

/// Prints one `Formatted: <path>` line per changed file as outcomes arrive.
///
/// Outcomes are consumed lazily and the first error stops consumption, so
/// files after a failure are never processed. Lines already printed stay
/// printed.
///
/// # Errors
///
/// * The first error produced by `outcomes`
/// * If writing to `out` fails
pub fn report_and_aggregate<I>(outcomes: I, out: &mut dyn Write) -> Result<RunResult, Error>
where
    I: IntoIterator<Item = Result<FileOutcome, Error>>,
{
    let mut result = RunResult::default();

    for outcome in outcomes {
        let FileOutcome { path, outcome } = outcome?;

        if outcome == Outcome::Changed {
            writeln!(out, "Formatted: {}", path.display()).map_err(Error::Output)?;
            result.changed.push(path.clone());
        }

        result.processed.push(path);
    }

    Ok(result)
}

/// Absolute form of `path`, resolving symlinks where possible.
#[must_use]
pub fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
