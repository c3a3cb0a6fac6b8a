//! Static analysis steps.
//!
//! Unlike the formatters, per-file analysis can carry on past a failing file:
//! with [`FailurePolicy::Continue`] every file is attempted and the batch fails
//! at the end if any of them did. An interrupt still stops the batch at once.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::processor::{absolute, ensure_tool_available, invoke, invoke_checked};
use crate::select::Selection;
use crate::tools::{CommandRunner, FailurePolicy, Status, ToolSpec};
use crate::walk::enumerate_targets;
use crate::{ConfigurationError, Error};

/// Name of the compilation database the C/C++ analyzer needs.
pub const COMPILE_COMMANDS: &str = "compile_commands.json";

/// Finds the single file named `name` anywhere under `root`.
///
/// # Errors
///
/// * [`ConfigurationError::NotFound`] if there is no match
/// * [`ConfigurationError::Multiple`] if there is more than one match
pub fn find_unique(root: &Path, name: &str) -> Result<PathBuf, ConfigurationError> {
    let selection = Selection::names(&[name]);
    let mut matches = enumerate_targets(root, &selection).collect::<Vec<_>>();

    match matches.len() {
        0 => Err(ConfigurationError::NotFound(name.to_string())),
        1 => Ok(matches.remove(0)),
        _ => {
            for m in &matches {
                log::debug!("Candidate {name}: {}", m.display());
            }
            Err(ConfigurationError::Multiple {
                name: name.to_string(),
                matches,
            })
        }
    }
}

/// Files checked by a lint batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    /// Files attempted, in order
    pub checked: Vec<PathBuf>,
    /// Files whose check failed, in order
    pub failed: Vec<PathBuf>,
}

/// Runs `tool` on each file in `files`, printing `Checking <path> ...` before
/// each one.
///
/// # Errors
///
/// * [`Error::Interrupted`] as soon as any invocation is interrupted
/// * With [`FailurePolicy::Abort`], the first failing invocation
/// * With [`FailurePolicy::Continue`], [`Error::ChecksFailed`] after every file
///   has been attempted, if any failed
/// * If writing to `out` fails
pub fn check_batch<I>(
    runner: &dyn CommandRunner,
    tool: &ToolSpec,
    files: I,
    policy: FailurePolicy,
    out: &mut dyn Write,
) -> Result<LintReport, Error>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut report = LintReport::default();

    for file in files {
        let path = absolute(&file);
        writeln!(out, "Checking {} ...", path.display()).map_err(Error::Output)?;

        let status = match invoke(runner, tool, &file) {
            Ok(status) => status,
            Err(e) if policy == FailurePolicy::Continue => {
                log::warn!("{}: {e}", path.display());
                Status::Failed(None)
            }
            Err(e) => return Err(e),
        };

        match status {
            Status::Success => {}
            Status::Interrupted => return Err(Error::Interrupted),
            Status::Failed(_) => match policy {
                FailurePolicy::Abort => {
                    return Err(Error::ToolInvocation {
                        tool: tool.name.clone(),
                        status,
                    });
                }
                FailurePolicy::Continue => {
                    log::warn!("{} failed on {} ({status})", tool.name, path.display());
                    report.failed.push(path.clone());
                }
            },
        }

        report.checked.push(path);
    }

    if report.failed.is_empty() {
        Ok(report)
    } else {
        Err(Error::ChecksFailed {
            failed: report.failed,
        })
    }
}

/// Probes `tool` and runs its whole-tree invocation once.
///
/// # Errors
///
/// * If the tool is missing
/// * If the invocation fails or is interrupted
pub fn analyze_tree(runner: &dyn CommandRunner, tool: &ToolSpec, root: &Path) -> Result<(), Error> {
    ensure_tool_available(runner, tool)?;
    invoke_checked(runner, tool, root)
}
