//! Running external commands.

use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::interrupt;

/// How a command's output is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Captured and discarded (presence probes)
    Capture,
    /// Passed through to the terminal
    Inherit,
}

/// How an external command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// Non-zero exit, or `None` when killed by a signal other than SIGINT
    Failed(Option<i32>),
    Interrupted,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failed(Some(code)) => write!(f, "exit code {code}"),
            Self::Failed(None) => f.write_str("terminated by signal"),
            Self::Interrupted => f.write_str("interrupted"),
        }
    }
}

/// Runs an external command to completion.
///
/// This is the only place a step touches a subprocess, which lets tests swap in
/// a scripted implementation.
pub trait CommandRunner {
    /// Runs `program` with `args` and blocks until it exits.
    ///
    /// # Errors
    ///
    /// * If the process cannot be started (e.g. the executable does not exist)
    fn run(&self, program: &Path, args: &[OsString], output: Output) -> std::io::Result<Status>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString], output: Output) -> std::io::Result<Status> {
        if interrupt::is_interrupted() {
            return Ok(Status::Interrupted);
        }

        let mut cmd = Command::new(program);
        cmd.args(args);

        let status = match output {
            Output::Capture => cmd
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()?
                .status,
            Output::Inherit => cmd.status()?,
        };

        Ok(classify(status, interrupt::is_interrupted()))
    }
}

fn classify(status: ExitStatus, interrupted: bool) -> Status {
    if interrupted || killed_by_sigint(status) {
        Status::Interrupted
    } else if status.success() {
        Status::Success
    } else {
        Status::Failed(status.code())
    }
}

#[cfg(unix)]
fn killed_by_sigint(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt as _;

    const SIGINT: i32 = 2;

    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
const fn killed_by_sigint(_status: ExitStatus) -> bool {
    false
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::process::ExitStatusExt as _;

    use super::*;

    #[test_log::test]
    fn test_classify_exit_codes() {
        assert_eq!(classify(ExitStatus::from_raw(0), false), Status::Success);
        assert_eq!(
            classify(ExitStatus::from_raw(1 << 8), false),
            Status::Failed(Some(1))
        );
    }

    #[test_log::test]
    fn test_classify_sigint_as_interrupted() {
        assert_eq!(classify(ExitStatus::from_raw(2), false), Status::Interrupted);
        assert_eq!(classify(ExitStatus::from_raw(9), false), Status::Failed(None));
    }

    #[test_log::test]
    fn test_interrupt_flag_wins_over_exit_status() {
        assert_eq!(classify(ExitStatus::from_raw(0), true), Status::Interrupted);
    }

    #[test_log::test]
    fn test_missing_program_is_an_error() {
        let result = SystemRunner.run(
            Path::new("tidyup-test-definitely-not-installed"),
            &[],
            Output::Capture,
        );

        assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::NotFound);
    }

    #[test_log::test]
    fn test_runs_real_process() {
        assert_eq!(
            SystemRunner
                .run(Path::new("true"), &[], Output::Capture)
                .unwrap(),
            Status::Success
        );
        assert_eq!(
            SystemRunner
                .run(Path::new("false"), &[], Output::Capture)
                .unwrap(),
            Status::Failed(Some(1))
        );
    }
}
