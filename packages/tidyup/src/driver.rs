//! Runs a chain of steps in order.

use std::io::Write;

use crate::Error;
use crate::config::ProjectConfig;
use crate::steps::{Step, StepReport, format_cpp, format_meson, format_python};
use crate::tools::{CommandRunner, ToolRegistry};

/// The formatter chain: C/C++, then Meson, then Python.
#[must_use]
pub fn formatters(config: &ProjectConfig, registry: &ToolRegistry) -> Vec<Box<dyn Step>> {
    vec![
        Box::new(format_cpp(config, registry)),
        Box::new(format_meson(config, registry)),
        Box::new(format_python(config, registry)),
    ]
}

/// Runs `steps` in order, stopping at the first one that fails.
///
/// # Errors
///
/// * The error of the first failing step; later steps are not run
pub fn run_all(
    steps: &[Box<dyn Step>],
    runner: &dyn CommandRunner,
    out: &mut dyn Write,
) -> Result<Vec<StepReport>, Error> {
    steps
        .iter()
        .map(|step| {
            log::debug!("Running step '{}'", step.name());
            step.run(runner, out).inspect_err(|e| {
                log::debug!("Step '{}' failed: {e}", step.name());
            })
        })
        .collect()
}
