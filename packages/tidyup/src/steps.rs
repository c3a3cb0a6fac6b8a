//! The concrete formatting and linting steps.
//!
//! Each step pairs tool definitions from the [`ToolRegistry`] with a file
//! selection, an invocation template and a failure policy.

use std::io::Write;
use std::path::PathBuf;

use crate::Error;
use crate::config::ProjectConfig;
use crate::lint::{COMPILE_COMMANDS, LintReport, analyze_tree, check_batch, find_unique};
use crate::processor::{RunResult, ensure_tool_available, process_one, report_and_aggregate};
use crate::select::Selection;
use crate::tools::{Arg, CommandRunner, FailurePolicy, ToolId, ToolRegistry, ToolSpec};
use crate::walk::enumerate_targets;

const CPP_FORMAT_SUFFIXES: &[&str] = &[".c", ".cpp", ".h", ".hpp"];
const CPP_LINT_SUFFIXES: &[&str] = &[".c", ".cpp"];
const MESON_FILE_NAMES: &[&str] = &["meson.build", "meson_options.txt"];
const PYTHON_SUFFIXES: &[&str] = &[".py"];

/// Summary of a successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepReport {
    Formatted(RunResult),
    Linted(LintReport),
    Analyzed,
}

/// One runnable unit of work, e.g. "format the C/C++ sources".
pub trait Step {
    fn name(&self) -> &str;

    /// Runs the step to completion.
    ///
    /// # Errors
    ///
    /// * If a required tool or file is missing
    /// * If the step's failure policy turns a tool failure into a step failure
    /// * If the run is interrupted
    fn run(&self, runner: &dyn CommandRunner, out: &mut dyn Write) -> Result<StepReport, Error>;
}

/// Rewrites matching files in place with one or more tool passes.
#[derive(Debug, Clone)]
pub struct FormatStep {
    pub name: String,
    pub root: PathBuf,
    pub selection: Selection,
    /// Tools probed before any file is touched, in probe order
    pub probes: Vec<ToolSpec>,
    /// Tools run on each file, in pass order
    pub passes: Vec<ToolSpec>,
}

impl Step for FormatStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, runner: &dyn CommandRunner, out: &mut dyn Write) -> Result<StepReport, Error> {
        for tool in &self.probes {
            ensure_tool_available(runner, tool)?;
        }

        log::debug!("{}: walking {}", self.name, self.root.display());

        let outcomes = enumerate_targets(&self.root, &self.selection)
            .map(|file| process_one(runner, &file, &self.passes));

        report_and_aggregate(outcomes, out).map(StepReport::Formatted)
    }
}

/// Runs an analyzer on each matching file against a discovered compilation
/// database.
#[derive(Debug, Clone)]
pub struct LintStep {
    pub name: String,
    /// Tree searched for the compilation database
    pub search_root: PathBuf,
    /// Tree walked for files to check
    pub source_dir: PathBuf,
    pub selection: Selection,
    pub tool: ToolSpec,
    /// Arguments placed before the database flag
    pub extra_args: Vec<String>,
    pub policy: FailurePolicy,
}

impl LintStep {
    fn invocation(&self, database_dir: PathBuf) -> ToolSpec {
        let args = self
            .extra_args
            .iter()
            .map(|a| Arg::from(a.as_str()))
            .chain([Arg::from("-p"), Arg::from(database_dir), Arg::Target])
            .collect();

        self.tool.clone().with_invocation(args)
    }
}

impl Step for LintStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, runner: &dyn CommandRunner, out: &mut dyn Write) -> Result<StepReport, Error> {
        ensure_tool_available(runner, &self.tool)?;

        let database = find_unique(&self.search_root, COMPILE_COMMANDS)?;
        let database_dir = database
            .parent()
            .map_or_else(|| self.search_root.clone(), PathBuf::from);
        log::debug!("{}: using {}", self.name, database.display());

        let tool = self.invocation(database_dir);
        let files = enumerate_targets(&self.source_dir, &self.selection);

        check_batch(runner, &tool, files, self.policy, out).map(StepReport::Linted)
    }
}

/// Runs an analyzer once over a whole tree.
#[derive(Debug, Clone)]
pub struct AnalyzeStep {
    pub name: String,
    pub root: PathBuf,
    pub tool: ToolSpec,
}

impl Step for AnalyzeStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, runner: &dyn CommandRunner, _out: &mut dyn Write) -> Result<StepReport, Error> {
        analyze_tree(runner, &self.tool, &self.root).map(|()| StepReport::Analyzed)
    }
}

/// `clang-format -i <file>` over C/C++ sources and headers in the source directory.
#[must_use]
pub fn format_cpp(config: &ProjectConfig, registry: &ToolRegistry) -> FormatStep {
    let tool = registry
        .spec(ToolId::ClangFormat)
        .with_invocation(vec!["-i".into(), Arg::Target]);

    FormatStep {
        name: "format-cpp".to_string(),
        root: config.source_dir.clone(),
        selection: Selection::suffixes(CPP_FORMAT_SUFFIXES),
        probes: vec![tool.clone()],
        passes: vec![tool],
    }
}

/// `muon fmt -i -c <config> <file>` over every Meson build file in the project.
#[must_use]
pub fn format_meson(config: &ProjectConfig, registry: &ToolRegistry) -> FormatStep {
    let tool = registry.spec(ToolId::MuonFmt).with_invocation(vec![
        "-i".into(),
        "-c".into(),
        config.muon_config.as_path().into(),
        Arg::Target,
    ]);

    FormatStep {
        name: "format-meson".to_string(),
        root: config.root.clone(),
        selection: Selection::names(MESON_FILE_NAMES),
        probes: vec![tool.clone()],
        passes: vec![tool],
    }
}

/// `isort -q <file>` then `yapf -i <file>` over every Python file in the project.
#[must_use]
pub fn format_python(config: &ProjectConfig, registry: &ToolRegistry) -> FormatStep {
    let isort = registry
        .spec(ToolId::Isort)
        .with_invocation(vec!["-q".into(), Arg::Target]);
    let yapf = registry
        .spec(ToolId::Yapf)
        .with_invocation(vec!["-i".into(), Arg::Target]);

    FormatStep {
        name: "format-python".to_string(),
        root: config.root.clone(),
        selection: Selection::suffixes(PYTHON_SUFFIXES),
        probes: vec![yapf.clone(), isort.clone()],
        passes: vec![isort, yapf],
    }
}

/// `muon analyze -Werror -O <root>` once over the project.
#[must_use]
pub fn lint_meson(config: &ProjectConfig, registry: &ToolRegistry) -> AnalyzeStep {
    let tool = registry.spec(ToolId::MuonAnalyze).with_invocation(vec![
        "-Werror".into(),
        "-O".into(),
        config.root.as_path().into(),
    ]);

    AnalyzeStep {
        name: "lint-meson".to_string(),
        root: config.root.clone(),
        tool,
    }
}

/// `clang-tidy <extra args> -p <database dir> <file>` over C/C++ sources,
/// continuing past failing files.
#[must_use]
pub fn lint_cpp(
    config: &ProjectConfig,
    registry: &ToolRegistry,
    extra_args: Vec<String>,
) -> LintStep {
    LintStep {
        name: "lint-cpp".to_string(),
        search_root: config.root.clone(),
        source_dir: config.source_dir.clone(),
        selection: Selection::suffixes(CPP_LINT_SUFFIXES),
        tool: registry.spec(ToolId::ClangTidy),
        extra_args,
        policy: FailurePolicy::Continue,
    }
}
