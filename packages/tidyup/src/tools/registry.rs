//! Tool registry for the built-in tool definitions.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::ToolsConfig;
use crate::tools::types::ToolSpec;

/// Identifies one built-in tool definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolId {
    ClangFormat,
    ClangTidy,
    MuonFmt,
    MuonAnalyze,
    Isort,
    Yapf,
}

impl ToolId {
    pub const ALL: [Self; 6] = [
        Self::ClangFormat,
        Self::ClangTidy,
        Self::MuonFmt,
        Self::MuonAnalyze,
        Self::Isort,
        Self::Yapf,
    ];

    /// Identifier shown by `tidyup tools`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ClangFormat => "clang-format",
            Self::ClangTidy => "clang-tidy",
            Self::MuonFmt => "muon-fmt",
            Self::MuonAnalyze => "muon-analyze",
            Self::Isort => "isort",
            Self::Yapf => "yapf",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ClangFormat => "C/C++ Formatter",
            Self::ClangTidy => "C/C++ Linter",
            Self::MuonFmt => "Meson Formatter",
            Self::MuonAnalyze => "Meson Analyzer",
            Self::Isort => "Python Import Sorter",
            Self::Yapf => "Python Formatter",
        }
    }

    /// Built-in definition: program, leading arguments and presence probe.
    ///
    /// Invocation templates depend on the project layout and are attached by the
    /// step that uses the tool.
    #[must_use]
    fn builtin(self) -> ToolSpec {
        match self {
            Self::ClangFormat => ToolSpec::new("clang-format").with_probe_args(["--version"]),
            Self::ClangTidy => ToolSpec::new("clang-tidy").with_probe_args(["--version"]),
            Self::MuonFmt => ToolSpec::new("muon")
                .with_base_args(["fmt"])
                .with_probe_args(["-h"]),
            Self::MuonAnalyze => ToolSpec::new("muon")
                .with_base_args(["analyze"])
                .with_probe_args(["-h"]),
            Self::Isort => ToolSpec::new("isort").with_probe_args(["--version"]),
            Self::Yapf => ToolSpec::new("yapf").with_probe_args(["--version"]),
        }
    }
}

/// Registry of the known tools with any configured executable overrides applied.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: BTreeMap<ToolId, ToolSpec>,
}

impl ToolRegistry {
    /// Creates a registry with every built-in tool, honoring path overrides
    /// from `config`. Overrides are keyed by tool name, so `muon` covers both
    /// the formatter and the analyzer.
    #[must_use]
    pub fn new(config: &ToolsConfig) -> Self {
        let tools = ToolId::ALL
            .into_iter()
            .map(|id| {
                let spec = id.builtin();
                let spec = match config.get_path(&spec.name) {
                    Some(path) => {
                        log::debug!("Tool '{}' configured at: {path}", spec.name);
                        spec.with_program(path)
                    }
                    None => spec,
                };
                (id, spec)
            })
            .collect();

        Self { tools }
    }

    /// Definition for `id`.
    #[must_use]
    pub fn spec(&self, id: ToolId) -> ToolSpec {
        self.tools
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.builtin())
    }

    /// Lists all known tools with their availability on `PATH`.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|(id, spec)| {
                let path = which::which(&spec.program).ok();
                if path.is_none() {
                    log::debug!("Tool '{}' not found", spec.name);
                }
                ToolInfo {
                    key: id.key(),
                    config_key: spec.name.clone(),
                    description: id.description(),
                    program: spec.program.clone(),
                    available: path.is_some(),
                    path,
                }
            })
            .collect()
    }
}

/// Information about a tool for display purposes
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Tool identifier
    pub key: &'static str,
    /// Name of the `[tools.<name>]` table that overrides this tool's program
    pub config_key: String,
    /// Human-readable description
    pub description: &'static str,
    /// Program that will be executed
    pub program: PathBuf,
    /// Whether the program was found
    pub available: bool,
    /// Resolved location of the program if found
    pub path: Option<PathBuf>,
}
