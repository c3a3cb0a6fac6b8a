//! Project layout and the optional `tidyup.toml` configuration file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ConfigurationError;

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "tidyup.toml";

const DEFAULT_SOURCE_DIR: &str = "src";
const DEFAULT_MUON_CONFIG: &str = ".muon.ini";

/// Per-tool overrides from `[tools.<name>]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolOverride {
    /// Executable to run instead of the tool's default program
    pub path: Option<String>,
}

/// Contents of `tidyup.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// C/C++ source directory, relative to the project root
    pub source_dir: Option<PathBuf>,

    /// Build-file formatter configuration, relative to the project root
    pub muon_config: Option<PathBuf>,

    #[serde(default)]
    pub tools: BTreeMap<String, ToolOverride>,
}

/// Tool selection configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolsConfig {
    paths: BTreeMap<String, String>,
}

impl ToolsConfig {
    /// Sets the executable used for `tool`.
    #[must_use]
    pub fn with_path(mut self, tool: impl Into<String>, path: impl Into<String>) -> Self {
        self.paths.insert(tool.into(), path.into());
        self
    }

    /// Configured executable for `tool`, if any.
    #[must_use]
    pub fn get_path(&self, tool: &str) -> Option<&str> {
        self.paths.get(tool).map(String::as_str)
    }
}

/// Resolved locations for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Project root; whole-tree steps walk from here
    pub root: PathBuf,

    /// Directory walked by the C/C++ steps
    pub source_dir: PathBuf,

    /// Configuration file passed to the build-file formatter
    pub muon_config: PathBuf,

    pub tools: ToolsConfig,
}

impl ProjectConfig {
    /// Default layout for `root`, without reading any configuration file.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            source_dir: root.join(DEFAULT_SOURCE_DIR),
            muon_config: root.join(DEFAULT_MUON_CONFIG),
            root,
            tools: ToolsConfig::default(),
        }
    }

    /// Loads the layout for `root`, applying `tidyup.toml` when present.
    ///
    /// # Errors
    ///
    /// * If `tidyup.toml` exists but cannot be read
    /// * If `tidyup.toml` is not valid
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, ConfigurationError> {
        let config = Self::new(root);
        let path = config.root.join(CONFIG_FILE_NAME);

        if !path.is_file() {
            log::debug!("No {CONFIG_FILE_NAME} in {}", config.root.display());
            return Ok(config);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigurationError::Read {
            path: path.clone(),
            source,
        })?;
        let file: ConfigFile =
            toml::from_str(&content).map_err(|source| ConfigurationError::Parse {
                path: path.clone(),
                source,
            })?;

        log::debug!("Loaded {}", path.display());

        Ok(config.apply(file))
    }

    #[must_use]
    pub fn apply(mut self, file: ConfigFile) -> Self {
        if let Some(source_dir) = file.source_dir {
            self.source_dir = self.root.join(source_dir);
        }
        if let Some(muon_config) = file.muon_config {
            self.muon_config = self.root.join(muon_config);
        }
        for (tool, over) in file.tools {
            if let Some(path) = over.path {
                self.tools = self.tools.with_path(tool, path);
            }
        }
        self
    }
}
