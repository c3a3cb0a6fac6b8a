//! External tool definitions and execution.
//!
//! Tidyup acts as an orchestrator, not a formatter. It:
//!
//! - Knows how to call each supported tool ([`ToolRegistry`])
//! - Runs tools through a single [`CommandRunner`] abstraction
//! - Leaves all real work and configuration to the tools themselves
//!
//! # Example
//!
//! ```rust,no_run
//! use tidyup::config::ToolsConfig;
//! use tidyup::tools::{SystemRunner, ToolId, ToolRegistry};
//!
//! let registry = ToolRegistry::new(&ToolsConfig::default());
//! let clang_format = registry.spec(ToolId::ClangFormat);
//!
//! tidyup::processor::ensure_tool_available(&SystemRunner, &clang_format)?;
//! # Ok::<(), tidyup::Error>(())
//! ```

mod registry;
mod runner;
mod types;

pub use registry::{ToolId, ToolInfo, ToolRegistry};
pub use runner::{CommandRunner, Output, Status, SystemRunner};
pub use types::{Arg, FailurePolicy, ToolSpec};
