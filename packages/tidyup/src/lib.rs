#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Runs external formatters and linters over a project tree.
//!
//! Tidyup does no formatting or linting of its own. Each step finds the files a
//! tool cares about, runs the tool on them, and reports which files actually
//! changed by comparing their content before and after.
//!
//! # Steps
//!
//! * `format-cpp` - `clang-format` over `.c`/`.cpp`/`.h`/`.hpp` in the source directory
//! * `format-meson` - `muon fmt` over `meson.build`/`meson_options.txt`
//! * `format-python` - `isort` then `yapf` over `.py` files
//! * `lint-meson` - `muon analyze` over the whole project
//! * `lint-cpp` - `clang-tidy` over `.c`/`.cpp` files, continuing past failures
//!
//! # Exit codes
//!
//! * 0 - Success, including when files were reformatted
//! * 1 - A tool was missing, configuration was invalid, a check failed, or the
//!   run was interrupted

pub mod config;
pub mod driver;
mod error;
pub mod interrupt;
pub mod lint;
pub mod processor;
pub mod select;
pub mod snapshot;
pub mod steps;
pub mod tools;
pub mod walk;

pub use error::{ConfigurationError, Error};
