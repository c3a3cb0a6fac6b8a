#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tidyup::config::ProjectConfig;
use tidyup::steps::{self, Step};
use tidyup::tools::{SystemRunner, ToolRegistry};
use tidyup::{Error, driver, interrupt};

const DEFAULT_LOG_FILTER: &str = "tidyup=warn";

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[clap(rename_all = "kebab_case")]
enum FormatTarget {
    Cpp,
    Meson,
    Python,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Format files in place, reporting each file that changed
    Format {
        /// Run a single formatter instead of all of them
        #[arg(value_enum)]
        target: Option<FormatTarget>,
    },
    /// Run static analysis
    Lint {
        #[command(subcommand)]
        target: LintTarget,
    },
    /// List known tools and whether they are installed
    Tools,
}

#[derive(Subcommand, Debug, Clone)]
enum LintTarget {
    /// Check C/C++ sources with clang-tidy
    Cpp {
        /// Extra arguments passed straight through to clang-tidy
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Check Meson build files with muon
    Meson,
}

fn init_logging() {
    let filter = std::env::var("TIDYUP_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

    pretty_env_logger::formatted_builder()
        .parse_filters(&filter)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    if let Err(e) = interrupt::install_handler() {
        log::warn!("Could not install Ctrl-C handler: {e}");
    }

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let stdout = std::io::stdout();
            report(&e, &mut stdout.lock());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Prints user-facing errors as `ERROR: <message>` on `out`; anything else
/// goes to the log.
fn report(e: &Error, out: &mut dyn Write) {
    if !e.is_reported() {
        log::error!("{e}");
        return;
    }
    if let Err(write_err) = writeln!(out, "ERROR: {e}") {
        log::error!("{e} (could not print: {write_err})");
    }
}

fn run(args: Args) -> Result<(), Error> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().map_err(|source| Error::Io {
            path: PathBuf::from("."),
            source,
        })?,
    };
    let config = ProjectConfig::load(root)?;
    let registry = ToolRegistry::new(&config.tools);

    let steps: Vec<Box<dyn Step>> = match args.cmd {
        Commands::Format { target: None } => driver::formatters(&config, &registry),
        Commands::Format {
            target: Some(FormatTarget::Cpp),
        } => vec![Box::new(steps::format_cpp(&config, &registry))],
        Commands::Format {
            target: Some(FormatTarget::Meson),
        } => vec![Box::new(steps::format_meson(&config, &registry))],
        Commands::Format {
            target: Some(FormatTarget::Python),
        } => vec![Box::new(steps::format_python(&config, &registry))],
        Commands::Lint {
            target: LintTarget::Cpp { args },
        } => vec![Box::new(steps::lint_cpp(&config, &registry, args))],
        Commands::Lint {
            target: LintTarget::Meson,
        } => vec![Box::new(steps::lint_meson(&config, &registry))],
        Commands::Tools => return list_tools(&registry),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    driver::run_all(&steps, &SystemRunner, &mut out)?;

    Ok(())
}

fn list_tools(registry: &ToolRegistry) -> Result<(), Error> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for tool in registry.list_tools() {
        let location = match &tool.path {
            Some(path) if tool.available => path.display().to_string(),
            _ => format!("not found ({})", tool.program.display()),
        };
        let table = format!("[tools.{}]", tool.config_key);
        writeln!(out, "{:<14} {:<22} {table:<20} {location}", tool.key, tool.description)
            .map_err(Error::Output)?;
    }

    Ok(())
}
