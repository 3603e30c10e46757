//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no side effects or I/O happen here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// hubble-filter -- apply Hubble allow/deny filter specs to flow events.
///
/// Use `hubble-filter <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "hubble-filter", version, about, long_about = None)]
pub struct Cli {
    /// Path to the hubble.toml configuration file (defaults apply if missing).
    #[arg(short, long, default_value = "hubble.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read JSON-lines events and print those passing the allow/deny lists.
    Filter(FilterArgs),

    /// Load and compile a filter spec file without filtering anything.
    Validate(ValidateArgs),

    /// Print server and relay version information.
    Version,
}

// ---- filter ----

/// Filter a stream of JSON-lines events.
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Filter spec file (.yaml, .yml or .json). Overrides `filter.spec_path`.
    #[arg(short, long)]
    pub spec: Option<PathBuf>,

    /// Event input file, or `-` for stdin.
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,
}

impl FilterArgs {
    /// Whether events should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

// ---- validate ----

/// Validate a filter spec file.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Filter spec file (.yaml, .yml or .json).
    pub path: PathBuf,
}
