use std::path::PathBuf;

use clap::Parser;

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `testset_tool` binary.
#[derive(Debug, Parser)]
#[command(
    name = "testset_tool",
    version,
    about = "Lint, show and convert test set directories"
)]
pub struct Cli {
    /// Directory with the test set
    pub dirname: PathBuf,

    /// Lint the test set
    #[arg(long)]
    pub lint: bool,

    /// Show the test set
    #[arg(long)]
    pub show: bool,

    /// Convert this legacy test set into DIRNAME
    #[arg(long, value_name = "FROM")]
    pub convert: Option<PathBuf>,

    /// Output format: text, json (defaults to the configured format)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Show debug statements
    #[arg(short, long)]
    pub debug: bool,

    /// Verbose mode (same log level as --debug)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode (errors only, no success summaries)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Resolve flags for command handlers, falling back to `default_format`
    /// when `--format` was not given.
    #[must_use]
    pub fn global_flags(&self, default_format: OutputFormat) -> GlobalFlags {
        GlobalFlags {
            format: self.format.unwrap_or(default_format),
            quiet: self.quiet,
            verbose: self.verbose || self.debug,
        }
    }

    /// Whether any operation was requested.
    #[must_use]
    pub const fn has_operation(&self) -> bool {
        self.lint || self.show || self.convert.is_some()
    }
}
