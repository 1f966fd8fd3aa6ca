//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use harness_application::Selection;
use harness_domain::{AssertionMode, Settings};

/// Contract tests for the loan-decision and order backend.
#[derive(Debug, Parser)]
#[command(name = "harness", version, about)]
pub struct Cli {
    /// Settings file (`.toml`, `.yaml` or `.json`).
    #[arg(long, global = true, env = "HARNESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run suites against the backend.
    Run(RunArgs),
    /// List suites and cases without sending anything.
    List(FilterArgs),
}

/// Suite and case filters, matched as case-insensitive substrings.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only suites whose name contains this.
    #[arg(long)]
    pub suite: Option<String>,

    /// Only cases whose name contains this.
    #[arg(long)]
    pub case: Option<String>,
}

impl FilterArgs {
    /// Converts the filters into a runner selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        Selection {
            suite: self.suite.clone(),
            case: self.case.clone(),
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// The full report as JSON.
    Json,
}

/// Arguments of `harness run`.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Suite and case filters.
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Run suites concurrently.
    #[arg(long)]
    pub parallel: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Override the backend base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Assertion mode for cases that do not pin one (`fail-fast` or `collect-all`).
    #[arg(long)]
    pub mode: Option<AssertionMode>,
}

impl RunArgs {
    /// Applies flag overrides on top of loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if self.parallel {
            settings.parallel = true;
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url.clone_from(base_url);
        }
        if let Some(mode) = self.mode {
            settings.default_mode = mode;
        }
    }
}
