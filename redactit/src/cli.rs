// redactit/src/cli.rs
//! Command-line interface definition for `redactit`.
//! License: MIT OR APACHE 2.0

use clap::{Parser, Subcommand, ValueEnum};
use redactit_core::CyclePolicy;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "redactit",
    version = env!("CARGO_PKG_VERSION"),
    about = "Redact sensitive fields from JSON by key name",
    long_about = "redactit replaces the values of sensitive-looking keys (emails, phone numbers, passwords, identifiers and more) in JSON documents. Matching is done on key names only, never on values, using a built-in catalog of filters that can be extended or replaced.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redacts a JSON document from a file or stdin.
    Redact(RedactCommand),

    /// Lists the built-in filters in precedence order.
    Filters(FiltersCommand),

    /// Runs the demonstration scenarios.
    Demo,
}

/// Arguments for the `redact` command.
#[derive(Parser, Debug, Default)]
pub struct RedactCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read JSON from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write redacted output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Path to a redaction options file (YAML or JSON).
    #[arg(long = "config", value_name = "FILE", env = "REDACTIT_CONFIG", help = "Load redaction options from a YAML or JSON file.")]
    pub config: Option<PathBuf>,

    #[arg(long = "deep-scan", help = "Also match keys of nested objects and arrays.")]
    pub deep_scan: bool,

    #[arg(long = "case-sensitive", help = "Match key names with exact letter case.")]
    pub case_sensitive: bool,

    /// Use only these built-in filters (comma-separated or repeated).
    #[arg(long = "filter", short = 'f', value_name = "NAME", value_delimiter = ',', help = "Use only these built-in filters; defaults are disabled.")]
    pub filters: Vec<String>,

    /// Add these built-in filters after the defaults. Only meaningful while the defaults are active.
    #[arg(long = "additional-filter", short = 'a', value_name = "NAME", value_delimiter = ',', conflicts_with_all = ["filters", "no_defaults"], help = "Add built-in filters after the defaults.")]
    pub additional_filters: Vec<String>,

    /// Redact these exact key names in addition to the active filters.
    #[arg(long = "key", short = 'k', value_name = "KEY", help = "Redact this exact key name (repeatable).")]
    pub keys: Vec<String>,

    #[arg(long = "no-defaults", help = "Disable the built-in filters.")]
    pub no_defaults: bool,

    #[arg(long = "cycle-policy", value_enum, value_name = "POLICY", help = "How containers reached twice are emitted.")]
    pub cycle_policy: Option<CyclePolicyArg>,

    #[arg(long, short = 'p', help = "Pretty-print the output JSON.")]
    pub pretty: bool,
}

/// Arguments for the `filters` command.
#[derive(Parser, Debug)]
pub struct FiltersCommand {
    #[arg(long, help = "Print the catalog as JSON.")]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CyclePolicyArg {
    /// Repeat visits keep the original container.
    PreserveOriginal,
    /// Repeat visits reuse the redacted copy.
    ReuseRedacted,
}

impl From<CyclePolicyArg> for CyclePolicy {
    fn from(arg: CyclePolicyArg) -> Self {
        match arg {
            CyclePolicyArg::PreserveOriginal => CyclePolicy::PreserveOriginal,
            CyclePolicyArg::ReuseRedacted => CyclePolicy::ReuseRedacted,
        }
    }
}
