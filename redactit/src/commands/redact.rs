// redactit/src/commands/redact.rs
//! The `redact` command: JSON in, redacted JSON out.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use is_terminal::IsTerminal;

use redactit_core::{FilterSpec, RedactOptions, Redactor};
use serde_json::Value as JsonValue;

use crate::cli::RedactCommand;
use crate::ui::theme::{info_msg, success_msg, warn_msg};

/// Builds the effective options: the `--config` file (or defaults), then flags on top.
pub fn build_options(cmd: &RedactCommand) -> Result<RedactOptions> {
    let mut options = match &cmd.config {
        Some(path) => RedactOptions::load_from_file(path)?,
        None => RedactOptions::default(),
    };

    if cmd.deep_scan {
        options.deep_scan = true;
    }
    if cmd.case_sensitive {
        options.case_sensitive = true;
    }
    if let Some(policy) = cmd.cycle_policy {
        options.cycle_policy = policy.into();
    }

    if !cmd.filters.is_empty() {
        options.filters = Some(cmd.filters.iter().map(FilterSpec::named).collect());
    } else if cmd.no_defaults && options.filters.is_none() {
        options.filters = Some(Vec::new());
    }

    // Additional filters keep the library's precedence: they are ignored once the
    // defaults are replaced (clap rejects that combination on the command line).
    if options.filters.is_some() && !cmd.additional_filters.is_empty() {
        warn_msg("Default filters are replaced by the options file; --additional-filter is ignored.");
    }
    options
        .additional_filters
        .extend(cmd.additional_filters.iter().map(FilterSpec::named));

    // `--key` names an exact key to redact on top of whichever list is active.
    let keys = cmd.keys.iter().map(|key| FilterSpec::literal(key.as_str()));
    match options.filters.as_mut() {
        Some(filters) => filters.extend(keys),
        None => options.additional_filters.extend(keys),
    }

    options.validate()?;
    debug!("Effective redaction options: {:?}", options);
    Ok(options)
}

/// Runs the `redact` command end to end.
pub fn run_redact(cmd: &RedactCommand) -> Result<()> {
    info!("Starting redact operation.");
    let options = build_options(cmd)?;
    let redactor = Redactor::new(&options).context("Failed to prepare filters")?;

    let input = read_input(cmd.input_file.as_deref())?;
    let document: JsonValue = serde_json::from_str(&input).context("Input is not valid JSON")?;
    let redacted = redactor.redact_json(&document).context("Redaction failed")?;

    let rendered = if cmd.pretty {
        serde_json::to_string_pretty(&redacted)?
    } else {
        serde_json::to_string(&redacted)?
    };

    match &cmd.output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            writeln!(file, "{}", rendered)?;
            success_msg(format!("Redacted JSON written to {}", path.display()));
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writeln!(writer, "{}", rendered)?;
        }
    }

    info!("Redact operation completed.");
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            info!("Reading input from stdin.");
            if io::stdin().is_terminal() {
                info_msg("Reading JSON from stdin; finish with Ctrl-D.");
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}
