// redactit/src/commands/filters.rs
//! The `filters` command: prints the built-in catalog.

use anyhow::Result;
use is_terminal::IsTerminal;
use serde::Serialize;
use std::io::{self, Write};

use redactit_core::filters;

use crate::cli::FiltersCommand;
use crate::ui::theme::{styled, ThemeEntry};

#[derive(Debug, Serialize)]
struct CatalogEntry<'a> {
    name: &'a str,
    pattern: &'a str,
    replacement: &'a str,
}

fn catalog() -> Vec<CatalogEntry<'static>> {
    filters::entries()
        .iter()
        .filter_map(|entry| {
            let replacement = entry.spec.replacement()?;
            match &entry.spec {
                redactit_core::FilterSpec::Inline { pattern, .. } => Some(CatalogEntry {
                    name: entry.name,
                    pattern: pattern.as_str(),
                    replacement,
                }),
                redactit_core::FilterSpec::Named(_) => None,
            }
        })
        .collect()
}

pub fn run_filters(cmd: &FiltersCommand) -> Result<()> {
    let stdout = io::stdout();
    let enable_colors = stdout.is_terminal();
    let mut writer = stdout.lock();
    write_catalog(&mut writer, cmd.json, enable_colors)
}

/// Writes the catalog in precedence order, as a table or as JSON.
pub fn write_catalog<W: Write>(writer: &mut W, json: bool, enable_colors: bool) -> Result<()> {
    let entries = catalog();
    if json {
        serde_json::to_writer_pretty(&mut *writer, &entries)?;
        writeln!(writer)?;
        return Ok(());
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    writeln!(
        writer,
        "{}",
        styled(&format!("{} built-in filters (first match wins):", entries.len()), ThemeEntry::Header, enable_colors)
    )?;
    for entry in &entries {
        writeln!(
            writer,
            "  {}  {}",
            styled(&format!("{:<width$}", entry.name, width = width), ThemeEntry::Name, enable_colors),
            styled(entry.pattern, ThemeEntry::Detail, enable_colors)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_filter_in_order() -> Result<()> {
        let mut buf = Vec::new();
        write_catalog(&mut buf, false, false)?;
        let text = String::from_utf8(buf)?;
        let email = text.find("email").unwrap();
        let phone = text.find("phone").unwrap();
        assert!(email < phone);
        assert!(text.contains("securityAnswer"));
        assert!(text.starts_with("19 built-in filters"));
        Ok(())
    }

    #[test]
    fn test_json_listing() -> Result<()> {
        let mut buf = Vec::new();
        write_catalog(&mut buf, true, false)?;
        let parsed: serde_json::Value = serde_json::from_slice(&buf)?;
        let list = parsed.as_array().unwrap();
        assert_eq!(list.len(), 19);
        assert_eq!(list[0]["name"], "email");
        assert_eq!(list[0]["pattern"], "^.*email.*$");
        assert_eq!(list[0]["replacement"], "[REDACTED]");
        Ok(())
    }
}
