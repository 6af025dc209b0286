// redactit/src/commands/demo.rs
//! The `demo` command: walks through the main redaction features on sample data.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use serde_json::{json, Value as JsonValue};
use std::io::{self, Write};

use redactit_core::{redact_it, redact_json, CyclePolicy, FilterSpec, ObjectRef, RedactOptions, Value};

use crate::ui::theme::{styled, ThemeEntry};

/// One demonstration: an input and the option sets it is redacted under.
struct Scenario {
    title: &'static str,
    input: JsonValue,
    runs: Vec<(&'static str, RedactOptions)>,
}

fn scenarios() -> Result<Vec<Scenario>> {
    Ok(vec![
        Scenario {
            title: "Basic Usage",
            input: json!({
                "name": "John Doe",
                "email": "john@example.com",
                "phoneNumber": "555-123-4567",
                "ssn": "123-45-6789",
                "address": "123 Main St"
            }),
            runs: vec![("Output", RedactOptions::default())],
        },
        Scenario {
            title: "Array Processing",
            input: json!([
                { "name": "John", "email": "john@test.com", "role": "admin" },
                { "name": "Jane", "mobile": "555-0123", "role": "user" }
            ]),
            runs: vec![("Output", RedactOptions::default())],
        },
        Scenario {
            title: "Deep Scan",
            input: json!({
                "company": "ACME Corp",
                "employee": {
                    "profile": {
                        "name": "John Doe",
                        "contactInfo": { "email": "john@acme.com", "phone": "555-0001" }
                    }
                }
            }),
            runs: vec![
                ("Without deep scan", RedactOptions::default()),
                ("With deep scan", RedactOptions::new().with_deep_scan(true)),
            ],
        },
        Scenario {
            title: "Custom Filters",
            input: json!({
                "email": "user@example.com",
                "password": "secret123",
                "apiKey": "abc-def-123",
                "username": "john_doe"
            }),
            runs: vec![
                (
                    "Additional filters (defaults first)",
                    RedactOptions::new().with_additional_filters(vec![
                        FilterSpec::literal("password").with_replacement("[HIDDEN]"),
                        FilterSpec::regex(".*key.*$")?.with_replacement("[SECRET]"),
                    ]),
                ),
                (
                    "Replacing the defaults",
                    RedactOptions::new().with_filters(vec![
                        FilterSpec::literal("password").with_replacement("[HIDDEN]"),
                        FilterSpec::regex(".*key.*$")?.with_replacement("[SECRET]"),
                    ]),
                ),
            ],
        },
        Scenario {
            title: "Case Sensitivity",
            input: json!({
                "EMAIL": "user@example.com",
                "email": "user2@example.com",
                "Phone": "555-0123",
                "phone": "555-0124"
            }),
            runs: vec![
                ("Case insensitive (default)", RedactOptions::default()),
                ("Case sensitive", RedactOptions::new().with_case_sensitive(true)),
            ],
        },
    ])
}

pub fn run_demo() -> Result<()> {
    let stdout = io::stdout();
    let enable_colors = stdout.is_terminal();
    let mut writer = stdout.lock();
    write_demo(&mut writer, enable_colors)
}

/// Writes every scenario followed by the self-reference walkthrough.
pub fn write_demo<W: Write>(writer: &mut W, enable_colors: bool) -> Result<()> {
    writeln!(writer, "{}\n", styled("redactit demo", ThemeEntry::Header, enable_colors))?;

    for scenario in scenarios()? {
        writeln!(writer, "{}", styled(scenario.title, ThemeEntry::Name, enable_colors))?;
        writeln!(writer, "Input: {}", serde_json::to_string_pretty(&scenario.input)?)?;
        for (label, options) in &scenario.runs {
            let output = redact_json(&scenario.input, options)
                .with_context(|| format!("Demo scenario '{}' failed", scenario.title))?;
            writeln!(writer, "{}: {}", label, serde_json::to_string_pretty(&output)?)?;
        }
        writeln!(writer)?;
    }

    write_self_reference(writer, enable_colors)?;
    writeln!(writer, "{}", styled("Demo completed.", ThemeEntry::Success, enable_colors))?;
    Ok(())
}

/// A cyclic object cannot be printed as JSON, so the interesting paths are shown instead.
fn write_self_reference<W: Write>(writer: &mut W, enable_colors: bool) -> Result<()> {
    writeln!(writer, "{}", styled("Self-Referencing Object", ThemeEntry::Name, enable_colors))?;

    let user = ObjectRef::new();
    user.insert("name", "John");
    user.insert("email", "john@example.com");
    user.insert("self", user.clone());
    let data = Value::Object(user);

    for policy in [CyclePolicy::PreserveOriginal, CyclePolicy::ReuseRedacted] {
        let options = RedactOptions::new().with_deep_scan(true).with_cycle_policy(policy);
        let output = redact_it(&data, &options)?;
        writeln!(
            writer,
            "{:?}: email = {}, self.email = {}",
            policy,
            field(&output, &["email"]),
            field(&output, &["self", "email"])
        )?;
    }
    writeln!(writer)?;
    Ok(())
}

fn field(value: &Value, path: &[&str]) -> String {
    let mut current = value.clone();
    for key in path {
        let Some(next) = current.as_object().and_then(|obj| obj.get(key)) else {
            return "<missing>".to_string();
        };
        current = next;
    }
    current.as_str().map_or_else(|| format!("{:?}", current), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_runs_every_scenario() -> Result<()> {
        let mut buf = Vec::new();
        write_demo(&mut buf, false)?;
        let text = String::from_utf8(buf)?;
        for title in ["Basic Usage", "Array Processing", "Deep Scan", "Custom Filters", "Case Sensitivity"] {
            assert!(text.contains(title), "missing scenario {}", title);
        }
        assert!(text.contains("[HIDDEN]"));
        assert!(text.contains("[SECRET]"));
        assert!(text.contains("PreserveOriginal: email = [REDACTED], self.email = john@example.com"));
        assert!(text.contains("ReuseRedacted: email = [REDACTED], self.email = [REDACTED]"));
        Ok(())
    }
}
