//! Configuration management for `redactit-core`.
//!
//! This module defines the filter specification types and the per-call
//! [`RedactOptions`]. Options can be built in code or deserialized from YAML/JSON,
//! where a filter is either a bare catalog name or a `search`/`replace` mapping.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::RedactError;
use crate::filters;

/// The placeholder written in place of a redacted value when a filter names no replacement.
pub const REDACTED: &str = "[REDACTED]";

/// Maximum allowed length for a filter pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Builder options of a regex pattern, kept next to it so the matcher can be rebuilt
/// under a different case mode without losing the rest of its semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexOptions {
    /// Only governs the stored matcher; compilation applies the call's case mode.
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub swap_greed: bool,
    pub ignore_whitespace: bool,
    pub unicode: bool,
    pub crlf: bool,
}

impl Default for RegexOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            swap_greed: false,
            ignore_whitespace: false,
            unicode: true,
            crlf: false,
        }
    }
}

impl RegexOptions {
    /// Applies every option except case-insensitivity.
    pub fn configure<'b>(&self, builder: &'b mut RegexBuilder) -> &'b mut RegexBuilder {
        builder
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .swap_greed(self.swap_greed)
            .ignore_whitespace(self.ignore_whitespace)
            .unicode(self.unicode)
            .crlf(self.crlf)
    }
}

/// What a key name is matched against.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches a key equal to the literal, under the call's case mode.
    Literal(String),
    /// A pre-built matcher and the options it was built with. Its case-insensitivity
    /// is overridden by the call's case mode; everything else is kept.
    Regex { regex: Regex, options: RegexOptions },
}

impl Pattern {
    /// Builds a regex pattern from source with default options.
    pub fn regex(source: &str) -> Result<Self, RedactError> {
        Self::regex_with(source, RegexOptions::default())
    }

    /// Builds a regex pattern from source with explicit builder options.
    pub fn regex_with(source: &str, options: RegexOptions) -> Result<Self, RedactError> {
        let mut builder = RegexBuilder::new(source);
        options.configure(&mut builder);
        builder
            .case_insensitive(options.case_insensitive)
            .build()
            .map(|regex| Pattern::Regex { regex, options })
            .map_err(|e| RedactError::InvalidPattern(source.to_string(), e))
    }

    /// The literal text or regex source.
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Literal(literal) => literal,
            Pattern::Regex { regex, .. } => regex.as_str(),
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Pattern::Regex { .. })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(literal) => write!(f, "{:?}", literal),
            Pattern::Regex { regex, .. } => write!(f, "/{}/", regex.as_str()),
        }
    }
}

/// A single matching rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawFilterSpec", into = "RawFilterSpec")]
pub enum FilterSpec {
    /// A reference to an entry in the default filter catalog, resolved at compile time.
    Named(String),
    /// A pattern with an optional replacement, falling back to [`REDACTED`].
    Inline {
        pattern: Pattern,
        replacement: Option<String>,
    },
}

impl FilterSpec {
    pub fn named(name: impl Into<String>) -> Self {
        FilterSpec::Named(name.into())
    }

    /// An exact key-name match.
    pub fn literal(search: impl Into<String>) -> Self {
        FilterSpec::Inline {
            pattern: Pattern::Literal(search.into()),
            replacement: None,
        }
    }

    pub fn regex(source: &str) -> Result<Self, RedactError> {
        Ok(FilterSpec::Inline {
            pattern: Pattern::regex(source)?,
            replacement: None,
        })
    }

    /// A regex built with explicit builder options.
    pub fn regex_with(source: &str, options: RegexOptions) -> Result<Self, RedactError> {
        Ok(FilterSpec::Inline {
            pattern: Pattern::regex_with(source, options)?,
            replacement: None,
        })
    }

    /// Sets the replacement. Has no effect on a named reference, whose replacement
    /// comes from the catalog.
    pub fn with_replacement(self, replacement: impl Into<String>) -> Self {
        match self {
            FilterSpec::Inline { pattern, .. } => FilterSpec::Inline {
                pattern,
                replacement: Some(replacement.into()),
            },
            named => named,
        }
    }

    pub fn replacement(&self) -> Option<&str> {
        match self {
            FilterSpec::Inline { replacement, .. } => replacement.as_deref(),
            FilterSpec::Named(_) => None,
        }
    }
}

/// On-disk shape of a filter: a bare catalog name, or a mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawFilterSpec {
    Named(String),
    Inline {
        search: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        regex: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        replace: Option<String>,
    },
}

impl TryFrom<RawFilterSpec> for FilterSpec {
    type Error = RedactError;

    fn try_from(raw: RawFilterSpec) -> Result<Self, Self::Error> {
        match raw {
            RawFilterSpec::Named(name) => Ok(FilterSpec::Named(name)),
            RawFilterSpec::Inline { search, regex, replace } => {
                let pattern = if regex {
                    Pattern::regex(&search)?
                } else {
                    Pattern::Literal(search)
                };
                Ok(FilterSpec::Inline {
                    pattern,
                    replacement: replace,
                })
            }
        }
    }
}

impl From<FilterSpec> for RawFilterSpec {
    fn from(spec: FilterSpec) -> Self {
        match spec {
            FilterSpec::Named(name) => RawFilterSpec::Named(name),
            FilterSpec::Inline { pattern, replacement } => RawFilterSpec::Inline {
                search: pattern.as_str().to_string(),
                regex: pattern.is_regex(),
                replace: replacement,
            },
        }
    }
}

/// What a container reached a second time during one walk becomes in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// The original, unprocessed container is returned by reference. A self-referencing
    /// object therefore exposes its unredacted fields through the cycle.
    #[default]
    PreserveOriginal,
    /// The redacted copy of the container is reused, so the output has the same
    /// cycles as the input and every path through it is redacted.
    ReuseRedacted,
}

/// Per-call configuration.
///
/// Unknown keys in an options document are rejected, so a misspelled field cannot
/// silently turn redaction off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RedactOptions {
    /// Traverse nested containers and match their keys too.
    pub deep_scan: bool,
    /// Match key names with exact letter case.
    pub case_sensitive: bool,
    /// When present (even empty), replaces the default filters entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterSpec>>,
    /// Appended after the default filters. Ignored when `filters` is present.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_filters: Vec<FilterSpec>,
    pub cycle_policy: CyclePolicy,
}

impl RedactOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deep_scan(mut self, deep_scan: bool) -> Self {
        self.deep_scan = deep_scan;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_filters(mut self, filters: Vec<FilterSpec>) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_additional_filters(mut self, additional_filters: Vec<FilterSpec>) -> Self {
        self.additional_filters = additional_filters;
        self
    }

    pub fn with_cycle_policy(mut self, cycle_policy: CyclePolicy) -> Self {
        self.cycle_policy = cycle_policy;
        self
    }

    /// Loads options from a YAML (or JSON) file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading redaction options from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        let options = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse options file {}", path.display()))?;
        info!(
            "Loaded options from {} ({} custom, {} additional filters).",
            path.display(),
            options.filters.as_ref().map_or(0, Vec::len),
            options.additional_filters.len()
        );
        Ok(options)
    }

    /// Parses and validates options from a YAML (or JSON) document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let options: RedactOptions =
            serde_yml::from_str(text).context("Invalid redaction options document")?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that every named filter reference exists and every pattern is of sane size.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let specs = self
            .filters
            .iter()
            .flatten()
            .chain(self.additional_filters.iter());

        for spec in specs {
            match spec {
                FilterSpec::Named(name) if !filters::is_known(name) => {
                    errors.push(RedactError::UnknownFilter(name.clone()).to_string());
                }
                FilterSpec::Inline { pattern, .. } if pattern.as_str().is_empty() => {
                    errors.push("A filter has an empty `search` field.".to_string());
                }
                FilterSpec::Inline { pattern, .. } if pattern.as_str().len() > MAX_PATTERN_LENGTH => {
                    errors.push(format!(
                        "Filter pattern length ({}) exceeds maximum allowed ({}).",
                        pattern.as_str().len(),
                        MAX_PATTERN_LENGTH
                    ));
                }
                _ => {}
            }
        }

        if !errors.is_empty() {
            return Err(anyhow!("Filter validation failed:\n{}", errors.join("\n")));
        }
        debug!("Redaction options validated.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RedactOptions::default();
        assert!(!options.deep_scan);
        assert!(!options.case_sensitive);
        assert!(options.filters.is_none());
        assert!(options.additional_filters.is_empty());
        assert_eq!(options.cycle_policy, CyclePolicy::PreserveOriginal);
    }

    #[test]
    fn test_parse_mixed_filter_specs() -> Result<()> {
        let yaml = r#"
deep_scan: true
additional_filters:
  - email
  - search: customField
    replace: "[HIDDEN]"
  - search: ".*internal.*"
    regex: true
"#;
        let options = RedactOptions::from_yaml_str(yaml)?;
        assert!(options.deep_scan);
        assert!(options.filters.is_none());
        assert_eq!(options.additional_filters.len(), 3);

        assert!(matches!(&options.additional_filters[0], FilterSpec::Named(n) if n == "email"));
        match &options.additional_filters[1] {
            FilterSpec::Inline { pattern: Pattern::Literal(s), replacement } => {
                assert_eq!(s, "customField");
                assert_eq!(replacement.as_deref(), Some("[HIDDEN]"));
            }
            other => panic!("unexpected spec: {:?}", other),
        }
        match &options.additional_filters[2] {
            FilterSpec::Inline { pattern: Pattern::Regex { regex: r, .. }, replacement } => {
                assert_eq!(r.as_str(), ".*internal.*");
                assert!(replacement.is_none());
            }
            other => panic!("unexpected spec: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_empty_filters_list_is_kept() -> Result<()> {
        let options = RedactOptions::from_yaml_str("filters: []\n")?;
        assert_eq!(options.filters.map(|f| f.len()), Some(0));
        Ok(())
    }

    #[test]
    fn test_unknown_named_filter_fails_validation() {
        let err = RedactOptions::from_yaml_str("filters: [doesNotExist]\n").unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown default filter: doesNotExist"));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let err = RedactOptions::from_yaml_str("filters:\n  - search: \"(unclosed\"\n    regex: true\n").unwrap_err();
        assert!(format!("{:#}", err).contains("(unclosed"));
    }

    #[test]
    fn test_cycle_policy_snake_case() -> Result<()> {
        let options = RedactOptions::from_yaml_str("cycle_policy: reuse_redacted\n")?;
        assert_eq!(options.cycle_policy, CyclePolicy::ReuseRedacted);
        Ok(())
    }

    #[test]
    fn test_with_replacement_ignores_named() {
        let spec = FilterSpec::named("email").with_replacement("[X]");
        assert!(spec.replacement().is_none());
        let spec = FilterSpec::literal("password").with_replacement("[HIDDEN]");
        assert_eq!(spec.replacement(), Some("[HIDDEN]"));
    }

    #[test]
    fn test_serialize_round_trips_shape() -> Result<()> {
        let options = RedactOptions::new()
            .with_filters(vec![
                FilterSpec::named("email"),
                FilterSpec::regex(".*key.*")?.with_replacement("[SECRET]"),
            ]);
        let json = serde_json::to_value(&options)?;
        assert_eq!(
            json["filters"],
            serde_json::json!(["email", { "search": ".*key.*", "regex": true, "replace": "[SECRET]" }])
        );
        Ok(())
    }

    #[test]
    fn test_unknown_option_keys_are_rejected() {
        let err = RedactOptions::from_yaml_str("deepScan: true\n").unwrap_err();
        assert!(format!("{:#}", err).contains("deepScan"));
        assert!(RedactOptions::from_yaml_str("filter: [email]\n").is_err());
    }

    #[test]
    fn test_regex_with_keeps_builder_options() -> Result<()> {
        let options = RegexOptions {
            ignore_whitespace: true,
            ..RegexOptions::default()
        };
        match Pattern::regex_with("^ e m a i l $", options)? {
            Pattern::Regex { regex, options: kept } => {
                assert!(regex.is_match("email"));
                assert_eq!(kept, options);
            }
            other => panic!("unexpected pattern: {:?}", other),
        }
        Ok(())
    }
}
