//! compiler.rs - Turns filter specifications into executable matchers.
//!
//! Named references are resolved against the default catalog, and every pattern is
//! rebuilt with the call's case-sensitivity mode baked in. Compilation is
//! all-or-nothing: the first unresolvable name or bad pattern aborts it.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};
use regex_syntax::ast::parse::ParserBuilder;
use regex_syntax::ast::print::Printer;
use regex_syntax::ast::{Ast, Flag, Flags, FlagsItemKind, GroupKind};

use crate::config::{FilterSpec, Pattern, RedactOptions, RegexOptions, REDACTED};
use crate::errors::RedactError;
use crate::filters;

/// A single compiled filter.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    /// The matcher, with the case mode of the call applied.
    pub regex: Regex,
    /// The string written in place of a matched key's value.
    pub replace_with: String,
    /// Catalog name or pattern source, for logging.
    pub name: String,
}

impl CompiledFilter {
    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

/// The ordered list of filters in effect for one call.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    pub filters: Vec<CompiledFilter>,
}

impl CompiledFilters {
    /// Returns the replacement of the first filter matching `key`.
    pub fn find_replacement(&self, key: &str) -> Option<&str> {
        self.find(key).map(|filter| filter.replace_with.as_str())
    }

    /// Returns the first filter matching `key`.
    pub fn find(&self, key: &str) -> Option<&CompiledFilter> {
        self.filters.iter().find(|filter| filter.is_match(key))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Picks the filter list for a call: `filters` alone if present, else defaults
/// followed by `additional_filters`.
pub fn resolve_effective_filters(options: &RedactOptions) -> Vec<FilterSpec> {
    match &options.filters {
        Some(custom) => {
            debug!("Using {} custom filters; defaults disabled.", custom.len());
            custom.clone()
        }
        None => {
            let mut specs = filters::list();
            debug!(
                "Using {} default filters plus {} additional filters.",
                specs.len(),
                options.additional_filters.len()
            );
            specs.extend(options.additional_filters.iter().cloned());
            specs
        }
    }
}

/// Compiles one filter specification under the given case mode.
pub fn compile_filter(spec: &FilterSpec, case_sensitive: bool) -> Result<CompiledFilter, RedactError> {
    let (pattern, replacement, name) = match spec {
        FilterSpec::Named(name) => match filters::get(name)? {
            FilterSpec::Inline { pattern, replacement } => (pattern, replacement, name.clone()),
            FilterSpec::Named(_) => return Err(RedactError::UnknownFilter(name.clone())),
        },
        FilterSpec::Inline { pattern, replacement } => {
            (pattern.clone(), replacement.clone(), pattern.to_string())
        }
    };

    let (source, options) = match &pattern {
        Pattern::Literal(literal) => (format!("^{}$", regex::escape(literal)), RegexOptions::default()),
        Pattern::Regex { regex, options } => {
            let source = without_case_flags(regex.as_str(), options.ignore_whitespace)
                .unwrap_or_else(|| regex.as_str().to_string());
            (source, *options)
        }
    };

    let mut builder = RegexBuilder::new(&source);
    options.configure(&mut builder);
    let regex = builder
        .case_insensitive(!case_sensitive)
        .size_limit(10 * (1 << 20))
        .build()
        .map_err(|e| RedactError::InvalidPattern(source.clone(), e))?;

    log::debug!(
        target: "redactit_core::compiler",
        "Filter '{}' compiled (case_sensitive: {}).",
        name,
        case_sensitive
    );

    Ok(CompiledFilter {
        regex,
        replace_with: replacement.unwrap_or_else(|| REDACTED.to_string()),
        name,
    })
}

/// Compiles an ordered list of specifications, stopping at the first failure.
pub fn compile_filters(specs: &[FilterSpec], case_sensitive: bool) -> Result<CompiledFilters, RedactError> {
    debug!("Starting compilation of {} filters.", specs.len());
    let filters = specs
        .iter()
        .map(|spec| compile_filter(spec, case_sensitive))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Finished compiling filters. Total compiled: {}.", filters.len());
    Ok(CompiledFilters { filters })
}

/// Rewrites `source` with every inline case-insensitivity flag removed, in both
/// directions (`(?i)`, `(?-i)`, `(?i:..)`, `(?-i:..)`), wherever it appears. The
/// builder's case mode is then the only one in effect. Returns `None` if the source
/// does not parse, leaving the error to the regex builder.
fn without_case_flags(source: &str, ignore_whitespace: bool) -> Option<String> {
    let mut ast = ParserBuilder::new()
        .ignore_whitespace(ignore_whitespace)
        .build()
        .parse(source)
        .ok()?;
    strip_case_flags(&mut ast);
    let mut rewritten = String::with_capacity(source.len());
    Printer::new().print(&ast, &mut rewritten).ok()?;
    Some(rewritten)
}

fn strip_case_flags(ast: &mut Ast) {
    match ast {
        Ast::Flags(set) => {
            remove_case_flag(&mut set.flags);
            if set.flags.items.is_empty() {
                let span = set.span;
                *ast = Ast::empty(span);
            }
        }
        Ast::Group(group) => {
            if let GroupKind::NonCapturing(flags) = &mut group.kind {
                remove_case_flag(flags);
            }
            strip_case_flags(&mut group.ast);
        }
        Ast::Repetition(repetition) => strip_case_flags(&mut repetition.ast),
        Ast::Alternation(alternation) => alternation.asts.iter_mut().for_each(strip_case_flags),
        Ast::Concat(concat) => concat.asts.iter_mut().for_each(strip_case_flags),
        _ => {}
    }
}

fn remove_case_flag(flags: &mut Flags) {
    flags
        .items
        .retain(|item| item.kind != FlagsItemKind::Flag(Flag::CaseInsensitive));
    // `(?x-)` is not valid syntax.
    if flags.items.last().is_some_and(|item| item.kind == FlagsItemKind::Negation) {
        flags.items.pop();
    }
}
