// redactit-core/src/lib.rs
//! # redact-it Core Library
//!
//! `redactit-core` scrubs sensitive fields out of loosely structured data (logs, API
//! payloads) by key name. Values whose key matches a filter are replaced with a
//! placeholder; values are never inspected.
//!
//! ## Modules
//!
//! * `value`: The dynamically typed, shareable (and possibly cyclic) data tree.
//! * `filters`: The built-in catalog of named default filters.
//! * `config`: `FilterSpec`, `Pattern`, `CyclePolicy` and per-call `RedactOptions`.
//! * `sanitizers`: Compilation of filter specs into case-normalized matchers.
//! * `engine`: The `Redactor` and the cycle-safe tree walk.
//! * `errors`: The library's error type.
//!
//! ## Filter precedence
//!
//! * `filters` present (even empty): only those filters are used.
//! * otherwise: the default catalog, followed by `additional_filters`.
//!
//! Filters are tried in order and the first match decides the replacement.
//!
//! ## Usage Example
//!
//! ```rust
//! use redactit_core::{redact_json, FilterSpec, RedactOptions};
//! use serde_json::json;
//!
//! fn main() -> Result<(), redactit_core::RedactError> {
//!     let input = json!({
//!         "name": "John Doe",
//!         "email": "john@example.com",
//!         "profile": { "phone": "555-0100" },
//!         "customField": "internal"
//!     });
//!
//!     let options = RedactOptions::new()
//!         .with_deep_scan(true)
//!         .with_additional_filters(vec![FilterSpec::literal("customField").with_replacement("[HIDDEN]")]);
//!
//!     let output = redact_json(&input, &options)?;
//!     assert_eq!(output, json!({
//!         "name": "John Doe",
//!         "email": "[REDACTED]",
//!         "profile": { "phone": "[REDACTED]" },
//!         "customField": "[HIDDEN]"
//!     }));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible library calls return [`RedactError`]. Filters are compiled before any
//! traversal, so a call either fails up front or returns a fully redacted copy.
//! Options-file loading returns `anyhow::Result` with context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod errors;
pub mod filters;
pub mod sanitizers;
pub mod value;

/// Re-exports the option and filter specification types.
pub use config::{CyclePolicy, FilterSpec, Pattern, RedactOptions, RegexOptions, MAX_PATTERN_LENGTH, REDACTED};

/// Re-exports the custom error type for clear error reporting.
pub use errors::RedactError;

/// Re-exports the engine entry points.
pub use engine::{redact_it, redact_json, Redactor};

/// Re-exports the data tree types.
pub use value::{ArrayRef, Map, ObjectRef, Value};

// Compiled forms, for callers that inspect what a `Redactor` will apply.
pub use sanitizers::compiler::{compile_filter, compile_filters, CompiledFilter, CompiledFilters};
