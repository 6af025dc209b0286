// redactit-core/src/engine.rs
//! The redaction engine.
//!
//! A [`Redactor`] owns the compiled filters for one set of [`RedactOptions`] and
//! walks value trees, replacing the values of matching keys. Every walk carries
//! its own visited table keyed by container identity, so shared and cyclic
//! structures terminate and no state leaks between calls.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::{debug, trace};
use serde_json::Value as JsonValue;

use crate::config::{CyclePolicy, RedactOptions};
use crate::errors::RedactError;
use crate::sanitizers::compiler::{compile_filters, resolve_effective_filters, CompiledFilters};
use crate::value::{ArrayRef, ObjectRef, Value};

lazy_static! {
    /// Whether trace logs may include the original value behind a redacted key.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("REDACTIT_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Compiled, reusable redaction settings.
#[derive(Debug, Clone)]
pub struct Redactor {
    filters: CompiledFilters,
    deep_scan: bool,
    cycle_policy: CyclePolicy,
}

impl Redactor {
    /// Resolves and compiles the effective filter list for `options`.
    ///
    /// Fails if a named filter is unknown or a pattern does not compile; in that
    /// case nothing is redacted.
    pub fn new(options: &RedactOptions) -> Result<Self, RedactError> {
        let specs = resolve_effective_filters(options);
        let filters = compile_filters(&specs, options.case_sensitive)?;
        debug!(
            "Redactor ready: {} filters, deep_scan: {}, case_sensitive: {}, cycle_policy: {:?}.",
            filters.len(),
            options.deep_scan,
            options.case_sensitive,
            options.cycle_policy
        );
        Ok(Self {
            filters,
            deep_scan: options.deep_scan,
            cycle_policy: options.cycle_policy,
        })
    }

    pub fn filters(&self) -> &CompiledFilters {
        &self.filters
    }

    /// The replacement for `key`, if any filter matches it.
    pub fn replacement_for(&self, key: &str) -> Option<&str> {
        self.filters.find_replacement(key)
    }

    /// Returns a redacted copy of `data`. The input is never modified.
    pub fn redact(&self, data: &Value) -> Value {
        let mut walk = Walk {
            filters: &self.filters,
            cycle_policy: self.cycle_policy,
            visited: HashMap::new(),
            redacted: 0,
        };
        let result = walk.value(data, self.deep_scan);
        debug!("Redaction finished: {} values replaced.", walk.redacted);
        result
    }

    /// Redacts a `serde_json::Value`, which cannot contain cycles.
    pub fn redact_json(&self, data: &JsonValue) -> Result<JsonValue, RedactError> {
        self.redact(&Value::from(data)).to_json()
    }
}

/// State of one top-level walk.
struct Walk<'a> {
    filters: &'a CompiledFilters,
    cycle_policy: CyclePolicy,
    /// Container identity -> what a repeat visit returns.
    visited: HashMap<usize, Value>,
    redacted: usize,
}

impl Walk<'_> {
    fn value(&mut self, value: &Value, deep_scan: bool) -> Value {
        match value {
            Value::Array(arr) => self.array(arr, deep_scan),
            Value::Object(obj) => self.object(obj, deep_scan),
            scalar => scalar.clone(),
        }
    }

    /// What a repeat visit to a container yields, given its fresh output handle.
    fn on_revisit(&self, original: Value, output: Value) -> Value {
        match self.cycle_policy {
            CyclePolicy::PreserveOriginal => original,
            CyclePolicy::ReuseRedacted => output,
        }
    }

    fn array(&mut self, arr: &ArrayRef, deep_scan: bool) -> Value {
        if let Some(seen) = self.visited.get(&arr.id()) {
            trace!("Array {:#x} already on the walk; not reprocessed.", arr.id());
            return seen.clone();
        }

        let items = arr.elements();
        let out = ArrayRef::with_capacity(items.len());
        let revisit = self.on_revisit(Value::Array(arr.clone()), Value::Array(out.clone()));
        self.visited.insert(arr.id(), revisit);

        for item in &items {
            out.push(self.value(item, deep_scan));
        }

        // Arrays only guard against cycles through themselves; a sibling branch that
        // reaches the same array again gets it processed again.
        self.visited.remove(&arr.id());
        Value::Array(out)
    }

    fn object(&mut self, obj: &ObjectRef, deep_scan: bool) -> Value {
        if let Some(seen) = self.visited.get(&obj.id()) {
            trace!("Object {:#x} already visited; not reprocessed.", obj.id());
            return seen.clone();
        }

        let out = ObjectRef::new();
        let revisit = self.on_revisit(Value::Object(obj.clone()), Value::Object(out.clone()));
        self.visited.insert(obj.id(), revisit);

        for (key, value) in obj.entries() {
            let redacted = if let Some(filter) = self.filters.find(&key) {
                self.redacted += 1;
                if *PII_DEBUG_ALLOWED {
                    trace!("Key '{}' matched filter '{}' (replaced {:?}).", key, filter.name, value);
                } else {
                    trace!("Key '{}' matched filter '{}'.", key, filter.name);
                }
                Value::String(filter.replace_with.clone())
            } else if deep_scan && value.is_container() {
                self.value(&value, deep_scan)
            } else {
                value
            };
            out.insert(key, redacted);
        }

        // Objects stay marked for the rest of the walk.
        Value::Object(out)
    }
}

/// Returns a redacted copy of `data` under `options`.
///
/// This is the main entry point. Filters are resolved and compiled first; an
/// unknown filter name or bad pattern fails the whole call before any traversal.
pub fn redact_it(data: &Value, options: &RedactOptions) -> Result<Value, RedactError> {
    Ok(Redactor::new(options)?.redact(data))
}

/// [`redact_it`] over a `serde_json::Value`.
pub fn redact_json(data: &JsonValue, options: &RedactOptions) -> Result<JsonValue, RedactError> {
    Redactor::new(options)?.redact_json(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterSpec;
    use serde_json::json;

    fn redact(input: JsonValue, options: RedactOptions) -> JsonValue {
        redact_json(&input, &options).unwrap()
    }

    #[test]
    fn test_top_level_keys_redacted() {
        let out = redact(
            json!({ "name": "John Doe", "email": "john@example.com", "ssn": "123-45-6789" }),
            RedactOptions::default(),
        );
        assert_eq!(out, json!({ "name": "John Doe", "email": "[REDACTED]", "ssn": "[REDACTED]" }));
    }

    #[test]
    fn test_matched_key_discards_container_value() {
        let out = redact(
            json!({ "password": { "old": "a", "new": "b" }, "tokens": [1, 2] }),
            RedactOptions::default(),
        );
        assert_eq!(out, json!({ "password": "[REDACTED]", "tokens": "[REDACTED]" }));
    }

    #[test]
    fn test_scalar_input_passes_through() {
        assert_eq!(redact(json!("email"), RedactOptions::default()), json!("email"));
        assert_eq!(redact(json!(null), RedactOptions::default()), json!(null));
    }

    #[test]
    fn test_unreached_nested_container_is_shared() {
        let inner: ObjectRef = [("email", "a@b.com")].into_iter().collect();
        let root = ObjectRef::new();
        root.insert("user", inner.clone());

        let out = redact_it(&Value::Object(root), &RedactOptions::default()).unwrap();
        let user = out.as_object().unwrap().get("user").unwrap();
        assert!(user.same_container(&Value::Object(inner)));
    }

    #[test]
    fn test_array_of_arrays_without_deep_scan() {
        let out = redact(
            json!([[{ "email": "a@b.com" }], { "phone": "1" }]),
            RedactOptions::default(),
        );
        assert_eq!(out, json!([[{ "email": "[REDACTED]" }], { "phone": "[REDACTED]" }]));
    }

    #[test]
    fn test_array_cycle_terminates() {
        let arr = ArrayRef::new();
        arr.push("x");
        arr.push(arr.clone());

        let out = redact_it(&Value::Array(arr.clone()), &RedactOptions::default()).unwrap();
        let out_arr = out.as_array().unwrap();
        assert_eq!(out_arr.len(), 2);
        assert!(out_arr.get(1).unwrap().same_container(&Value::Array(arr)));
    }

    #[test]
    fn test_reuse_redacted_closes_cycle_on_output() {
        let obj: ObjectRef = [("email", "john@example.com")].into_iter().collect();
        obj.insert("self", obj.clone());
        let options = RedactOptions::new()
            .with_deep_scan(true)
            .with_cycle_policy(CyclePolicy::ReuseRedacted);

        let out = redact_it(&Value::Object(obj.clone()), &options).unwrap();
        let out_obj = out.as_object().unwrap();
        let inner = out_obj.get("self").unwrap();
        assert!(inner.same_container(&out));
        assert!(!inner.same_container(&Value::Object(obj)));
        assert_eq!(inner.as_object().unwrap().get("email").unwrap().as_str(), Some("[REDACTED]"));
    }

    #[test]
    fn test_redactor_is_reusable() {
        let redactor = Redactor::new(
            &RedactOptions::new().with_filters(vec![FilterSpec::literal("secret")]),
        )
        .unwrap();
        assert_eq!(redactor.replacement_for("secret"), Some("[REDACTED]"));
        for _ in 0..2 {
            let out = redactor.redact_json(&json!({ "secret": 1, "email": 2 })).unwrap();
            assert_eq!(out, json!({ "secret": "[REDACTED]", "email": 2 }));
        }
    }
}
