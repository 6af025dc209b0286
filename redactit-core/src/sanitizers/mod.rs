//! Filter compilation for the redaction engine.
//!
//! This module turns `FilterSpec`s (catalog references and inline patterns) into
//! matchers with the call's case-sensitivity mode applied. It works closely with
//! `filters` (for catalog lookups) and `config` (for the specification types).

pub mod compiler;
