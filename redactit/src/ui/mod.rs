// redactit/src/ui/mod.rs
//! Terminal presentation helpers.

pub mod theme;
