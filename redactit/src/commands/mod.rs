// redactit/src/commands/mod.rs
pub mod demo;
pub mod filters;
pub mod redact;
