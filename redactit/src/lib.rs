// redactit/src/lib.rs
//! # redactit CLI
//!
//! Command-line front end for `redactit-core`: redacts JSON documents read from
//! stdin or a file, lists the built-in filter catalog and runs a demonstration.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
