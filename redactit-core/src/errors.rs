//! errors.rs - Custom error types for the redactit-core library.
//!
//! Filter resolution and compilation happen before any traversal starts, so every
//! error here is reported up front and a failed call never yields partial output.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `redactit-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RedactError {
    /// A named filter reference did not resolve against the default filter catalog.
    #[error("Unknown default filter: {0}")]
    UnknownFilter(String),

    /// The regex engine rejected a pattern.
    #[error("Failed to compile filter pattern '{0}': {1}")]
    InvalidPattern(String, regex::Error),

    /// A value containing a reference cycle cannot be represented as JSON.
    #[error("Cannot convert a cyclic value to JSON")]
    CyclicValue,
}
