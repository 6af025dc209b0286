// redactit/src/logger.rs
//! Logger setup for the CLI.
//!
//! `RUST_LOG` is honored unless an explicit level override is passed in, which is
//! how `--quiet` and `--debug` take precedence over the environment.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Default filter when neither `RUST_LOG` nor an override is given.
const DEFAULT_FILTER: &str = "warn";

/// Initializes `env_logger` writing to stderr. Calling it twice is harmless.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.target(Target::Stderr).format_timestamp(None);

    if let Some(level) = level_override {
        builder.filter_level(level);
    }

    // A logger may already be installed (tests run commands in-process).
    let _ = builder.try_init();
}

/// Maps the global CLI flags onto a level override.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_debug() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }
}
