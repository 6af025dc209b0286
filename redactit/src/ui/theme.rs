// redactit/src/ui/theme.rs
//! Colors for the different kinds of terminal output.
//!
//! Styling is only applied when the target stream is a terminal; piped output
//! stays plain so redacted JSON and listings can be consumed by other tools.

use std::io::{self, Write};

use is_terminal::IsTerminal;
use owo_colors::{AnsiColors, OwoColorize};

/// The logical parts of the output that get a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEntry {
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// A filter or scenario name.
    Name,
    /// A pattern source or replacement string.
    Detail,
}

impl ThemeEntry {
    pub fn color(self) -> AnsiColors {
        match self {
            ThemeEntry::Header => AnsiColors::BrightCyan,
            ThemeEntry::Success => AnsiColors::Green,
            ThemeEntry::Info => AnsiColors::BrightBlack,
            ThemeEntry::Warn => AnsiColors::Yellow,
            ThemeEntry::Error => AnsiColors::Red,
            ThemeEntry::Name => AnsiColors::BrightYellow,
            ThemeEntry::Detail => AnsiColors::White,
        }
    }
}

/// Renders `text` in the entry's color if `enable_colors` is set.
pub fn styled(text: &str, entry: ThemeEntry, enable_colors: bool) -> String {
    if enable_colors {
        text.color(entry.color()).to_string()
    } else {
        text.to_string()
    }
}

/// Writes one styled line.
pub fn print_message<W: Write>(
    writer: &mut W,
    message: &str,
    entry: ThemeEntry,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", styled(message, entry, enable_colors))
}

pub fn info_msg(message: impl AsRef<str>) {
    stderr_msg(message.as_ref(), ThemeEntry::Info);
}

pub fn warn_msg(message: impl AsRef<str>) {
    stderr_msg(message.as_ref(), ThemeEntry::Warn);
}

pub fn error_msg(message: impl AsRef<str>) {
    stderr_msg(message.as_ref(), ThemeEntry::Error);
}

pub fn success_msg(message: impl AsRef<str>) {
    stderr_msg(message.as_ref(), ThemeEntry::Success);
}

fn stderr_msg(message: &str, entry: ThemeEntry) {
    let stderr = io::stderr();
    let enable_colors = stderr.is_terminal();
    let _ = print_message(&mut stderr.lock(), message, entry, enable_colors);
}
