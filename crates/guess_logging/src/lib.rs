#![deny(missing_docs)]
//! Shared logging utilities for the date guesser workspace.
//!
//! Library crates log through the `guess_*` macros, which route every record
//! to the [`TARGET`] target so the application can filter guesser output
//! independently of its dependencies.

/// Log target used by all `guess_*` macros.
pub const TARGET: &str = "dateguess";

/// Environment variable read by [`initialize_for_tests`] to pick a level.
pub const TEST_LEVEL_ENV: &str = "DATEGUESS_TEST_LOG";

/// Logs a trace-level message under the guesser target.
#[macro_export]
macro_rules! guess_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the guesser target.
#[macro_export]
macro_rules! guess_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the guesser target.
#[macro_export]
macro_rules! guess_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the guesser target.
#[macro_export]
macro_rules! guess_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the guesser target.
#[macro_export]
macro_rules! guess_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Parses a level name such as `debug` or `WARN`.
///
/// Unknown names yield `None`.
pub fn parse_level(name: &str) -> Option<log::LevelFilter> {
    name.trim().parse().ok()
}

/// Initializes a simple terminal logger for use in tests.
///
/// The level comes from `DATEGUESS_TEST_LOG` when set, otherwise debug in
/// debug builds and info in release builds. This safely no-ops if another
/// logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let fallback = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let level = std::env::var(TEST_LEVEL_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(fallback);

    // Ignore the error if a logger was already set by another test.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

#[cfg(test)]
mod tests {
    use super::parse_level;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(parse_level("DEBUG"), Some(log::LevelFilter::Debug));
        assert_eq!(parse_level(" warn "), Some(log::LevelFilter::Warn));
        assert_eq!(parse_level("chatty"), None);
    }

    #[test]
    fn macros_expand_without_a_logger() {
        crate::guess_debug!("sample {}", 1);
        crate::guess_trace!("sample");
    }
}
