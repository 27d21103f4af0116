#![deny(missing_docs)]
//! Logging for the dashboard workspace.
//!
//! The `dash_*` macros forward to the `log` facade so every crate logs the
//! same way whichever backend the binary installs. Tests install a terminal
//! backend with [`initialize_for_tests`].

/// Per-request transport detail (status, body size).
#[macro_export]
macro_rules! dash_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Dispatcher and state transitions.
#[macro_export]
macro_rules! dash_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Lifecycle events: startup, ETL runs, rejected triggers.
#[macro_export]
macro_rules! dash_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Failed requests and recoverable IO problems.
#[macro_export]
macro_rules! dash_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Failures that leave a component unusable.
#[macro_export]
macro_rules! dash_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Environment variable that overrides the default log level.
pub const LOG_LEVEL_ENV: &str = "DASHBOARD_LOG";

/// Parses a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`),
/// ignoring case and surrounding whitespace.
pub fn parse_level(raw: &str) -> Option<log::LevelFilter> {
    raw.trim().parse().ok()
}

/// Returns the level named by [`LOG_LEVEL_ENV`], or `default` when the
/// variable is unset or unparseable.
pub fn level_from_env(default: log::LevelFilter) -> log::LevelFilter {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|raw| parse_level(&raw))
        .unwrap_or(default)
}

/// Installs a terminal logger at `Debug` (or the [`LOG_LEVEL_ENV`] level).
///
/// Calling it from several tests is fine; only the first call installs.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = level_from_env(log::LevelFilter::Debug);
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::parse_level;
    use log::LevelFilter;

    #[test]
    fn parses_level_names_case_insensitively() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
    }

    #[test]
    fn rejects_unknown_level_names() {
        assert_eq!(parse_level("loud"), None);
        assert_eq!(parse_level(""), None);
    }
}
