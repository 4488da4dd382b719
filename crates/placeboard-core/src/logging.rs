//! Tracing setup.
//!
//! Logs go to a daily rolling file under `$PLACEBOARD_HOME/logs/` since the
//! dashboard owns the terminal. `--verbose` adds a stderr layer for CLI
//! commands.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::paths;

pub const LOG_ENV: &str = "PLACEBOARD_LOG";
const LOG_FILE_PREFIX: &str = "placeboard.log";

/// Keeps the non-blocking file writer alive; drop it last.
#[must_use = "dropping the guard stops the log writer"]
pub struct LogGuard {
    _file: WorkerGuard,
}

/// Filter directive: explicit env value wins, else `debug` when verbose,
/// else `warn`.
pub fn filter_directive(env_value: Option<&str>, verbose: bool) -> String {
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directive) => directive.to_string(),
        None if verbose => "debug".to_string(),
        None => "warn".to_string(),
    }
}

/// Installs the global subscriber.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already set.
pub fn init(verbose: bool) -> Result<LogGuard> {
    let env_value = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    let directive = filter_directive(env_value.as_deref(), verbose);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter: {directive}"))?;

    let dir = paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
    let stderr_layer = verbose.then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard { _file: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_directive_wins() {
        assert_eq!(
            filter_directive(Some("placeboard_core=debug"), false),
            "placeboard_core=debug"
        );
        assert_eq!(filter_directive(Some("trace"), true), "trace");
    }

    #[test]
    fn test_default_directive_depends_on_verbose() {
        assert_eq!(filter_directive(None, false), "warn");
        assert_eq!(filter_directive(Some("  "), true), "debug");
    }
}
