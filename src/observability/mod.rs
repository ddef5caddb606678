//! Observability and structured logging infrastructure.
//!
//! Logging goes through `tracing`. Console output is human-readable by default
//! and JSON with `LOG_JSON=true`. `LOG_FILE` adds a daily-rotated JSON file.
//! The filter comes from `RUST_LOG`, then `LOG_LEVEL`, then [`DEFAULT_FILTER`].
//!
//! ```bash
//! # Component-specific levels
//! RUST_LOG=web3_data_proxy=debug,tower_http=warn cargo run -- serve
//!
//! # JSON console output plus a rotating file
//! LOG_JSON=true LOG_FILE=./logs/proxy.log cargo run -- serve
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when neither `RUST_LOG` nor an explicit level is given.
pub const DEFAULT_FILTER: &str = "web3_data_proxy=info,tower_http=info,warn";

/// Logging options read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directive (overridden by `RUST_LOG`)
    pub level: Option<String>,
    /// Log file path; enables the rotating file layer
    pub file: Option<PathBuf>,
    /// JSON console output
    pub json: bool,
}

impl LogSettings {
    /// Read `LOG_LEVEL`, `LOG_FILE` and `LOG_JSON`. An unparsable `LOG_JSON`
    /// counts as false.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL")
                .ok()
                .filter(|level| !level.trim().is_empty()),
            file: std::env::var("LOG_FILE").ok().map(PathBuf::from),
            json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.trim().parse::<bool>().ok())
                .unwrap_or(false),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Returns the file writer guard when file logging is enabled. Keep it alive
/// for the life of the process, otherwise buffered lines are lost on exit.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init_tracing(
    settings: &LogSettings,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = match (std::env::var("RUST_LOG"), settings.level.as_deref()) {
        (Ok(filter), _) => EnvFilter::try_new(filter)?,
        (Err(_), Some(level)) => EnvFilter::try_new(level)?,
        (Err(_), None) => EnvFilter::new(DEFAULT_FILTER),
    };

    let console_layer = if settings.json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).with_line_number(true).boxed()
    };

    let mut guard = None;
    let file_layer = match settings.file.as_deref() {
        Some(path) => {
            let (directory, file_name) = log_file_location(path)?;
            let appender = tracing_appender::rolling::daily(directory, file_name);
            let (writer, file_guard) = tracing_appender::non_blocking(appender);
            guard = Some(file_guard);

            // File output is always JSON for log shipping
            Some(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_target(true)
                    .with_ansi(false)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    info!(
        json_output = settings.json,
        file_logging = settings.file.is_some(),
        "Tracing initialized"
    );

    Ok(guard)
}

/// Split a log path into the directory to rotate in (created if missing)
/// and the file name prefix.
fn log_file_location(path: &Path) -> std::io::Result<(PathBuf, OsString)> {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)?;

    let file_name = path
        .file_name()
        .map_or_else(|| OsString::from("proxy.log"), OsStr::to_os_string);

    Ok((directory.to_path_buf(), file_name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_location_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("proxy.log");

        let (directory, file_name) = log_file_location(&path).unwrap();
        assert_eq!(directory, dir.path().join("nested"));
        assert_eq!(file_name, "proxy.log");
        assert!(directory.is_dir());
    }

    #[test]
    fn test_log_file_location_without_directory() {
        let (directory, file_name) = log_file_location(Path::new("proxy.log")).unwrap();
        assert_eq!(directory, PathBuf::from("."));
        assert_eq!(file_name, "proxy.log");
    }

    #[test]
    fn test_log_settings_from_env_reads_level() {
        std::env::set_var("LOG_LEVEL", "web3_data_proxy=debug");
        let settings = LogSettings::from_env();
        std::env::remove_var("LOG_LEVEL");

        assert_eq!(settings.level.as_deref(), Some("web3_data_proxy=debug"));
    }

    #[test]
    fn test_log_settings_default_is_plain_console() {
        let settings = LogSettings::default();
        assert!(!settings.json);
        assert!(settings.file.is_none());
        assert!(settings.level.is_none());
    }
}
