//! File-backed structured logging.
//!
//! The terminal belongs to the UI while the app runs, so events are written
//! to a log file instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingSettings, default_log_path};

/// Build the event filter: `RUST_LOG` when set, else the configured level.
/// An unusable level falls back to `info`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns the log file in use, or `None` when
/// logging is disabled or no log location could be determined.
pub fn init(settings: &LoggingSettings) -> Result<Option<PathBuf>, std::io::Error> {
    if !settings.enabled {
        return Ok(None);
    }

    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(build_filter(&settings.level))
        .with(layer)
        .try_init();

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_logging_installs_nothing() {
        let settings = LoggingSettings {
            enabled: false,
            ..LoggingSettings::default()
        };
        assert_eq!(init(&settings).unwrap(), None);
    }

    #[test]
    fn init_creates_log_file_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("platter.log");
        let settings = LoggingSettings {
            file: Some(path.clone()),
            ..LoggingSettings::default()
        };

        assert_eq!(init(&settings).unwrap(), Some(path.clone()));
        assert!(path.is_file());
    }
}
