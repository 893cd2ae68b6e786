use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::RECORDS_KEY;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/platter/config.toml` or `~/.config/platter/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLATTER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub catalog: CatalogSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the collection file.
    /// Defaults to `$XDG_DATA_HOME/platter` or `~/.local/share/platter`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Key the collection is stored under (file name without `.json`).
    pub key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: RECORDS_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Sort applied at startup, as `<field>-<asc|desc>`.
    ///
    /// Fields: artist, album, year, price, genre, dateAdded.
    pub default_sort: String,
    /// Prefix used when formatting prices and the total spent.
    pub currency_symbol: String,
    /// Re-stamp `dateAdded` with the current time whenever a record is edited.
    pub refresh_date_on_edit: bool,
    /// Refuse to save a record with a blank artist or album.
    pub require_artist_album: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            default_sort: "dateAdded-desc".to_string(),
            currency_symbol: "$".to_string(),
            refresh_date_on_edit: false,
            require_artist_album: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// strftime-style pattern for the "Added" date on each card.
    pub date_format: String,
    /// Shown in place of the list when there is nothing to display.
    pub empty_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Every record tells a story ~ ".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            empty_text: "No records yet. Press [a] to add your first one.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub enabled: bool,
    /// Filter directive, e.g. `info` or `platter=debug`. `RUST_LOG` wins when set.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/platter/platter.log`
    /// or `~/.local/state/platter/platter.log`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            file: None,
        }
    }
}
