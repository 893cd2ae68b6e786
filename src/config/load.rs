use std::{env, path::PathBuf};

use chrono::format::{Item, StrftimeItems};

use super::schema::Settings;
use crate::catalog::SortKey;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `PLATTER__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLATTER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !SortKey::parse(&self.catalog.default_sort).is_known() {
            return Err(format!(
                "catalog.default_sort has an unknown field: {:?}",
                self.catalog.default_sort
            ));
        }
        if self.catalog.currency_symbol.is_empty() {
            return Err("catalog.currency_symbol must not be empty".to_string());
        }
        if self.storage.key.trim().is_empty() {
            return Err("storage.key must not be empty".to_string());
        }
        if StrftimeItems::new(&self.ui.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(format!(
                "ui.date_format is not a valid date pattern: {:?}",
                self.ui.date_format
            ));
        }
        Ok(())
    }

    /// Render the default settings as a TOML document.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&Settings::default())
    }
}

/// Resolve the config path from `PLATTER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLATTER_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/platter/config.toml`
/// or `~/.config/platter/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_home("XDG_CONFIG_HOME", ".config").map(|d| d.join("platter").join("config.toml"))
}

/// Default collection directory: `$XDG_DATA_HOME/platter` or `~/.local/share/platter`.
pub fn default_data_dir() -> Option<PathBuf> {
    xdg_home("XDG_DATA_HOME", ".local/share").map(|d| d.join("platter"))
}

/// Default log file: `$XDG_STATE_HOME/platter/platter.log` or
/// `~/.local/state/platter/platter.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_home("XDG_STATE_HOME", ".local/state").map(|d| d.join("platter").join("platter.log"))
}

fn xdg_home(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var).filter(|v| !v.is_empty()) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
