use std::path::PathBuf;

use tracing::info;

use crate::app::App;
use crate::config::{self, default_data_dir};
use crate::store::{FileStore, StoreError};

/// Pick the data directory: CLI argument, then `storage.data_dir`, then the XDG default.
pub fn resolve_data_dir(
    cli_dir: Option<PathBuf>,
    settings: &config::Settings,
) -> Result<PathBuf, StoreError> {
    cli_dir
        .or_else(|| settings.storage.data_dir.clone())
        .or_else(default_data_dir)
        .ok_or(StoreError::NoDataDir)
}

/// Open the file store and load the catalog from it.
pub fn open_catalog(
    cli_dir: Option<PathBuf>,
    settings: &config::Settings,
) -> Result<App<FileStore>, StoreError> {
    let dir = resolve_data_dir(cli_dir, settings)?;
    let store = FileStore::open(&dir)?;
    info!(path = %store.path_for(&settings.storage.key).display(), "using collection file");

    let mut app = App::new(store, settings.storage.key.clone(), settings.catalog.clone());
    app.initialize();
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecordForm;

    #[test]
    fn cli_dir_wins_over_configured_dir() {
        let mut settings = config::Settings::default();
        settings.storage.data_dir = Some(PathBuf::from("/from/config"));

        let dir = resolve_data_dir(Some(PathBuf::from("/from/cli")), &settings).unwrap();
        assert_eq!(dir, PathBuf::from("/from/cli"));
        let dir = resolve_data_dir(None, &settings).unwrap();
        assert_eq!(dir, PathBuf::from("/from/config"));
    }

    #[test]
    fn open_catalog_persists_across_sessions() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = config::Settings::default();

        let mut app = open_catalog(Some(tmp.path().to_path_buf()), &settings).unwrap();
        assert!(app.records().is_empty());
        app.start_add();
        app.save(RecordForm {
            artist: "Alice Coltrane".into(),
            album: "Journey in Satchidananda".into(),
            ..RecordForm::default()
        })
        .unwrap();

        let reopened = open_catalog(Some(tmp.path().to_path_buf()), &settings).unwrap();
        assert_eq!(reopened.records(), app.records());
        assert!(tmp.path().join("recordCollection.json").is_file());
    }
}
