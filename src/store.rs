//! Key-value persistence for the record collection.
//!
//! The whole collection is stored as one JSON array under a single key and is
//! rewritten in full on every change.

mod file;
mod memory;

use thiserror::Error;
use tracing::warn;

use crate::catalog::Record;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key the collection is stored under unless configured otherwise.
pub const RECORDS_KEY: &str = "recordCollection";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no data directory could be determined")]
    NoDataDir,
}

/// A string-blob store addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Load the collection stored under `key`.
///
/// A missing key, a failed read, or content that isn't a JSON array of records
/// all produce an empty collection.
pub fn load_collection<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Vec<Record> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "failed to read stored records, starting empty");
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<Record>>(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(key, error = %e, "stored records are malformed, starting empty");
            Vec::new()
        }
    }
}

/// Overwrite the collection stored under `key`.
pub fn save_collection<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    records: &[Record],
) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests;
