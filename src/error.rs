//! Errors raised by catalog operations.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// No record with this id exists.
    #[error("record not found: {0}")]
    NotFound(String),

    /// A required form field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The collection could not be written back to the store.
    #[error("could not save records: {0}")]
    Store(#[from] StoreError),
}
