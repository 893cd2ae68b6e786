//! Application module: exposes the catalog manager used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the record collection,
//! the search/sort/form view state and the list selection.

mod model;

pub use model::*;
