//! Catalog domain: records, the add/edit form, and the views derived from them.
//!
//! Everything in here is free of I/O and terminal concerns. Persistence lives in
//! `crate::store`, the catalog manager in `crate::app`.

mod display;
mod model;
mod numeric;
mod query;
mod stats;

pub use display::*;
pub use model::*;
pub use query::*;
pub use stats::*;
