//! yamltmpl core library: context types, directory loader, errors.
//!
//! - [`types`]: [`ContextRecord`] and naming helpers
//! - [`loader`]: turn a directory of YAML documents into a [`ContextCollection`]
//! - [`error`]: [`LoadError`]

pub mod error;
pub mod loader;
pub mod types;

pub use error::LoadError;
pub use loader::{load, load_document, load_ordered};
pub use types::{base_name, ContextCollection, ContextRecord, ListingOrder, FILE_NAME_KEY};
