//! Inventory loading.
//!
//! Provides an [`crate::domain::Inventory`] implementation and its source:
//! - [`CachedInventory`] - TTL cache with single-flight refresh
//! - [`JsonFileSource`] - records read from a JSON file

mod cached;
mod file_source;

pub use cached::CachedInventory;
pub use file_source::JsonFileSource;
