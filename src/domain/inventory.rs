//! Inventory reference data and the collaborators that load it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// A single reference record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Immutable set of records loaded at `loaded_at`.
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    pub records: Vec<InventoryRecord>,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory source unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read inventory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse inventory: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Shared inventory consumed by the precondition loader gate and handlers.
///
/// Implementations must be safe for concurrent readers while a refresh is
/// in flight.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Loads the inventory if it is missing or stale. Cheap when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] when the source cannot be read.
    async fn ensure_loaded(&self) -> Result<(), InventoryError>;

    /// Returns the current snapshot, stale or not, if one was ever loaded.
    async fn snapshot(&self) -> Option<Arc<InventorySnapshot>>;

    /// Forces the next [`Inventory::ensure_loaded`] call to reload.
    async fn invalidate(&self);
}

/// Backing store the cached inventory fetches records from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<InventoryRecord>, InventoryError>;
}
