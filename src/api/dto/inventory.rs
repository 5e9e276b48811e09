//! DTOs for inventory endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{InventoryRecord, InventorySnapshot};

/// Full inventory snapshot.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub loaded_at: DateTime<Utc>,
    pub count: usize,
    pub records: Vec<InventoryRecord>,
}

impl From<&InventorySnapshot> for InventoryResponse {
    fn from(snapshot: &InventorySnapshot) -> Self {
        Self {
            loaded_at: snapshot.loaded_at,
            count: snapshot.records.len(),
            records: snapshot.records.clone(),
        }
    }
}

/// Result of a forced inventory reload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub loaded_at: DateTime<Utc>,
    pub count: usize,
}
