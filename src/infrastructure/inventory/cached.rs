//! TTL-based inventory cache over an [`InventorySource`].

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::domain::{Inventory, InventoryError, InventorySnapshot, InventorySource};

struct Loaded {
    snapshot: Arc<InventorySnapshot>,
    at: Instant,
}

#[derive(Default)]
struct CacheState {
    loaded: Option<Loaded>,
    // Set by `invalidate`; the old snapshot stays readable until the reload.
    invalidated: bool,
}

/// Inventory that reloads from its source once the snapshot is older than `ttl`.
///
/// Readers share the snapshot through an `Arc`. Concurrent [`Inventory::ensure_loaded`] calls on a stale cache trigger
/// a single fetch. The state lock is only held to read or swap the snapshot,
/// so readers never wait for a fetch. A failed refresh keeps the previous
/// snapshot readable.
pub struct CachedInventory<S: InventorySource> {
    source: S,
    ttl: Duration,
    state: RwLock<CacheState>,
    // Serializes fetches.
    refresh: Mutex<()>,
}

impl<S: InventorySource> CachedInventory<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            state: RwLock::new(CacheState::default()),
            refresh: Mutex::new(()),
        }
    }

    fn is_fresh(&self, state: &CacheState) -> bool {
        !state.invalidated
            && state
                .loaded
                .as_ref()
                .is_some_and(|loaded| loaded.at.elapsed() < self.ttl)
    }
}

#[async_trait]
impl<S: InventorySource> Inventory for CachedInventory<S> {
    async fn ensure_loaded(&self) -> Result<(), InventoryError> {
        if self.is_fresh(&*self.state.read().await) {
            return Ok(());
        }

        let _refresh = self.refresh.lock().await;
        if self.is_fresh(&*self.state.read().await) {
            debug!("Inventory refreshed by a concurrent caller");
            return Ok(());
        }

        let records = self.source.fetch().await.inspect_err(|e| {
            warn!("Inventory refresh failed: {}", e);
        })?;

        info!("Inventory loaded: {} records", records.len());

        let mut state = self.state.write().await;
        state.loaded = Some(Loaded {
            snapshot: Arc::new(InventorySnapshot {
                records,
                loaded_at: Utc::now(),
            }),
            at: Instant::now(),
        });
        state.invalidated = false;

        Ok(())
    }

    async fn snapshot(&self) -> Option<Arc<InventorySnapshot>> {
        self.state
            .read()
            .await
            .loaded
            .as_ref()
            .map(|loaded| loaded.snapshot.clone())
    }

    async fn invalidate(&self) {
        self.state.write().await.invalidated = true;
        debug!("Inventory invalidated");
    }
}
