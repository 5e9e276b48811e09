#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use gatehouse::domain::{InventoryError, InventoryRecord, InventorySource};
use gatehouse::infrastructure::inventory::CachedInventory;
use gatehouse::infrastructure::sessions::InMemorySessionStore;
use gatehouse::routes::build_router;
use gatehouse::state::AppState;

pub const ALICE_COOKIE: &str = "session=alice-token";
pub const ROOT_COOKIE: &str = "session=root-token";
pub const GHOST_COOKIE: &str = "session=ghost-token";

/// Inventory source whose failures and fetch count are controlled by the test.
///
/// Clones share the same counters.
#[derive(Clone, Default)]
pub struct FakeSource {
    fetches: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl FakeSource {
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl InventorySource for FakeSource {
    async fn fetch(&self) -> Result<Vec<InventoryRecord>, InventoryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(InventoryError::Unavailable("db unreachable".to_string()));
        }

        Ok(vec![
            InventoryRecord {
                id: "inv-1".to_string(),
                kind: "invoice".to_string(),
                data: json!({ "month": 6 }),
            },
            InventoryRecord {
                id: "inv-2".to_string(),
                kind: "invoice".to_string(),
                data: json!({ "month": 7 }),
            },
        ])
    }
}

pub fn create_session_store() -> Arc<InMemorySessionStore> {
    let store = InMemorySessionStore::new("session");
    store.insert_user("alice@example.com", false);
    store.insert_user("root@example.com", true);
    store.insert_session("alice-token", "alice@example.com", None);
    store.insert_session("root-token", "root@example.com", None);
    // Session for a user missing from the directory.
    store.insert_session("ghost-token", "ghost@example.com", None);
    Arc::new(store)
}

pub fn create_test_state() -> (AppState, FakeSource) {
    let source = FakeSource::default();
    let sessions = create_session_store();
    let inventory = Arc::new(CachedInventory::new(
        source.clone(),
        Duration::from_secs(3600),
    ));

    (AppState::new(sessions.clone(), sessions, inventory), source)
}

pub fn create_test_server() -> (TestServer, FakeSource) {
    let (state, source) = create_test_state();
    (TestServer::new(build_router(state)).unwrap(), source)
}
