use super::{merge_session, SessionData, SessionStore};
use crate::TabId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory session store implementation
///
/// Stores sessions in a HashMap behind a read-write lock. Clones share the
/// same map. Nothing expires; records live as long as the store.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    store: Arc<RwLock<HashMap<TabId, SessionData>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &TabId) -> Option<SessionData> {
        let store = self.store.read().await;
        store.get(key).cloned()
    }

    async fn has(&self, key: &TabId) -> bool {
        let store = self.store.read().await;
        store.contains_key(key)
    }

    async fn upsert(&self, key: TabId, patch: SessionData) -> SessionData {
        let mut store = self.store.write().await;
        let session = store.entry(key).or_default();
        merge_session(session, patch);
        session.clone()
    }

    async fn delete(&self, key: &TabId) {
        let mut store = self.store.write().await;
        store.remove(key);
    }

    async fn keys(&self) -> Vec<TabId> {
        let store = self.store.read().await;
        store.keys().cloned().collect::<Vec<_>>()
    }

    async fn clear(&self) {
        let mut store = self.store.write().await;
        store.clear();
    }
}
