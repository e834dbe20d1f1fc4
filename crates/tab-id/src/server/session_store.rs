mod in_memory_session_store;

use crate::TabId;
use async_trait::async_trait;
pub use in_memory_session_store::*;
use serde_json::{Map, Value};

/// Per-tab session record: an arbitrary JSON object.
pub type SessionData = Map<String, Value>;

/// Trait defining the interface for per-tab session storage
///
/// The tab id is only a lookup key; storage technology, expiry and
/// concurrency of records are up to the implementor.
/// Implementors must be Send and Sync to support concurrent access.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Retrieves the session of a tab
    ///
    /// # Returns
    /// * `Option<SessionData>` - The session if found, None otherwise
    async fn get(&self, key: &TabId) -> Option<SessionData>;

    async fn has(&self, key: &TabId) -> bool;

    /// Merges `patch` into the tab's session, creating it if missing
    ///
    /// Top-level fields of `patch` overwrite existing ones; other fields are
    /// kept.
    ///
    /// # Returns
    /// * `SessionData` - The session after the merge
    async fn upsert(&self, key: TabId, patch: SessionData) -> SessionData;

    /// Deletes the session of a tab
    async fn delete(&self, key: &TabId);

    async fn keys(&self) -> Vec<TabId>;

    /// Clears all sessions from the store
    async fn clear(&self);
}

/// Shallow merge used by [`SessionStore::upsert`] implementations.
pub fn merge_session(session: &mut SessionData, patch: SessionData) {
    for (field, value) in patch {
        session.insert(field, value);
    }
}
