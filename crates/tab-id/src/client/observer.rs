use super::{StorageEventBus, Subscription, TabStore};
use crate::{error::TabIdResult, TabId};

/// Subscribe/snapshot pair over the tab store.
///
/// [`subscribe`](Self::subscribe) only wakes the caller up; the current value
/// always comes from a snapshot read, never from the notification.
#[derive(Clone)]
pub struct TabIdObserver {
    store: TabStore,
    events: StorageEventBus,
}

impl TabIdObserver {
    pub fn new(store: TabStore, events: StorageEventBus) -> Self {
        Self { store, events }
    }

    /// Calls `on_change` for every notification about exactly `key`.
    ///
    /// Notifications for other keys, and the key-less one a storage clear
    /// produces, are ignored.
    pub fn subscribe<F>(&self, key: &str, on_change: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let watched = key.to_string();
        tracing::debug!("watching storage key '{watched}'");
        self.events.listen(move |event| {
            if event.key.as_deref() == Some(watched.as_str()) {
                on_change();
            }
        })
    }

    /// The authoritative current id; generates and stores one if needed.
    pub fn get_client_snapshot(&self, key: &str) -> TabIdResult<TabId> {
        self.store.ensure(key)
    }

    /// The id to render before storage is reachable: whatever the URL carries.
    pub fn get_server_snapshot(&self, url_token: Option<&TabId>) -> Option<TabId> {
        url_token.cloned()
    }

    pub fn store(&self) -> &TabStore {
        &self.store
    }
}
