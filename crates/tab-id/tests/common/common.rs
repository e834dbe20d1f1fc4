#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};
use tab_id::{
    client::{
        MemoryNavigator, MemoryTabStorage, StorageEventBus, TabIdObserver, TabIdSync, TabStore,
    },
    IdGenerator, TabIdOptions,
};

/// Hands out a fixed sequence of ids, then falls back to `zz-9999`.
pub struct SequenceGenerator {
    ids: Mutex<VecDeque<String>>,
}

impl SequenceGenerator {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            ids: Mutex::new(ids.iter().map(|id| id.to_string()).collect()),
        }
    }
}

impl<T> IdGenerator<T> for SequenceGenerator
where
    T: From<String>,
{
    fn generate(&self) -> T {
        let mut ids = self.ids.lock().unwrap();
        T::from(ids.pop_front().unwrap_or_else(|| "zz-9999".to_string()))
    }
}

/// One browser tab: its storage, the shared notification bus and its history.
pub struct TestTab {
    pub storage: MemoryTabStorage,
    pub events: StorageEventBus,
    pub navigator: Arc<MemoryNavigator>,
}

impl TestTab {
    pub fn new(url: &str) -> Self {
        Self::from_parts(MemoryTabStorage::new(), MemoryNavigator::new(url))
    }

    pub fn with_stored(url: &str, key: &str, value: &str) -> Self {
        Self::from_parts(MemoryTabStorage::with_item(key, value), MemoryNavigator::new(url))
    }

    pub fn from_parts(storage: MemoryTabStorage, navigator: MemoryNavigator) -> Self {
        Self {
            storage,
            events: StorageEventBus::new(),
            navigator: Arc::new(navigator),
        }
    }

    /// A synchronizer whose fresh ids come from `ids`, in order.
    pub fn sync(&self, options: TabIdOptions, ids: &[&str]) -> TabIdSync {
        let store = TabStore::with_generator(
            Arc::new(self.storage.clone()),
            Arc::new(SequenceGenerator::new(ids)),
        );
        let observer = TabIdObserver::new(store, self.events.clone());
        TabIdSync::with_observer(options, observer, self.navigator.clone()).unwrap()
    }

    pub fn url(&self) -> String {
        use tab_id::client::Navigator;
        self.navigator.current_url()
    }
}

/// Polls `condition` every few milliseconds until it holds or `limit` passes.
pub async fn wait_until(limit: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
