use crate::error::StorageError;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// A key-value area scoped to exactly one tab.
///
/// In a browser this is `window.sessionStorage`: it survives reloads and in-tab
/// navigation, is dropped when the tab closes, and is never shared with another
/// tab, including duplicates.
///
/// Implementations must be Send and Sync.
pub trait TabStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: TabStorage + ?Sized> TabStorage for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// In-memory tab storage.
///
/// Clones share the same map, so a test can hold one handle while the
/// synchronizer owns another.
#[derive(Clone, Default, Debug)]
pub struct MemoryTabStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryTabStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage area pre-seeded with one entry.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(key.into(), value.into());
        }
        storage
    }

    /// Copies the current contents into an independent area, the way a
    /// browser seeds the storage of a duplicated tab.
    pub fn duplicate(&self) -> Self {
        let items = self
            .items
            .lock()
            .map(|items| items.clone())
            .unwrap_or_default();
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("storage lock poisoned".into())
    }
}

impl TabStorage for MemoryTabStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| Self::poisoned())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| Self::poisoned())?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that is switched off, e.g. disabled by browser policy.
///
/// Every call fails with [`StorageError::Unavailable`].
#[derive(Debug, Clone)]
pub struct UnavailableStorage {
    reason: String,
}

impl UnavailableStorage {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TabStorage for UnavailableStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable(self.reason.clone()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(self.reason.clone()))
    }
}
