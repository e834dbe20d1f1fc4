use super::TabStorage;
use crate::{
    error::TabIdResult,
    id_generator::{IdGenerator, TabIdGenerator},
    TabId,
};
use std::sync::Arc;

/// Durable, tab-scoped persistence of one [`TabId`].
///
/// An empty stored string counts as no value.
#[derive(Clone)]
pub struct TabStore {
    storage: Arc<dyn TabStorage>,
    id_generator: Arc<dyn IdGenerator<TabId>>,
}

impl TabStore {
    /// Creates a store that mints new ids with [`TabIdGenerator`].
    pub fn new(storage: Arc<dyn TabStorage>) -> Self {
        Self::with_generator(storage, Arc::new(TabIdGenerator))
    }

    pub fn with_generator(
        storage: Arc<dyn TabStorage>,
        id_generator: Arc<dyn IdGenerator<TabId>>,
    ) -> Self {
        Self {
            storage,
            id_generator,
        }
    }

    /// Returns the stored id, if any.
    pub fn read(&self, key: &str) -> TabIdResult<Option<TabId>> {
        let value = self.storage.get_item(key)?.filter(|v| !v.is_empty());
        Ok(value.map(|value| {
            let id = TabId::from(value);
            if !id.is_well_formed() {
                tracing::warn!("non-canonical tab id '{id}' stored under '{key}'");
            }
            id
        }))
    }

    /// Returns the stored id, generating and storing one first if there is none.
    ///
    /// Never overwrites an existing value, so repeated calls in the same tab
    /// return the same id.
    pub fn ensure(&self, key: &str) -> TabIdResult<TabId> {
        if let Some(id) = self.read(key)? {
            return Ok(id);
        }
        let id = self.id_generator.generate();
        self.storage.set_item(key, id.as_str())?;
        tracing::debug!("generated tab id '{id}' under '{key}'");
        Ok(id)
    }

    /// Unconditionally stores `value` under `key`.
    ///
    /// Normal resolution goes through [`ensure`](Self::ensure); this exists for
    /// applying external changes.
    pub fn write(&self, key: &str, value: &TabId) -> TabIdResult<()> {
        self.storage.set_item(key, value.as_str())?;
        Ok(())
    }
}
