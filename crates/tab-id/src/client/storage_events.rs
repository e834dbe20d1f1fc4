use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, Weak,
    },
};

/// A "storage changed" notification.
///
/// Carries only the key that changed, never the old or new value, so listeners
/// must re-read storage. `key` is `None` when the whole area was cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: Option<String>,
}

impl StorageEvent {
    pub fn changed(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    pub fn cleared() -> Self {
        Self { key: None }
    }
}

type Listener = Arc<dyn Fn(&StorageEvent) + Send + Sync>;

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<u64, Listener>>,
}

impl BusInner {
    fn listeners(&self) -> MutexGuard<'_, HashMap<u64, Listener>> {
        // listeners are plain callbacks; a panic in one leaves the map intact
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The process-wide storage notification channel.
///
/// Every listener sees every event; filtering by key is the listener's job.
/// Listeners are called outside the registry lock, so a listener may subscribe
/// or unsubscribe while handling an event.
#[derive(Clone, Default)]
pub struct StorageEventBus {
    inner: Arc<BusInner>,
}

impl StorageEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener until the returned [`Subscription`] is dropped or
    /// unsubscribed.
    pub fn listen<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&StorageEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners().insert(id, Arc::new(listener));
        Subscription {
            bus: Arc::downgrade(&self.inner),
            id,
            active: AtomicBool::new(true),
        }
    }

    /// Delivers an event to every registered listener.
    pub fn emit(&self, event: StorageEvent) {
        let listeners: Vec<Listener> = self.inner.listeners().values().cloned().collect();
        for listener in listeners {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners().len()
    }
}

/// Disposer for a listener registration.
///
/// Unsubscribing more than once is a no-op. Dropping unsubscribes.
pub struct Subscription {
    bus: Weak<BusInner>,
    id: u64,
    active: AtomicBool,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(bus) = self.bus.upgrade() {
            bus.listeners().remove(&self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
