use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Switch {
    fired: AtomicBool,
    notify: Notify,
}

/// One-way switch that tears down a synchronizer from outside it (tab closed,
/// view unmounted).
///
/// Clones share the switch. Once fired it stays fired.
#[derive(Debug, Clone, Default)]
pub struct TeardownHandle {
    switch: Arc<Switch>,
}

impl TeardownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teardown(&self) {
        if !self.switch.fired.swap(true, Ordering::AcqRel) {
            self.switch.notify.notify_waiters();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.switch.fired.load(Ordering::Acquire)
    }

    /// Resolves once [`teardown`](Self::teardown) has been called on any clone.
    pub async fn torn_down(&self) {
        let notified = self.switch.notify.notified();
        tokio::pin!(notified);
        // register before checking, so a teardown in between still wakes us
        notified.as_mut().enable();
        if self.is_torn_down() {
            return;
        }
        notified.await;
    }
}
