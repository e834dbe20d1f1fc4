use super::{
    Navigator, StorageEventBus, Subscription, TabIdObserver, TabStorage, TabStore,
    TeardownHandle,
};
use crate::{error::TabIdResult, utils::page_url::PageUrl, TabId, TabIdOptions};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::Notify;

/// Where the URL stands relative to the resolved tab id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// No id known yet; render with the identifier absent.
    Unresolved,
    /// The URL carries a different id, or none.
    UrlBehind {
        resolved: TabId,
        url_token: Option<TabId>,
    },
    /// The URL carries the resolved id.
    Synced(TabId),
}

impl SyncState {
    /// Transition function: storage-backed `resolved` always wins over the URL.
    pub fn derive(resolved: Option<&TabId>, url_token: Option<&TabId>) -> Self {
        match (resolved, url_token) {
            (None, _) => SyncState::Unresolved,
            (Some(resolved), Some(url_token)) if resolved == url_token => {
                SyncState::Synced(resolved.clone())
            }
            (Some(resolved), url_token) => SyncState::UrlBehind {
                resolved: resolved.clone(),
                url_token: url_token.cloned(),
            },
        }
    }

    /// The id rendering should use, if any.
    pub fn resolved(&self) -> Option<&TabId> {
        match self {
            SyncState::Unresolved => None,
            SyncState::UrlBehind { resolved, .. } => Some(resolved),
            SyncState::Synced(id) => Some(id),
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, SyncState::Synced(_))
    }
}

/// What a [`TabIdSync::commit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing to correct: unresolved, or the URL already matches.
    Idle,
    /// The URL is behind but navigation is disabled.
    Suppressed,
    /// The current history entry was replaced with `url`.
    Replaced { url: String },
    /// As `Replaced`, followed by a full document reload.
    Reloaded { url: String },
    /// Torn down before the correction finished; no state was updated.
    Abandoned,
}

/// Keeps one tab's URL carrying the tab's stored id.
///
/// Life cycle, mirroring a UI render/effect scheduler:
/// 1. [`render`](Self::render) before [`mount`](Self::mount) uses the id already
///    in the URL (storage is not reachable yet), possibly none.
/// 2. [`mount`](Self::mount) makes storage reachable and starts watching the
///    storage key for external changes.
/// 3. Each later [`render`](Self::render) resolves the id from storage,
///    generating one on first use, and derives the [`SyncState`].
/// 4. [`commit`](Self::commit) runs the deferred effect: if the URL is behind,
///    replace the history entry (and optionally reload).
///
/// A URL id seen before mount is only used for the first paint. It is never
/// written into storage.
pub struct TabIdSync {
    options: TabIdOptions,
    observer: TabIdObserver,
    navigator: Arc<dyn Navigator>,
    state: SyncState,
    mounted: bool,
    subscription: Option<Subscription>,
    stale: Arc<AtomicBool>,
    changed: Arc<Notify>,
    teardown: TeardownHandle,
}

impl TabIdSync {
    /// Creates a synchronizer over raw host facilities.
    ///
    /// # Errors
    /// * [`TabIdError::InvalidOptions`](crate::TabIdError::InvalidOptions) if a key is empty
    pub fn new(
        options: TabIdOptions,
        storage: Arc<dyn TabStorage>,
        events: StorageEventBus,
        navigator: Arc<dyn Navigator>,
    ) -> TabIdResult<Self> {
        let observer = TabIdObserver::new(TabStore::new(storage), events);
        Self::with_observer(options, observer, navigator)
    }

    pub fn with_observer(
        options: TabIdOptions,
        observer: TabIdObserver,
        navigator: Arc<dyn Navigator>,
    ) -> TabIdResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            observer,
            navigator,
            state: SyncState::Unresolved,
            mounted: false,
            subscription: None,
            stale: Arc::new(AtomicBool::new(true)),
            changed: Arc::new(Notify::new()),
            teardown: TeardownHandle::new(),
        })
    }

    pub fn options(&self) -> &TabIdOptions {
        &self.options
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// The derived value for the rendering layer.
    pub fn current(&self) -> Option<&TabId> {
        self.state.resolved()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True if a watched-key notification arrived since the last render.
    pub fn needs_render(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    /// A handle that tears this synchronizer down from elsewhere.
    pub fn teardown_handle(&self) -> TeardownHandle {
        self.teardown.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.teardown.is_torn_down()
    }

    /// The id the current URL carries under the configured parameter.
    pub fn url_token(&self) -> Option<TabId> {
        PageUrl::parse(&self.navigator.current_url())
            .query_param(&self.options.id_search_param_key)
            .filter(|value| !value.is_empty())
            .map(TabId::from)
    }

    /// Resolves the id and derives the state. Synchronous; never navigates.
    ///
    /// # Errors
    /// * [`TabIdError::Storage`](crate::TabIdError::Storage) once mounted, if storage fails
    pub fn render(&mut self) -> TabIdResult<Option<TabId>> {
        self.stale.store(false, Ordering::Release);
        let url_token = self.url_token();
        let resolved = if self.mounted {
            Some(
                self.observer
                    .get_client_snapshot(&self.options.session_storage_key)?,
            )
        } else {
            self.observer.get_server_snapshot(url_token.as_ref())
        };

        let next = SyncState::derive(resolved.as_ref(), url_token.as_ref());
        if next != self.state {
            tracing::debug!("tab id state {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        Ok(resolved)
    }

    /// Makes storage reachable and subscribes to external changes of the key.
    ///
    /// Does nothing if already mounted or torn down.
    pub fn mount(&mut self) {
        if self.mounted || self.is_torn_down() {
            return;
        }
        let stale = Arc::clone(&self.stale);
        let changed = Arc::clone(&self.changed);
        let subscription = self
            .observer
            .subscribe(&self.options.session_storage_key, move || {
                stale.store(true, Ordering::Release);
                changed.notify_one();
            });
        self.subscription = Some(subscription);
        self.mounted = true;
        // the client snapshot may differ from what was painted before mount
        self.stale.store(true, Ordering::Release);
        self.changed.notify_one();
    }

    /// Resolves once a render is due (mount or a watched-key notification).
    pub async fn changed(&self) {
        self.changed.notified().await
    }

    /// Runs the deferred URL correction for the last render.
    ///
    /// Navigation and reload failures propagate unretried. If the synchronizer
    /// is torn down while the navigation is in flight, the navigation is left
    /// to finish but nothing further happens.
    pub async fn commit(&mut self) -> TabIdResult<CommitOutcome> {
        let SyncState::UrlBehind { resolved, .. } = &self.state else {
            return Ok(CommitOutcome::Idle);
        };
        if !self.options.navigate {
            return Ok(CommitOutcome::Suppressed);
        }
        if self.is_torn_down() {
            return Ok(CommitOutcome::Abandoned);
        }
        let resolved = resolved.clone();

        let current = PageUrl::parse(&self.navigator.current_url());
        let key = &self.options.id_search_param_key;
        if current.query_param(key).as_deref() == Some(resolved.as_str()) {
            // the URL caught up on its own since the render
            self.state = SyncState::Synced(resolved);
            return Ok(CommitOutcome::Idle);
        }
        let target = current.with_query_param(key, resolved.as_str()).to_string();

        self.navigator.replace(&target).await?;
        if self.is_torn_down() {
            tracing::warn!("torn down during navigation to '{target}'; skipping state update");
            return Ok(CommitOutcome::Abandoned);
        }
        tracing::info!("replaced URL with '{target}' to carry tab id '{resolved}'");

        let outcome = if self.options.reload_document {
            self.navigator.reload().await?;
            tracing::info!("reloaded document at '{target}'");
            CommitOutcome::Reloaded { url: target }
        } else {
            CommitOutcome::Replaced { url: target }
        };

        self.state = SyncState::derive(Some(&resolved), self.url_token().as_ref());
        Ok(outcome)
    }

    /// Stops watching storage and abandons any in-flight correction.
    pub fn teardown(&mut self) {
        self.teardown.teardown();
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            tracing::debug!(
                "stopped watching storage key '{}'",
                self.options.session_storage_key
            );
        }
    }

    /// Drives the whole life cycle until torn down through a
    /// [`TeardownHandle`]: first paint, mount, then render and commit whenever
    /// the watched key or the page location changes.
    pub async fn run(mut self) -> TabIdResult<()> {
        let result = self.drive().await;
        self.teardown();
        result
    }

    async fn drive(&mut self) -> TabIdResult<()> {
        let teardown = self.teardown.clone();
        let changed = Arc::clone(&self.changed);
        let mut location = self.navigator.location();
        let mut follows_location = true;

        self.render()?;
        self.mount();
        loop {
            tokio::select! {
                _ = changed.notified() => {}
                moved = location.changed(), if follows_location => {
                    if moved.is_err() {
                        tracing::debug!("navigator closed its location feed");
                        follows_location = false;
                        continue;
                    }
                }
                _ = teardown.torn_down() => return Ok(()),
            }
            if teardown.is_torn_down() {
                return Ok(());
            }
            self.render()?;
            self.commit().await?;
        }
    }
}

impl Drop for TabIdSync {
    fn drop(&mut self) {
        self.teardown();
    }
}
