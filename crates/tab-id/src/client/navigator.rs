use crate::error::NavigationError;
use async_trait::async_trait;
use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::sync::watch;

/// The host's view of the current page location.
///
/// `replace` swaps the current history entry rather than pushing a new one.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// The current URL: path and query at least, optionally absolute.
    fn current_url(&self) -> String;

    async fn replace(&self, url: &str) -> Result<(), NavigationError>;

    /// Reloads the whole document at the current URL.
    async fn reload(&self) -> Result<(), NavigationError>;

    /// Follows the current URL. The receiver sees every location change,
    /// whether from [`replace`](Self::replace) or from in-tab navigation.
    fn location(&self) -> watch::Receiver<String>;
}

#[derive(Debug, Default)]
struct History {
    entries: Vec<String>,
    replacements: Vec<String>,
    reloads: usize,
    fail_next: Option<NavigationError>,
}

/// A history stack held in memory.
///
/// Records every replacement and reload so callers can assert on them. Clones
/// share the same history.
#[derive(Clone, Debug)]
pub struct MemoryNavigator {
    history: Arc<Mutex<History>>,
    location: Arc<watch::Sender<String>>,
    latency: Option<Duration>,
}

impl MemoryNavigator {
    pub fn new(initial_url: impl Into<String>) -> Self {
        let initial_url = initial_url.into();
        let (location, _) = watch::channel(initial_url.clone());
        let history = History {
            entries: vec![initial_url],
            ..Default::default()
        };
        Self {
            history: Arc::new(Mutex::new(history)),
            location: Arc::new(location),
            latency: None,
        }
    }

    /// Makes every `replace` and `reload` take `latency` to complete.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Pushes a new entry, as a user following a link in the same tab would.
    pub fn visit(&self, url: impl Into<String>) {
        let url = url.into();
        self.history().entries.push(url.clone());
        self.location.send_replace(url);
    }

    /// Makes the next `replace` or `reload` fail with `error`.
    pub fn fail_next(&self, error: NavigationError) {
        self.history().fail_next = Some(error);
    }

    /// Every URL passed to `replace`, oldest first.
    pub fn replacements(&self) -> Vec<String> {
        self.history().replacements.clone()
    }

    pub fn reloads(&self) -> usize {
        self.history().reloads
    }

    /// Number of history entries; `replace` never changes it.
    pub fn history_len(&self) -> usize {
        self.history().entries.len()
    }

    fn history(&self) -> MutexGuard<'_, History> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn settle(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl Navigator for MemoryNavigator {
    fn current_url(&self) -> String {
        self.history().entries.last().cloned().unwrap_or_default()
    }

    async fn replace(&self, url: &str) -> Result<(), NavigationError> {
        self.settle().await;
        let mut history = self.history();
        if let Some(error) = history.fail_next.take() {
            return Err(error);
        }
        match history.entries.last_mut() {
            Some(current) => *current = url.to_string(),
            None => history.entries.push(url.to_string()),
        }
        history.replacements.push(url.to_string());
        drop(history);
        self.location.send_replace(url.to_string());
        Ok(())
    }

    async fn reload(&self) -> Result<(), NavigationError> {
        self.settle().await;
        let mut history = self.history();
        if let Some(error) = history.fail_next.take() {
            return Err(error);
        }
        history.reloads += 1;
        Ok(())
    }

    fn location(&self) -> watch::Receiver<String> {
        self.location.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replace_keeps_history_length() {
        let navigator = MemoryNavigator::new("/");
        navigator.visit("/list?page=2");
        navigator.replace("/list?page=2&tid=ab-1234").await.unwrap();

        assert_eq!(navigator.history_len(), 2);
        assert_eq!(navigator.current_url(), "/list?page=2&tid=ab-1234");
        assert_eq!(navigator.replacements(), vec!["/list?page=2&tid=ab-1234"]);
    }

    #[tokio::test]
    async fn location_follows_visits_and_replacements() {
        let navigator = MemoryNavigator::new("/");
        let mut location = navigator.location();
        assert!(!location.has_changed().unwrap());

        navigator.visit("/other?x=1");
        assert!(location.has_changed().unwrap());
        assert_eq!(*location.borrow_and_update(), "/other?x=1");

        navigator.replace("/other?x=1&tid=ab-1234").await.unwrap();
        assert_eq!(*location.borrow_and_update(), "/other?x=1&tid=ab-1234");

        navigator.fail_next(NavigationError::Reload("offline".into()));
        assert!(navigator.replace("/elsewhere").await.is_err());
        assert!(!location.has_changed().unwrap());
    }

    #[tokio::test]
    async fn fail_next_applies_once() {
        let navigator = MemoryNavigator::new("/");
        navigator.fail_next(NavigationError::Reload("offline".into()));

        assert!(navigator.reload().await.is_err());
        assert!(navigator.reload().await.is_ok());
        assert_eq!(navigator.reloads(), 1);
    }
}
