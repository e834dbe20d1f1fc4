use thiserror::Error;

pub type TabIdResult<T> = core::result::Result<T, TabIdError>;

#[derive(Debug, Error)]
pub enum TabIdError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid tab id: '{0}'")]
    InvalidTabId(String),
}

/// Failures of the tab-scoped storage area.
///
/// There is no fallback storage tier, so these are never recovered internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("tab storage is unavailable: {0}")]
    Unavailable(String),
    #[error("writing '{key}' was rejected: {reason}")]
    WriteRejected { key: String, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("navigation to '{url}' was rejected: {reason}")]
    Rejected { url: String, reason: String },
    #[error("document reload failed: {0}")]
    Reload(String),
}

impl TabIdError {
    /// Returns true if the error came from the storage area.
    pub fn is_storage(&self) -> bool {
        matches!(self, TabIdError::Storage(_))
    }

    /// Returns true if the error came from a navigation or reload call.
    pub fn is_navigation(&self) -> bool {
        matches!(self, TabIdError::Navigation(_))
    }
}
