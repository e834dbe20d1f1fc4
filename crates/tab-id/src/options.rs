use crate::error::{TabIdError, TabIdResult};
use serde::{Deserialize, Serialize};

/// Default query-string key carrying the tab id (`?tid=ab-1234`).
pub const DEFAULT_ID_SEARCH_PARAM_KEY: &str = "tid";

/// Default key the tab id is stored under in tab-scoped storage.
pub const DEFAULT_SESSION_STORAGE_KEY: &str = "tab-id";

/// Configuration for the client-side synchronizer.
///
/// Every field is optional when deserialized; missing fields take the defaults
/// below. Field names are camelCase on the wire (`idSearchParamKey`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabIdOptions {
    /// Query-string key the id is written under (default: `"tid"`).
    pub id_search_param_key: String,
    /// When `false` the URL is never touched, even if it disagrees with storage.
    pub navigate: bool,
    /// Fully reload the document after correcting the URL (default: `false`).
    pub reload_document: bool,
    /// Key the id is stored under in tab-scoped storage (default: `"tab-id"`).
    pub session_storage_key: String,
}

impl Default for TabIdOptions {
    fn default() -> Self {
        Self {
            id_search_param_key: DEFAULT_ID_SEARCH_PARAM_KEY.to_string(),
            navigate: true,
            reload_document: false,
            session_storage_key: DEFAULT_SESSION_STORAGE_KEY.to_string(),
        }
    }
}

impl TabIdOptions {
    pub fn with_param_key(mut self, key: impl Into<String>) -> Self {
        self.id_search_param_key = key.into();
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.session_storage_key = key.into();
        self
    }

    /// Disables all URL mutation.
    pub fn without_navigation(mut self) -> Self {
        self.navigate = false;
        self
    }

    pub fn with_reload_document(mut self, reload: bool) -> Self {
        self.reload_document = reload;
        self
    }

    /// Validates the options
    ///
    /// Both keys must be non-empty.
    pub fn validate(&self) -> TabIdResult<()> {
        if self.id_search_param_key.is_empty() {
            return Err(TabIdError::InvalidOptions(
                "'idSearchParamKey' must not be empty.".into(),
            ));
        }
        if self.session_storage_key.is_empty() {
            return Err(TabIdError::InvalidOptions(
                "'sessionStorageKey' must not be empty.".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the server-side extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractOptions {
    /// Query-string key to read the id from (default: `"tid"`).
    pub param_key: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            param_key: DEFAULT_ID_SEARCH_PARAM_KEY.to_string(),
        }
    }
}

impl ExtractOptions {
    pub fn new(param_key: impl Into<String>) -> Self {
        Self {
            param_key: param_key.into(),
        }
    }

    pub fn validate(&self) -> TabIdResult<()> {
        if self.param_key.is_empty() {
            return Err(TabIdError::InvalidOptions(
                "'paramKey' must not be empty.".into(),
            ));
        }
        Ok(())
    }
}
