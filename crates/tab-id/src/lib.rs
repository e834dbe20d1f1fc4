pub mod error;
mod id;
pub mod id_generator;
mod options;
mod utils;

pub use error::*;
pub use id::*;
pub use id_generator::IdGenerator;
pub use options::*;

#[cfg(feature = "client")]
pub mod client {
    //! The browser half: resolves one [`TabId`](crate::TabId) per tab and keeps the
    //! visible URL in step with it.
    //!
    //! The host environment is reached only through three seams:
    //! - [`TabStorage`]: a tab-scoped key-value area (`sessionStorage` in a browser)
    //! - [`StorageEventBus`]: the process-wide "some key changed" notification channel
    //! - [`Navigator`]: reads and follows the current URL, replaces the history entry, reloads
    //!
    //! [`TabIdSync`] wires them together. Drive it by hand with
    //! [`render`](TabIdSync::render) / [`commit`](TabIdSync::commit), or let
    //! [`run`](TabIdSync::run) loop until the tab is torn down.
    pub use super::utils::page_url::PageUrl;

    mod navigator;
    mod observer;
    mod storage;
    mod storage_events;
    mod sync;
    mod tab_store;
    mod teardown;

    pub use navigator::*;
    pub use observer::*;
    pub use storage::*;
    pub use storage_events::*;
    pub use sync::*;
    pub use tab_store::*;
    pub use teardown::*;
}

#[cfg(feature = "server")]
pub mod server {
    //! The server half: read the tab id back out of a request and key session
    //! data by it. Nothing here depends on the client half.
    mod extract;
    mod session_store;

    pub use extract::*;
    pub use session_store::*;
}
