#[cfg(feature = "client")]
pub mod page_url;
pub mod query;
