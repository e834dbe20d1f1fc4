#[cfg(feature = "axum")]
mod axum_extractor;

#[cfg(feature = "axum")]
pub use axum_extractor::*;

use crate::{
    utils::query::{first_query_value, split_url},
    TabId, DEFAULT_ID_SEARCH_PARAM_KEY,
};

/// Extracts the tab id from a request URL.
///
/// Accepts absolute URLs and bare path+query strings. Returns the first value
/// bound to `param_key`, decoded. A missing parameter, or an empty value as in
/// `?tid=`, yields `None`: the request cannot be tied to a tab and dependent
/// work should wait for a request that carries the id.
///
/// # Example
/// ```
/// use tab_id::server::extract;
///
/// assert_eq!(extract("/cart?tid=ab-1234", "tid").unwrap(), "ab-1234");
/// assert!(extract("/cart", "tid").is_none());
/// ```
pub fn extract(request_url: &str, param_key: &str) -> Option<TabId> {
    let (_, query, _) = split_url(request_url);
    query.and_then(|query| from_query(query, param_key))
}

/// [`extract`] with the default `tid` parameter.
pub fn extract_default(request_url: &str) -> Option<TabId> {
    extract(request_url, DEFAULT_ID_SEARCH_PARAM_KEY)
}

/// Extracts the tab id from the query of an HTTP request's URI.
pub fn extract_from_request<B>(request: &http::Request<B>, param_key: &str) -> Option<TabId> {
    extract_from_uri(request.uri(), param_key)
}

pub fn extract_from_uri(uri: &http::Uri, param_key: &str) -> Option<TabId> {
    uri.query().and_then(|query| from_query(query, param_key))
}

fn from_query(query: &str, param_key: &str) -> Option<TabId> {
    first_query_value(query, param_key)
        .filter(|value| !value.is_empty())
        .map(TabId::from)
}
