use super::extract_from_uri;
use crate::{ExtractOptions, TabId, DEFAULT_ID_SEARCH_PARAM_KEY};
use axum::extract::FromRequestParts;
use http::request::Parts;
use std::convert::Infallible;

/// Axum extractor for the tab id of a request, if it carries one.
///
/// Never rejects. The parameter name comes from an [`ExtractOptions`] in the
/// request extensions when a layer inserted one, otherwise `tid`.
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use tab_id::server::MaybeTabId;
///
/// async fn handler(MaybeTabId(tab_id): MaybeTabId) -> String {
///     match tab_id {
///         Some(tab_id) => format!("hello tab {tab_id}"),
///         None => "unresolved".to_string(),
///     }
/// }
///
/// let app: Router = Router::new().route("/", get(handler));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaybeTabId(pub Option<TabId>);

impl<S> FromRequestParts<S> for MaybeTabId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let param_key = parts
            .extensions
            .get::<ExtractOptions>()
            .map(|options| options.param_key.as_str())
            .unwrap_or(DEFAULT_ID_SEARCH_PARAM_KEY);
        Ok(MaybeTabId(extract_from_uri(&parts.uri, param_key)))
    }
}
