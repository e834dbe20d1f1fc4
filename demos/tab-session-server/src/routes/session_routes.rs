use crate::{
    error::{ServerResult, TabSessionServerError},
    server::AppState,
};
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tab_id::server::{MaybeTabId, SessionData};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handle_visit))
        .route("/session", get(handle_session))
}

/// Counts visits per tab.
///
/// A request without a tab id cannot be tied to a session; the client is
/// expected to come back once its URL carries one.
pub async fn handle_visit(
    State(state): State<Arc<AppState>>,
    MaybeTabId(tab_id): MaybeTabId,
) -> Json<Value> {
    let Some(tab_id) = tab_id else {
        tracing::debug!("request without a tab id");
        return Json(json!({ "status": "unresolved" }));
    };

    let visits = state
        .session_store
        .get(&tab_id)
        .await
        .and_then(|session| session.get("visits").and_then(Value::as_u64))
        .unwrap_or(0)
        + 1;

    let mut patch = SessionData::new();
    patch.insert("visits".into(), visits.into());
    let session = state.session_store.upsert(tab_id.clone(), patch).await;
    tracing::info!("tab {tab_id} visit #{visits}");

    Json(json!({
        "status": "resolved",
        "tabId": tab_id,
        "session": session,
    }))
}

/// Returns the stored session of the requesting tab.
pub async fn handle_session(
    State(state): State<Arc<AppState>>,
    MaybeTabId(tab_id): MaybeTabId,
) -> ServerResult<Json<Value>> {
    let tab_id = tab_id.ok_or_else(|| {
        TabSessionServerError::TabIdMissing(state.extract_options.param_key.clone())
    })?;
    let session = state
        .session_store
        .get(&tab_id)
        .await
        .ok_or_else(|| TabSessionServerError::SessionNotFound(tab_id.to_string()))?;
    Ok(Json(json!({ "tabId": tab_id, "session": session })))
}
