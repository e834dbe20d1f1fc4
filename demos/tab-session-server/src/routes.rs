pub mod fallback_routes;
pub mod session_routes;

use crate::server::AppState;
use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::sync::Arc;

/// Constructs the Axum router with all application routes
///
/// Every request gets the configured [`ExtractOptions`](tab_id::ExtractOptions)
/// attached so `MaybeTabId` reads the right query key.
pub fn app_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(session_routes::routes())
        .merge(fallback_routes::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            attach_extract_options,
        ))
        .with_state(state)
}

// Middleware to attach the extractor configuration
async fn attach_extract_options(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    request
        .extensions_mut()
        .insert(state.extract_options.as_ref().clone());
    next.run(request).await
}
