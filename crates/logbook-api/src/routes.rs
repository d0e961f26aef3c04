//! Route configuration for the log API.
//!
//! The surface is exactly three read routes under the user id:
//!
//! - `GET /{userId}/logs` - paged list
//! - `GET /{userId}/logs/search` - query match
//! - `GET /{userId}/{logId}` - point lookup
//!
//! `logs` is a reserved path segment: the static route wins over the
//! `{logId}` capture, so a record whose id is literally `logs` is only
//! reachable through the list. No routes exist outside the user prefix;
//! any top-level addition would shadow a user id.

use std::sync::Arc;

use axum::routing::{get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{get_log, get_logs, search_logs};
use crate::state::AppState;

/// Create the log API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/{user_id}/logs", get(get_logs))
        .route("/{user_id}/logs/search", get(search_logs))
        .route("/{user_id}/{log_id}", get(get_log))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
