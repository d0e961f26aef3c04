//! HTTP request handlers for the log API.
//!
//! All three read shapes resolve their inputs leniently: `page` and `limit`
//! fall back to defaults on any malformed value, and a missing `q` searches
//! for the empty string (which matches everything). Handlers therefore never
//! reject a request for its query string; the only client-visible failures
//! are a missing record (404) and a durable store fault (500).

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use logbook_core::{LogRecord, PageParams};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::reader::PagedLogs;
use crate::state::AppState;

/// Response body for `GET /{userId}/logs`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogsPage {
    /// Records on this page, newest first.
    pub logs: Vec<LogRecord>,
    /// Sequence length the page was computed against.
    pub total: usize,
    /// Page number that was served.
    pub page: usize,
    /// Page size that was applied.
    pub limit: usize,
    /// Whether another page follows this one.
    #[serde(rename = "nextPage")]
    pub next_page: bool,
}

impl From<PagedLogs> for LogsPage {
    fn from(paged: PagedLogs) -> Self {
        Self {
            logs: paged.records,
            total: paged.total,
            page: paged.page,
            limit: paged.limit,
            next_page: paged.next_page,
        }
    }
}

/// Response body for `GET /{userId}/logs/search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResults {
    /// Every record of the user that matched the query.
    pub logs: Vec<LogRecord>,
}

/// Response body for `GET /{userId}/{logId}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SingleLog {
    /// The requested record.
    pub log: LogRecord,
}

/// Handle `GET /{userId}/logs` - one page of a user's records.
pub async fn get_logs(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<LogsPage>> {
    let params = PageParams::from_raw(
        query.get("page").map(String::as_str),
        query.get("limit").map(String::as_str),
    );

    let paged = state.reader().paged_logs(&user_id, params)?;
    Ok(Json(paged.into()))
}

/// Handle `GET /{userId}/logs/search` - every record matching `q`.
pub async fn search_logs(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<SearchResults>> {
    let q = query.get("q").map_or("", String::as_str);

    let logs = state.reader().search(&user_id, q)?;
    Ok(Json(SearchResults { logs }))
}

/// Handle `GET /{userId}/{logId}` - a single record by id.
pub async fn get_log(
    State(state): State<Arc<AppState>>,
    Path((user_id, log_id)): Path<(String, String)>,
) -> ApiResult<Json<SingleLog>> {
    let log = state.reader().find(&user_id, &log_id)?;
    Ok(Json(SingleLog { log }))
}
