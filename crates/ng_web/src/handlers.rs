use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::FixedOffset;
use ng_client::BrowseSession;
use ng_core::{Error, Feed, PageView};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    /// Reader's offset from UTC in minutes (330 for UTC+05:30). Dates use
    /// the server's zone when absent.
    pub utc_offset: Option<i32>,
}

impl PageQuery {
    fn reader_zone(&self) -> Result<Option<FixedOffset>, Error> {
        self.utc_offset
            .map(|minutes| {
                minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or_else(|| Error::InvalidTimeZone(format!("{} minutes", minutes)))
            })
            .transpose()
    }
}

/// Wraps core errors so they can be turned into responses.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidPageRequest { .. } => StatusCode::NOT_FOUND,
            Error::InvalidPageSize(_)
            | Error::InvalidTimestamp(_)
            | Error::InvalidTimeZone(_) => StatusCode::BAD_REQUEST,
            Error::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            err if err.is_upstream() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn list_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.config.topics.clone())
}

pub async fn top_headlines(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageView>, ApiError> {
    let feed = state.config.feed(None);
    page_view(&state, feed, &query).await
}

pub async fn topic(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageView>, ApiError> {
    let feed = state.config.feed(Some(topic.as_str()));
    page_view(&state, feed, &query).await
}

async fn page_view(
    state: &AppState,
    feed: Feed,
    query: &PageQuery,
) -> Result<Json<PageView>, ApiError> {
    let zone = query.reader_zone()?;
    let mut session = BrowseSession::from_config(state.fetcher.clone(), feed, &state.config)?;
    let mut view = match query.page {
        Some(page) => session.go_to_page(page).await?,
        None => session.open().await?,
    };
    if let Some(zone) = zone {
        view.localize(&zone);
    }
    Ok(Json(view))
}
