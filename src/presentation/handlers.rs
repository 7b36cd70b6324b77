// HTTP request handlers
use crate::domain::range::{resolve_range, RangeKey, ResolvedRange};
use crate::domain::snapshot::StatKey;
use crate::infrastructure::http_response::json_response;
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use crate::presentation::views::{timeline_view, CharacterView, SessionView};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

const DEFAULT_RANGE: &str = "24h";
const DEFAULT_STAT: &str = "level";

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub range: Option<String>,
    pub stat: Option<String>,
    /// Comma-separated character ids; omitted means every character
    pub visible: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DashboardQuery {
    fn resolve(&self) -> Result<(RangeKey, ResolvedRange), ApiError> {
        let key: RangeKey = self.range.as_deref().unwrap_or(DEFAULT_RANGE).parse()?;

        let custom = match (key, self.from, self.to) {
            (RangeKey::Custom, Some(from), Some(to)) if from >= to => {
                return Err(ApiError::BadRequest(format!(
                    "custom range start {} is not before end {}",
                    from, to
                )));
            }
            (RangeKey::Custom, Some(from), Some(to)) => Some((from, to)),
            _ => None,
        };

        Ok((key, resolve_range(key, custom)?))
    }

    fn stat(&self) -> Result<StatKey, ApiError> {
        Ok(self.stat.as_deref().unwrap_or(DEFAULT_STAT).parse()?)
    }

    fn visible(&self) -> Option<HashSet<String>> {
        self.visible.as_ref().map(|ids| {
            ids.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

/// Check if client accepts Brotli compression
fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get("accept-encoding")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

fn respond(result: Result<Response, axum::http::StatusCode>) -> Response {
    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List tracked characters
pub async fn list_characters(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let characters: Vec<CharacterView> = state
        .character_service
        .list_characters()
        .await?
        .into_iter()
        .map(CharacterView::from)
        .collect();

    Ok(respond(
        json_response(&characters, accepts_brotli(&headers)).await,
    ))
}

/// Solid/dashed chart traces for one stat across all characters
pub async fn get_timeline(
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let (key, range) = query.resolve()?;
    let stat = query.stat()?;
    let visible = query.visible();

    let timeline = state
        .dashboard_service
        .timeline(&range, stat, visible.as_ref())
        .await?;

    let view = timeline_view(key, &range, stat, timeline);
    Ok(respond(json_response(&view, accepts_brotli(&headers)).await))
}

/// Play sessions, most recent first
pub async fn get_sessions(
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let (_, range) = query.resolve()?;
    let visible = query.visible();

    let sessions: Vec<SessionView> = state
        .dashboard_service
        .sessions(&range, visible.as_ref())
        .await?
        .into_iter()
        .map(SessionView::from)
        .collect();

    Ok(respond(json_response(&sessions, accepts_brotli(&headers)).await))
}
