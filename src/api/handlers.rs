use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{MediaRecord, Side};
use crate::services::{title_search, MatchResult, MatchSession, SelectionSlot, SlotPhase};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryTextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub media_id: i64,
}

/// One row of an autocomplete list
#[derive(Debug, Serialize)]
pub struct SuggestionView {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
}

impl From<&MediaRecord> for SuggestionView {
    fn from(record: &MediaRecord) -> Self {
        Self {
            id: record.id,
            title: record.short_title(),
            image: record.thumbnail().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SelectionView {
    pub id: i64,
    pub title: String,
    pub genres: Vec<String>,
    pub poster: Option<String>,
}

impl From<&MediaRecord> for SelectionView {
    fn from(record: &MediaRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.romaji.clone(),
            genres: record.genres.clone(),
            poster: record.poster().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlotView {
    pub side: Side,
    pub phase: SlotPhase,
    pub query_text: String,
    pub suggestions: Vec<SuggestionView>,
    pub selection: Option<SelectionView>,
    /// Committed poster, or the placeholder while nothing is committed
    pub poster: String,
}

impl SlotView {
    fn new(slot: &SelectionSlot, placeholder_image_url: &str) -> Self {
        let selection = slot.committed().map(SelectionView::from);
        let poster = selection
            .as_ref()
            .and_then(|s| s.poster.clone())
            .unwrap_or_else(|| placeholder_image_url.to_string());

        Self {
            side: slot.side(),
            phase: slot.phase(),
            query_text: slot.query_text().to_string(),
            suggestions: slot.suggestions().iter().map(SuggestionView::from).collect(),
            selection,
            poster,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CandidateView {
    pub id: i64,
    pub romaji: String,
    pub native: Option<String>,
    pub english: Option<String>,
    pub season_year: Option<i32>,
    pub image: Option<String>,
    pub genres: Vec<String>,
}

impl From<&MediaRecord> for CandidateView {
    fn from(record: &MediaRecord) -> Self {
        Self {
            id: record.id,
            romaji: record.title.romaji.clone(),
            native: record.title.native.clone(),
            english: record.title.english.clone(),
            season_year: record.season_year,
            image: record.poster().map(str::to_string),
            genres: record.genres.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchView {
    pub genres: Vec<String>,
    pub cursor: usize,
    pub total: usize,
    pub has_more: bool,
    pub current: CandidateView,
    pub resolved_at: DateTime<Utc>,
}

impl From<&MatchResult> for MatchView {
    fn from(result: &MatchResult) -> Self {
        Self {
            genres: result.genres().to_vec(),
            cursor: result.cursor(),
            total: result.candidates().len(),
            has_more: result.has_more(),
            current: CandidateView::from(result.current()),
            resolved_at: result.resolved_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub left: SlotView,
    pub right: SlotView,
    #[serde(rename = "match")]
    pub latest_match: Option<MatchView>,
}

impl SessionView {
    fn new(session: &MatchSession, placeholder_image_url: &str) -> Self {
        Self {
            id: session.id(),
            created_at: session.created_at(),
            left: SlotView::new(session.slot(Side::Left), placeholder_image_url),
            right: SlotView::new(session.slot(Side::Right), placeholder_image_url),
            latest_match: session.latest_match().map(MatchView::from),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Stateless anime search by name
pub async fn search_anime(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<SuggestionView>>> {
    tracing::debug!(request_id = %request_id, query = %params.q, "Anime search");

    let results = title_search::search_anime(state.catalog.clone(), &params.q).await?;
    Ok(Json(results.iter().map(SuggestionView::from).collect()))
}

/// Mounts a new match screen
pub async fn create_session(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> (StatusCode, Json<SessionView>) {
    let session = MatchSession::new();
    let response = SessionView::new(&session, &state.placeholder_image_url);

    let mut inner = state.inner.write().await;
    let pruned = inner.prune_idle(Utc::now(), state.session_idle_timeout);
    inner.sessions.insert(session.id(), session);

    tracing::info!(
        request_id = %request_id,
        session_id = %response.id,
        sessions = inner.sessions.len(),
        pruned,
        "Session created"
    );

    (StatusCode::CREATED, Json(response))
}

/// Current state of a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    let inner = state.inner.read().await;
    let session = inner.session(id)?;
    Ok(Json(SessionView::new(session, &state.placeholder_image_url)))
}

/// Drops a session
pub async fn delete_session(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let mut inner = state.inner.write().await;
    inner
        .sessions
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {}", id)))?;

    tracing::info!(request_id = %request_id, session_id = %id, "Session deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Input text of one slot changed
///
/// Catalog failures are not reported here; the slot just shows no suggestions.
pub async fn update_query(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((id, side)): Path<(Uuid, Side)>,
    Json(request): Json<QueryTextRequest>,
) -> AppResult<Json<SlotView>> {
    let ticket = {
        let mut inner = state.inner.write().await;
        inner.session_mut(id)?.slot_mut(side).begin_search(&request.text)
    };

    if let Some(ticket) = ticket {
        let result = state.catalog.search_by_name(&ticket.query).await;

        let mut inner = state.inner.write().await;
        let applied = inner
            .session_mut(id)?
            .slot_mut(side)
            .apply_search(ticket.seq, result);

        tracing::debug!(
            request_id = %request_id,
            session_id = %id,
            side = %side,
            seq = ticket.seq,
            applied,
            "Slot search finished"
        );
    }

    let inner = state.inner.read().await;
    let slot = inner.session(id)?.slot(side);
    Ok(Json(SlotView::new(slot, &state.placeholder_image_url)))
}

/// A suggestion was chosen in one slot
pub async fn choose_suggestion(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((id, side)): Path<(Uuid, Side)>,
    Json(request): Json<SelectionRequest>,
) -> AppResult<Json<SlotView>> {
    let mut inner = state.inner.write().await;
    let slot = inner.session_mut(id)?.slot_mut(side);
    let record = slot.choose_suggestion(request.media_id)?;

    tracing::info!(
        request_id = %request_id,
        session_id = %id,
        side = %side,
        media_id = record.id,
        "Suggestion chosen"
    );

    Ok(Json(SlotView::new(slot, &state.placeholder_image_url)))
}

/// Intersects both selections and ranks the matching anime
pub async fn trigger_match(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MatchView>> {
    let (left, right) = {
        let mut inner = state.inner.write().await;
        inner.session_mut(id)?.begin_match()
    };

    tracing::info!(
        request_id = %request_id,
        session_id = %id,
        left = ?left.as_ref().map(|r| r.id),
        right = ?right.as_ref().map(|r| r.id),
        "Resolving match"
    );

    let outcome = state.resolver.resolve(left.as_ref(), right.as_ref()).await;

    let mut inner = state.inner.write().await;
    let result = inner.session_mut(id)?.finish_match(outcome)?;
    Ok(Json(MatchView::from(result)))
}

/// Moves to the next candidate of the latest match
pub async fn advance_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MatchView>> {
    let mut inner = state.inner.write().await;
    let result = inner.session_mut(id)?.advance()?;
    Ok(Json(MatchView::from(result)))
}
