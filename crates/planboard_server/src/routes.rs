//! HTTP routes for the goals, notes and events collections.
//!
//! # Invariants
//! - Bodies must be JSON objects; anything else is a 400.
//! - Query strings never fail on repeated keys; the first value wins.
//! - The collections lock is taken after parsing and released before the
//!   response is built; no handler awaits while holding it.

use crate::error::ApiError;
use crate::state::{AppState, Collections};
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use log::debug;
use planboard_core::{
    EventRange, EventService, GoalPatch, GoalService, NewEvent, NewGoal, NewNote, NoteService,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::MutexGuard;
use tower_http::cors::{Any, CorsLayer};

/// Decoded query string. Repeated keys keep their first value.
#[derive(Debug, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

#[derive(Debug, Serialize)]
struct SuccessBody {
    success: bool,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    version: &'static str,
}

/// Builds the application router over `state`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route(
            "/goals",
            get(list_goals)
                .post(create_goal)
                .patch(update_goal)
                .delete(delete_goal),
        )
        .route("/notes", get(list_notes).post(create_note).delete(delete_note))
        .route("/events", get(list_events).post(create_event))
        .with_state(state)
        .layer(cors)
}

async fn health() -> impl IntoResponse {
    Json(HealthBody {
        status: "ok",
        version: planboard_core::core_version(),
    })
}

async fn list_goals(
    State(state): State<AppState>,
    query: RawQuery,
) -> Result<impl IntoResponse, ApiError> {
    let query = query_params(query)?;
    let completed = query.first("completed").map(|value| value == "true");
    let mut collections = lock(&state)?;
    let goals = GoalService::new(&mut *collections.goals).list_goals(completed)?;
    debug!("event=goals_list module=http status=ok count={}", goals.len());
    Ok(Json(goals))
}

async fn create_goal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: NewGoal = parse_object(&body)?;
    let mut collections = lock(&state)?;
    let goal = GoalService::new(&mut *collections.goals).create_goal(request)?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn update_goal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let patch: GoalPatch = parse_object(&body)?;
    let mut collections = lock(&state)?;
    let goal = GoalService::new(&mut *collections.goals).update_goal(patch)?;
    Ok(Json(goal))
}

async fn delete_goal(
    State(state): State<AppState>,
    query: RawQuery,
) -> Result<impl IntoResponse, ApiError> {
    let query = query_params(query)?;
    let id = query.first("id").unwrap_or_default();
    let mut collections = lock(&state)?;
    GoalService::new(&mut *collections.goals).delete_goal(id)?;
    Ok(Json(SuccessBody { success: true }))
}

async fn list_notes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let mut collections = lock(&state)?;
    let notes = NoteService::new(&mut *collections.notes).list_notes()?;
    debug!("event=notes_list module=http status=ok count={}", notes.len());
    Ok(Json(notes))
}

async fn create_note(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: NewNote = parse_object(&body)?;
    let mut collections = lock(&state)?;
    let note = NoteService::new(&mut *collections.notes).create_note(request)?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn delete_note(
    State(state): State<AppState>,
    query: RawQuery,
) -> Result<impl IntoResponse, ApiError> {
    let query = query_params(query)?;
    let id = query.first("id").unwrap_or_default();
    let mut collections = lock(&state)?;
    NoteService::new(&mut *collections.notes).delete_note(id)?;
    Ok(Json(SuccessBody { success: true }))
}

async fn list_events(
    State(state): State<AppState>,
    query: RawQuery,
) -> Result<impl IntoResponse, ApiError> {
    let query = query_params(query)?;
    let range = EventRange::from_bounds(query.first("startDate"), query.first("endDate"))?;
    let mut collections = lock(&state)?;
    let events = EventService::new(&mut *collections.events).list_events(range)?;
    debug!("event=events_list module=http status=ok count={}", events.len());
    Ok(Json(events))
}

async fn create_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: NewEvent = parse_object(&body)?;
    let mut collections = lock(&state)?;
    let event = EventService::new(&mut *collections.events).create_event(request)?;
    Ok((StatusCode::CREATED, Json(event)))
}

fn lock(state: &AppState) -> Result<MutexGuard<'_, Collections>, ApiError> {
    state
        .lock()
        .map_err(|_| ApiError::Internal("collections lock poisoned".to_string()))
}

fn query_params(query: RawQuery) -> Result<QueryParams, ApiError> {
    let Query(pairs) = query.map_err(|rejection| {
        debug!("event=query_parse module=http status=rejected error={rejection}");
        ApiError::invalid_query()
    })?;
    Ok(QueryParams { pairs })
}

/// Decodes a JSON object body; arrays, scalars and malformed JSON are rejected.
fn parse_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| ApiError::invalid_body())?;
    if !value.is_object() {
        return Err(ApiError::invalid_body());
    }
    serde_json::from_value(value).map_err(|_| ApiError::invalid_body())
}
