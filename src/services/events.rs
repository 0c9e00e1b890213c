//! Event services - Relay del CRUD de eventos

use crate::core::{AppError, AppState, RelayedResponse, auth::AuthToken};
use crate::services::require_field;
use axum::{
    Extension,
    body::Bytes,
    extract::{Path, State},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

#[instrument(skip(state, token))]
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
) -> Result<RelayedResponse, AppError> {
    debug!("Relaying event list");
    state.backend.get("/events", &token.0).await
}

#[instrument(skip(state, token, body))]
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    debug!("Relaying event creation");
    let body: Value = serde_json::from_slice(&body)?;
    require_field(&body, "name")?;
    state.backend.post("/events", Some(&token.0), &body).await
}

#[instrument(skip(state, token), fields(event_id = %event_id))]
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path(event_id): Path<String>,
) -> Result<RelayedResponse, AppError> {
    state.backend.get(&format!("/events/{event_id}"), &token.0).await
}

#[instrument(skip(state, token, body), fields(event_id = %event_id))]
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path(event_id): Path<String>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    let body: Value = serde_json::from_slice(&body)?;
    state
        .backend
        .patch(&format!("/events/{event_id}"), &token.0, &body)
        .await
}

#[instrument(skip(state, token), fields(event_id = %event_id))]
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path(event_id): Path<String>,
) -> Result<RelayedResponse, AppError> {
    state
        .backend
        .delete(&format!("/events/{event_id}"), &token.0)
        .await
}
