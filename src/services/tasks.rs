//! Task services - Relay del CRUD de tareas de un evento
//!
//! Las rutas reenvían un solo segmento `tasks` por llamada; el backend es
//! quien aplica las reglas de estado del evento y de asignación.

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

#[instrument(skip(state, token), fields(event_id = %event_id))]
pub async fn list_event_tasks(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path(event_id): Path<String>,
) -> Result<RelayedResponse, AppError> {
    state
        .backend
        .get(&format!("/events/{event_id}/tasks"), &token.0)
        .await
}

#[instrument(skip(state, token, body), fields(event_id = %event_id))]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path(event_id): Path<String>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    debug!("Relaying task creation");
    let body: Value = serde_json::from_slice(&body)?;
    require_field(&body, "name")?;
    state
        .backend
        .post(&format!("/events/{event_id}/tasks"), Some(&token.0), &body)
        .await
}

#[instrument(skip(state, token), fields(event_id = %event_id, task_id = %task_id))]
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path((event_id, task_id)): Path<(String, String)>,
) -> Result<RelayedResponse, AppError> {
    state
        .backend
        .get(&format!("/events/{event_id}/tasks/{task_id}"), &token.0)
        .await
}

#[instrument(skip(state, token, body), fields(event_id = %event_id, task_id = %task_id))]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path((event_id, task_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    let body: Value = serde_json::from_slice(&body)?;
    state
        .backend
        .patch(&format!("/events/{event_id}/tasks/{task_id}"), &token.0, &body)
        .await
}

#[instrument(skip(state, token), fields(event_id = %event_id, task_id = %task_id))]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path((event_id, task_id)): Path<(String, String)>,
) -> Result<RelayedResponse, AppError> {
    state
        .backend
        .delete(&format!("/events/{event_id}/tasks/{task_id}"), &token.0)
        .await
}

/// Tareas asignadas al proveedor autenticado; el backend resuelve el
/// proveedor a partir del Bearer.
#[instrument(skip(state, token))]
pub async fn list_assigned_tasks(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
) -> Result<RelayedResponse, AppError> {
    state.backend.get("/task/provider", &token.0).await
}

/// El backend exige que el proveedor asignado tenga una cotización aceptada
/// en el evento; aquí solo se reenvía.
#[instrument(skip(state, token), fields(event_id = %event_id, task_id = %task_id, provider_id = %provider_id))]
pub async fn assign_task(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path((event_id, task_id, provider_id)): Path<(String, String, String)>,
) -> Result<RelayedResponse, AppError> {
    debug!("Relaying task assignment");
    state
        .backend
        .patch(
            &format!("/events/{event_id}/tasks/{task_id}/assignee/{provider_id}"),
            &token.0,
            &Value::Object(serde_json::Map::new()),
        )
        .await
}
