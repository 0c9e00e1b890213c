//! User services - Relay de la gestión de usuarios (admin)

use crate::core::{AppError, AppState, RelayedResponse, auth::AuthToken};
use crate::services::require_field;
use axum::{
    Extension,
    body::Bytes,
    extract::{Path, State},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

#[instrument(skip(state, token))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
) -> Result<RelayedResponse, AppError> {
    state.backend.get("/user", &token.0).await
}

#[instrument(skip(state, token, body))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    let body: Value = serde_json::from_slice(&body)?;
    require_field(&body, "email")?;
    state.backend.post("/user", Some(&token.0), &body).await
}

#[instrument(skip(state, token, body), fields(user_id = %user_id))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    let body: Value = serde_json::from_slice(&body)?;
    state
        .backend
        .patch(&format!("/user/{user_id}"), &token.0, &body)
        .await
}

#[instrument(skip(state, token), fields(user_id = %user_id))]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path(user_id): Path<String>,
) -> Result<RelayedResponse, AppError> {
    state.backend.delete(&format!("/user/{user_id}"), &token.0).await
}
