//! Profile services - Relay del perfil del usuario autenticado

use crate::core::{AppError, AppState, RelayedResponse, auth::AuthToken};
use axum::{Extension, body::Bytes, extract::State};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

#[instrument(skip(state, token))]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
) -> Result<RelayedResponse, AppError> {
    state.backend.get("/profile", &token.0).await
}

#[instrument(skip(state, token, body))]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    let body: Value = serde_json::from_slice(&body)?;
    state.backend.patch("/profile", &token.0, &body).await
}
