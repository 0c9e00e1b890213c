//! Catalog services - Catálogo de servicios de un proveedor
//!
//! Los ítems del catálogo no tienen id propio: el backend los direcciona
//! por usuario e índice dentro de la lista.

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

#[instrument(skip(state, token), fields(user_id = %user_id))]
pub async fn list_catalog(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path(user_id): Path<String>,
) -> Result<RelayedResponse, AppError> {
    state.backend.get(&format!("/catalog/{user_id}"), &token.0).await
}

#[instrument(skip(state, token, body), fields(user_id = %user_id))]
pub async fn add_catalog_item(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    let body: Value = serde_json::from_slice(&body)?;
    require_field(&body, "name")?;
    state
        .backend
        .post(&format!("/catalog/{user_id}"), Some(&token.0), &body)
        .await
}

#[instrument(skip(state, token, body), fields(user_id = %user_id, index = %index))]
pub async fn update_catalog_item(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path((user_id, index)): Path<(String, u32)>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    let body: Value = serde_json::from_slice(&body)?;
    state
        .backend
        .patch(&format!("/catalog/{user_id}/{index}"), &token.0, &body)
        .await
}

#[instrument(skip(state, token), fields(user_id = %user_id, index = %index))]
pub async fn delete_catalog_item(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path((user_id, index)): Path<(String, u32)>,
) -> Result<RelayedResponse, AppError> {
    state
        .backend
        .delete(&format!("/catalog/{user_id}/{index}"), &token.0)
        .await
}
