//! Notification services - Relay de las notificaciones del usuario

use crate::core::{AppError, AppState, RelayedResponse, auth::AuthToken};
use axum::{Extension, extract::State};
use std::sync::Arc;
use tracing::instrument;

#[instrument(skip(state, token))]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
) -> Result<RelayedResponse, AppError> {
    state.backend.get("/notification", &token.0).await
}
