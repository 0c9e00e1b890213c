//! Reference services - Tipos de evento, cliente y servicio
//!
//! Las tres listas de referencia comparten los mismos handlers: cada nest
//! del router inyecta su [`ReferenceKind`] como extension. `GET /reference`
//! junta las tres listas con llamadas concurrentes.

use crate::core::{AppError, AppState, RelayedResponse, auth::AuthToken};
use crate::services::require_field;
use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use futures_util::future::try_join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy)]
pub enum ReferenceKind {
    Event,
    Client,
    Service,
}

impl ReferenceKind {
    /// Ruta del backend; conserva el singular del contrato original.
    fn backend_path(&self) -> &'static str {
        match self {
            ReferenceKind::Event => "/event-type",
            ReferenceKind::Client => "/client-type",
            ReferenceKind::Service => "/service-type",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            ReferenceKind::Event => "eventTypes",
            ReferenceKind::Client => "clientTypes",
            ReferenceKind::Service => "serviceTypes",
        }
    }
}

#[instrument(skip(state, token), fields(kind = ?kind))]
pub async fn list_reference_types(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Extension(kind): Extension<ReferenceKind>,
) -> Result<RelayedResponse, AppError> {
    state.backend.get(kind.backend_path(), &token.0).await
}

#[instrument(skip(state, token, body), fields(kind = ?kind))]
pub async fn create_reference_type(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Extension(kind): Extension<ReferenceKind>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    let body: Value = serde_json::from_slice(&body)?;
    require_field(&body, "name")?;
    state
        .backend
        .post(kind.backend_path(), Some(&token.0), &body)
        .await
}

#[instrument(skip(state, token, body), fields(kind = ?kind, type_id = %type_id))]
pub async fn update_reference_type(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Extension(kind): Extension<ReferenceKind>,
    Path(type_id): Path<String>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    let body: Value = serde_json::from_slice(&body)?;
    state
        .backend
        .patch(&format!("{}/{}", kind.backend_path(), type_id), &token.0, &body)
        .await
}

#[instrument(skip(state, token), fields(kind = ?kind, type_id = %type_id))]
pub async fn delete_reference_type(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Extension(kind): Extension<ReferenceKind>,
    Path(type_id): Path<String>,
) -> Result<RelayedResponse, AppError> {
    state
        .backend
        .delete(&format!("{}/{}", kind.backend_path(), type_id), &token.0)
        .await
}

#[instrument(skip(state, token))]
pub async fn get_reference(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
) -> Result<Response, AppError> {
    debug!("Fetching the three reference lists concurrently");
    // 1. Lanzar los tres GET en paralelo (lecturas independientes)
    // 2. Si alguno falló, reenviar esa respuesta del backend tal cual
    // 3. Combinar las tres listas en un solo objeto para el dashboard

    let kinds = [
        ReferenceKind::Event,
        ReferenceKind::Client,
        ReferenceKind::Service,
    ];

    let responses = try_join_all(kinds.iter().map(|kind| {
        let state = state.clone();
        let token = token.0.clone();
        async move { state.backend.get(kind.backend_path(), &token).await }
    }))
    .await?;

    if let Some(failed) = responses.iter().find(|r| !r.is_success()) {
        debug!("Reference list fetch failed with status {}", failed.status);
        return Ok(failed.clone().into_response());
    }

    let mut combined = serde_json::Map::new();
    for (kind, relayed) in kinds.iter().zip(responses) {
        combined.insert(kind.key().to_string(), relayed.json()?);
    }
    Ok(Json(Value::Object(combined)).into_response())
}
