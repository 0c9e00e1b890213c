//! Services module - Coordinador de los service handlers HTTP
//!
//! Cada submódulo cubre un recurso del backend. Los handlers de relay hacen
//! exactamente una llamada saliente y devuelven el estado y el cuerpo del
//! backend sin tocarlos; los de workflow componen varias llamadas.

pub mod auth;
pub mod catalog;
pub mod events;
pub mod notifications;
pub mod profile;
pub mod quotes;
pub mod reference;
pub mod task_workflow;
pub mod tasks;
pub mod users;

// Re-exports para facilitar el import
pub use auth::{login_user, register_user};
pub use catalog::{add_catalog_item, delete_catalog_item, list_catalog, update_catalog_item};
pub use events::{create_event, delete_event, get_event, list_events, update_event};
pub use notifications::list_notifications;
pub use profile::{get_profile, update_profile};
pub use quotes::{
    create_quote, grouped_quotes, list_event_quotes, list_sent_quotes, respond_to_quote,
};
pub use reference::{
    create_reference_type, delete_reference_type, get_reference, list_reference_types,
    update_reference_type,
};
pub use task_workflow::{add_task_comment, download_task_file, get_task_view, upload_task_file};
pub use tasks::{
    assign_task, create_task, delete_task, get_task, list_assigned_tasks, list_event_tasks,
    update_task,
};
pub use users::{create_user, delete_user, list_users, update_user};

use crate::core::{AppError, AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde_json::Value;
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Gateway is running!")
}

/// Comprueba que el campo exista y no sea nulo ni una cadena en blanco.
/// Si falta, la petición se corta con 400 sin llamar al backend.
pub(crate) fn require_field<'a>(body: &'a Value, field: &str) -> Result<&'a Value, AppError> {
    let value = body.get(field).filter(|v| !v.is_null());
    match value {
        Some(v) if v.as_str().is_some_and(|s| s.trim().is_empty()) => Err(
            AppError::bad_request(format!("El campo '{field}' no puede estar vacío")),
        ),
        Some(v) => Ok(v),
        None => Err(AppError::bad_request(format!(
            "Falta el campo obligatorio '{field}'"
        ))),
    }
}
