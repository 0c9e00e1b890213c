//! Task workflow services - Detalle de tarea, comentarios y adjuntos
//!
//! Una sola implementación parametrizada por rol: el organizador llega a la
//! tarea a través de su evento padre y el proveedor a través de su lista de
//! tareas asignadas. El rol sale siempre de los claims verificados, nunca
//! de la URL. Tras cada mutación se relee la tarea completa y se devuelve
//! la vista refrescada; no hay actualización incremental.

use crate::core::{
    AppError, AppState, RelayedResponse,
    auth::{AuthToken, Claims, require_role},
    error::ApiEnvelope,
};
use crate::dtos::{TaskViewDTO, TaskViewQuery};
use crate::entities::{CommentAuthor, Event, EventStatus, Task, UserRole};
use axum::{
    Extension, Json,
    body::{Body, Bytes},
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

struct LocatedTask {
    task: Task,
    // solo el camino del organizador conoce el evento padre
    event_status: Option<EventStatus>,
}

#[instrument(skip(state, token, claims), fields(user_id = %claims.id, role = ?claims.role, task_id = %task_id))]
pub async fn get_task_view(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Extension(claims): Extension<Claims>,
    Path(task_id): Path<String>,
    Query(query): Query<TaskViewQuery>,
) -> Result<Json<TaskViewDTO>, AppError> {
    debug!("Fetching task view");
    let author = comment_author(&claims)?;
    let located = locate_task(&state, &token.0, &author, &task_id, query.event.as_deref()).await?;
    Ok(Json(TaskViewDTO::from(located.task)))
}

#[instrument(skip(state, token, claims, body), fields(user_id = %claims.id, role = ?claims.role, task_id = %task_id))]
pub async fn add_task_comment(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Extension(claims): Extension<Claims>,
    Path(task_id): Path<String>,
    Query(query): Query<TaskViewQuery>,
    body: Bytes,
) -> Result<Json<TaskViewDTO>, AppError> {
    debug!("Adding comment to task");
    // 1. Resolver el autor desde los claims verificados (un admin no comenta)
    // 2. Rechazar texto vacío o solo espacios sin llamar al backend
    // 3. Localizar la tarea y comprobar que el evento admita cambios
    // 4. PATCH con el sufijo de rol y el texto recortado
    // 5. Releer la tarea completa y devolver la vista refrescada

    let author = comment_author(&claims)?;

    let body: Value = serde_json::from_slice(&body)?;
    let text = body
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");
    if text.is_empty() {
        warn!("Empty comment rejected before any backend call");
        return Err(AppError::bad_request("El comentario no puede estar vacío"));
    }

    let located = locate_task(&state, &token.0, &author, &task_id, query.event.as_deref()).await?;
    ensure_event_allows_changes(&located)?;

    let path = format!("/tasks/{}/comments/{}", task_id, author.path_segment());
    let relayed = state
        .backend
        .patch(&path, &token.0, &json!({ "text": text }))
        .await?;
    if !relayed.is_success() {
        return Err(relay_failure(&relayed));
    }

    let refreshed = locate_task(&state, &token.0, &author, &task_id, query.event.as_deref()).await?;
    info!("Comment added, returning refreshed task view");
    Ok(Json(TaskViewDTO::from(refreshed.task)))
}

#[instrument(skip(state, token, claims, multipart), fields(user_id = %claims.id, role = ?claims.role, task_id = %task_id))]
pub async fn upload_task_file(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Extension(claims): Extension<Claims>,
    Path(task_id): Path<String>,
    Query(query): Query<TaskViewQuery>,
    mut multipart: Multipart,
) -> Result<Json<TaskViewDTO>, AppError> {
    debug!("Uploading file to task");
    // 1. Resolver el autor desde los claims verificados
    // 2. Leer el multipart y exigir la parte `file`; sin archivo no hay llamada
    // 3. Localizar la tarea y comprobar que el evento admita cambios
    // 4. Reenviar el multipart al endpoint de la tarea
    // 5. Releer la tarea completa y devolver la vista refrescada

    let author = comment_author(&claims)?;

    let mut file_part: Option<(String, String, Bytes)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("archivo").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await?;
            file_part = Some((file_name, content_type, data));
            break;
        }
    }
    let (file_name, content_type, data) = file_part.ok_or_else(|| {
        warn!("Upload without file part rejected before any backend call");
        AppError::bad_request("Debes seleccionar un archivo")
    })?;

    let located = locate_task(&state, &token.0, &author, &task_id, query.event.as_deref()).await?;
    ensure_event_allows_changes(&located)?;

    let part = reqwest::multipart::Part::bytes(data.to_vec())
        .file_name(file_name)
        .mime_str(&content_type)?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let relayed = state
        .backend
        .post_multipart(&format!("/tasks/{task_id}/files"), &token.0, form)
        .await?;
    if !relayed.is_success() {
        return Err(relay_failure(&relayed));
    }

    let refreshed = locate_task(&state, &token.0, &author, &task_id, query.event.as_deref()).await?;
    info!("File uploaded, returning refreshed task view");
    Ok(Json(TaskViewDTO::from(refreshed.task)))
}

#[instrument(skip(state, token, claims), fields(user_id = %claims.id, task_id = %task_id, file_id = %file_id))]
pub async fn download_task_file(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Extension(claims): Extension<Claims>,
    Path((task_id, file_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    debug!("Streaming task file download");
    require_role(&claims, &[UserRole::Organizer, UserRole::Provider])?;

    let upstream = state
        .backend
        .download(&format!("/tasks/{task_id}/files/{file_id}"), &token.0)
        .await?;

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    // passthrough de los headers del archivo, sin tocar el resto
    for header in ["content-type", "content-disposition"] {
        if let Some(value) = upstream.headers().get(header).and_then(|v| v.to_str().ok()) {
            builder = builder.header(header, value);
        }
    }

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|_| AppError::internal())
}

fn comment_author(claims: &Claims) -> Result<CommentAuthor, AppError> {
    claims.role.as_comment_author().ok_or_else(|| {
        warn!("Admin tried to use the task workflow");
        AppError::forbidden("El workflow de tareas es solo para organizadores y proveedores")
    })
}

fn ensure_event_allows_changes(located: &LocatedTask) -> Result<(), AppError> {
    if let Some(status) = &located.event_status {
        if !status.allows_task_mutation() {
            warn!("Task change rejected: event status {:?}", status);
            return Err(AppError::bad_request(
                "El evento no admite cambios en sus tareas",
            ));
        }
    }
    Ok(())
}

/// Localiza la tarea con el camino propio de cada rol y búsqueda lineal
/// (las listas son cortas). Tarea ausente -> 404.
async fn locate_task(
    state: &AppState,
    token: &str,
    author: &CommentAuthor,
    task_id: &str,
    event_id: Option<&str>,
) -> Result<LocatedTask, AppError> {
    match author {
        CommentAuthor::Organizer => {
            let event_id = event_id.ok_or_else(|| {
                warn!("Organizer task lookup without event parameter");
                AppError::bad_request("Falta el parámetro 'event' del evento padre")
            })?;

            let relayed = state.backend.get(&format!("/events/{event_id}"), token).await?;
            if !relayed.is_success() {
                return Err(relay_failure(&relayed));
            }

            let event: Event = serde_json::from_slice(&relayed.body)?;
            let task = event
                .tasks
                .iter()
                .find(|t| t.id == task_id)
                .cloned()
                .ok_or_else(|| {
                    warn!("Task not present in parent event");
                    AppError::not_found("Tarea no encontrada en el evento")
                })?;

            Ok(LocatedTask {
                task,
                event_status: Some(event.status),
            })
        }
        CommentAuthor::Provider => {
            let relayed = state.backend.get("/task/provider", token).await?;
            if !relayed.is_success() {
                return Err(relay_failure(&relayed));
            }

            let tasks: Vec<Task> = serde_json::from_slice(&relayed.body)?;
            let task = tasks.into_iter().find(|t| t.id == task_id).ok_or_else(|| {
                warn!("Task not in provider's assigned list");
                AppError::not_found("Tarea no asignada al proveedor")
            })?;

            Ok(LocatedTask {
                task,
                event_status: None,
            })
        }
    }
}

/// Convierte una respuesta fallida del backend en AppError conservando su
/// envelope; si el cuerpo no trae envelope se degrada a una descripción fija.
fn relay_failure(relayed: &RelayedResponse) -> AppError {
    let status =
        StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match serde_json::from_slice::<ApiEnvelope>(&relayed.body) {
        Ok(envelope) => AppError::relayed(status, envelope.message),
        Err(_) => AppError::new(status, status.as_u16().to_string(), "Error del backend"),
    }
}
