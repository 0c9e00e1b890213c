//! Gateway library - expone los módulos principales para los tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod services;

// Re-export de los tipos principales para facilitar el import
pub use core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Extension, Router,
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
};
use services::reference::ReferenceKind;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Crea el router principal de la aplicación
pub fn create_router(state: Arc<AppState>) -> Router {
    use core::token_middleware;
    use services::*;

    let cors = cors_layer(state.allowed_origin.as_deref());

    Router::new()
        .route("/", get(root))
        .nest("/auth", configure_auth_routes())
        .nest("/events", configure_event_routes())
        .nest(
            "/event-types",
            configure_reference_routes(ReferenceKind::Event),
        )
        .nest(
            "/client-types",
            configure_reference_routes(ReferenceKind::Client),
        )
        .nest(
            "/service-types",
            configure_reference_routes(ReferenceKind::Service),
        )
        .route(
            "/reference",
            get(get_reference).layer(middleware::from_fn(token_middleware)),
        )
        .nest("/catalog", configure_catalog_routes())
        .nest("/quotes", configure_quote_routes())
        .nest("/tasks", configure_task_routes())
        .nest("/users", configure_user_routes())
        .nest("/notifications", configure_notification_routes())
        .nest("/profile", configure_profile_routes())
        .nest("/workflow", configure_workflow_routes(state.clone()))
        .layer(cors)
        .with_state(state)
}

/// CORS para el origen del dashboard; sin origen configurado se queda
/// permisivo (desarrollo).
fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    match allowed_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                warn!("Invalid ALLOWED_ORIGIN value, falling back to permissive CORS");
                CorsLayer::permissive()
            }
        },
        None => CorsLayer::permissive(),
    }
}

/// Rutas de autenticación (login, signup): sin header `token`
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/login", post(login_user))
        .route("/signup", post(register_user))
}

/// Rutas de eventos y de las tareas anidadas en su evento
fn configure_event_routes() -> Router<Arc<AppState>> {
    use core::token_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/{event_id}",
            get(get_event).patch(update_event).delete(delete_event),
        )
        .route("/{event_id}/tasks", get(list_event_tasks).post(create_task))
        .route(
            "/{event_id}/tasks/{task_id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route(
            "/{event_id}/tasks/{task_id}/assignee/{provider_id}",
            patch(assign_task),
        )
        .layer(middleware::from_fn(token_middleware))
}

/// Rutas de una lista de referencia; el kind viaja como extension
fn configure_reference_routes(kind: ReferenceKind) -> Router<Arc<AppState>> {
    use core::token_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_reference_types).post(create_reference_type))
        .route(
            "/{type_id}",
            patch(update_reference_type).delete(delete_reference_type),
        )
        .layer(middleware::from_fn(token_middleware))
        .layer(Extension(kind))
}

/// Rutas del catálogo de servicios de un proveedor
fn configure_catalog_routes() -> Router<Arc<AppState>> {
    use core::token_middleware;
    use services::*;

    Router::new()
        .route("/{user_id}", get(list_catalog).post(add_catalog_item))
        .route(
            "/{user_id}/{index}",
            patch(update_catalog_item).delete(delete_catalog_item),
        )
        .layer(middleware::from_fn(token_middleware))
}

/// Rutas de cotizaciones: relay y vista agrupada
fn configure_quote_routes() -> Router<Arc<AppState>> {
    use core::token_middleware;
    use services::*;

    Router::new()
        .route("/", post(create_quote))
        .route("/sent", get(list_sent_quotes))
        .route("/grouped", get(grouped_quotes))
        .route("/event/{event_id}", get(list_event_quotes))
        .route("/{quote_id}/{action}", patch(respond_to_quote))
        .layer(middleware::from_fn(token_middleware))
}

/// Rutas de tareas fuera de un evento (lista asignada del proveedor)
fn configure_task_routes() -> Router<Arc<AppState>> {
    use core::token_middleware;
    use services::*;

    Router::new()
        .route("/assigned", get(list_assigned_tasks))
        .layer(middleware::from_fn(token_middleware))
}

/// Rutas de gestión de usuarios (admin)
fn configure_user_routes() -> Router<Arc<AppState>> {
    use core::token_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{user_id}", patch(update_user).delete(delete_user))
        .layer(middleware::from_fn(token_middleware))
}

fn configure_notification_routes() -> Router<Arc<AppState>> {
    use core::token_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_notifications))
        .layer(middleware::from_fn(token_middleware))
}

fn configure_profile_routes() -> Router<Arc<AppState>> {
    use core::token_middleware;
    use services::*;

    Router::new()
        .route("/", get(get_profile).patch(update_profile))
        .layer(middleware::from_fn(token_middleware))
}

/// Rutas del workflow de tareas: token + claims verificados (el rol sale
/// del JWT, nunca de la URL)
fn configure_workflow_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::{claims_middleware, token_middleware};
    use services::*;

    Router::new()
        .route("/tasks/{task_id}", get(get_task_view))
        .route("/tasks/{task_id}/comments", post(add_task_comment))
        .route("/tasks/{task_id}/files", post(upload_task_file))
        .route("/tasks/{task_id}/files/{file_id}", get(download_task_file))
        .layer(middleware::from_fn_with_state(state, claims_middleware))
        .layer(middleware::from_fn(token_middleware))
}
