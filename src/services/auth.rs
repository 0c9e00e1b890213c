//! Auth services - Login y registro contra el backend
//!
//! El gateway no verifica credenciales: las reenvía (con la contraseña en
//! base64, que no es protección criptográfica) y deja la sesión en una
//! cookie legible por el cliente, como espera el dashboard.

use crate::core::{AppError, AppState};
use crate::dtos::{SessionDTO, SignupDTO};
use crate::services::require_field;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderValue, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

const SESSION_MAX_AGE_SECS: u32 = 24 * 60 * 60;

#[instrument(skip(state, body))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    debug!("Processing login");
    // 1. Parsear el body como JSON (un body ilegible es fallo local -> 500)
    // 2. Exigir email y password en el body, 400 sin llamada saliente si faltan
    // 3. Codificar la contraseña en base64 antes de reenviar
    // 4. POST al backend sin token (login no lleva Bearer)
    // 5. Si el backend devolvió un token, dejarlo en una cookie legible por el cliente
    // 6. Reenviar el cuerpo y el estado del backend tal cual

    let body: Value = serde_json::from_slice(&body)?;
    let email = require_field(&body, "email")?
        .as_str()
        .ok_or_else(|| AppError::bad_request("El campo 'email' debe ser texto"))?;
    let password = require_field(&body, "password")?
        .as_str()
        .ok_or_else(|| AppError::bad_request("El campo 'password' debe ser texto"))?;

    let payload = json!({
        "email": email,
        "password": STANDARD.encode(password),
    });

    let relayed = state.backend.post("/login", None, &payload).await?;
    if !relayed.is_success() {
        info!("Backend rejected login with status {}", relayed.status);
        return Ok(relayed.into_response());
    }

    let session = serde_json::from_slice::<SessionDTO>(&relayed.body).ok();
    let mut response = relayed.into_response();
    if let Some(session) = session {
        response
            .headers_mut()
            .append(SET_COOKIE, session_cookie(&session.token)?);
        info!("Login succeeded, session cookie set");
    } else {
        warn!("Login response without token field, no cookie set");
    }
    Ok(response)
}

#[instrument(skip(state, body))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    debug!("Processing signup");
    // 1. Parsear el body y exigir name, email, password y role
    // 2. Validar formato con validator (email, lista blanca de roles)
    // 3. Codificar la contraseña en base64 y reenviar al backend
    // 4. Si el backend ya devuelve sesión, dejar la cookie igual que en login

    let body: Value = serde_json::from_slice(&body)?;
    for field in ["name", "email", "password", "role"] {
        require_field(&body, field)?;
    }

    let dto: SignupDTO = serde_json::from_value(body)?;
    dto.validate().map_err(|e| {
        warn!("Signup validation failed");
        AppError::bad_request(format!("Validación fallida: {e}"))
    })?;

    let payload = json!({
        "name": dto.name,
        "email": dto.email,
        "password": STANDARD.encode(&dto.password),
        "role": dto.role,
    });

    let relayed = state.backend.post("/signup", None, &payload).await?;
    if !relayed.is_success() {
        info!("Backend rejected signup with status {}", relayed.status);
        return Ok(relayed.into_response());
    }

    let session = serde_json::from_slice::<SessionDTO>(&relayed.body).ok();
    let mut response = relayed.into_response();
    if let Some(session) = session {
        response
            .headers_mut()
            .append(SET_COOKIE, session_cookie(&session.token)?);
    }
    info!("Signup relayed successfully");
    Ok(response)
}

// La cookie NO lleva HttpOnly: el dashboard la lee desde el cliente para
// adjuntar el header `token` en cada petición.
fn session_cookie(token: &str) -> Result<HeaderValue, AppError> {
    let cookie = format!(
        "token={}; Path=/; SameSite=Lax; Max-Age={}",
        token, SESSION_MAX_AGE_SECS
    );
    HeaderValue::from_str(&cookie).map_err(|_| {
        warn!("Backend token is not a valid cookie value");
        AppError::internal()
    })
}
