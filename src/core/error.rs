//! Error handling - Errores locales con el envelope del backend
//!
//! Los errores de negocio del backend NO pasan por aquí: el relay devuelve
//! su estado y su envelope tal cual. Este tipo cubre solo lo que el gateway
//! genera por sí mismo (401, 400, 403, 404 y el 500 interno).

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

/// Código que el backend usa para indicar éxito dentro del envelope.
pub const CODE_OK: &str = "000";
/// Código reservado para fallos internos del gateway.
pub const CODE_INTERNAL: &str = "999";

/// Envelope de mensajes del backend: `{ message: { code, description } }`.
/// Se usa tanto para los errores generados localmente como para inspeccionar
/// las respuestas reenviadas.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiMessage {
    pub code: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiEnvelope {
    pub message: ApiMessage,
}

pub struct AppError {
    status: StatusCode,
    code: String,
    description: String,
}

impl AppError {
    pub fn new(status: StatusCode, code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            description: description.into(),
        }
    }

    /// Reconstruye un error que viene del backend, conservando su código y
    /// descripción para que el cliente vea el envelope original.
    pub fn relayed(status: StatusCode, message: ApiMessage) -> Self {
        Self {
            status,
            code: message.code,
            description: message.description,
        }
    }

    // Constructores para la taxonomía local (el backend reenvía los suyos tal cual)

    /// 401 con descripción fija: falta el header `token`.
    pub fn missing_token() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "401", "Token no proporcionado")
    }

    /// 401 para tokens presentes pero inválidos (firma, expiración, formato).
    pub fn invalid_token() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "401", "Token inválido")
    }

    /// 400 por campo obligatorio ausente o validación local fallida.
    /// No se emite ninguna llamada al backend en este caso.
    pub fn bad_request(description: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "400", description)
    }

    pub fn forbidden(description: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "403", description)
    }

    pub fn not_found(description: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "404", description)
    }

    /// 500 con el envelope fijo `{code:"999", description:"Error interno"}`.
    /// Cualquier excepción local del reenvío (red, timeout, parseo) termina aquí.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, CODE_INTERNAL, "Error interno")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AppError({} {} {})", self.status, self.code, self.description)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.status, self.code, self.description)
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Forward request failed: {}", err);
        Self::internal()
    }
}

impl From<axum::Error> for AppError {
    fn from(err: axum::Error) -> Self {
        tracing::error!("Request body error: {}", err);
        Self::internal()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON parse error: {}", err);
        Self::internal()
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        tracing::error!("Multipart body error: {}", err);
        Self::internal()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ApiEnvelope {
            message: ApiMessage {
                code: self.code,
                description: self.description,
            },
        });
        (self.status, body).into_response()
    }
}
