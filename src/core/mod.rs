//! Core Module - Componentes de infraestructura del gateway
//!
//! Este módulo contiene los componentes "core" de la aplicación:
//! - Autenticación (header token y claims JWT)
//! - Cliente del backend externo y coalescing de GETs
//! - Configuración
//! - Gestión de errores
//! - Estado compartido

pub mod auth;
pub mod backend;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod state;

// Re-exports para facilitar el import

pub use auth::{AuthToken, Claims, claims_middleware, token_middleware};
pub use backend::{BackendClient, RelayedResponse};
pub use config::Config;
pub use error::{ApiEnvelope, ApiMessage, AppError};
pub use state::AppState;
