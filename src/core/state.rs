//! Estado compartido de la aplicación.

use crate::core::backend::BackendClient;
use crate::core::config::Config;
use crate::core::error::AppError;

pub struct AppState {
    pub backend: BackendClient,
    pub jwt_secret: String,
    pub allowed_origin: Option<String>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            backend: BackendClient::new(&config.api_base_url, config.request_timeout_secs)?,
            jwt_secret: config.jwt_secret.clone(),
            allowed_origin: config.allowed_origin.clone(),
        })
    }
}
