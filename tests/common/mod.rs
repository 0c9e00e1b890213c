use axum_test::TestServer;
use gestionainador_gateway::core::{AppState, Config};
use std::sync::Arc;

/// Secreto compartido con el backend simulado en los tests.
pub const TEST_JWT_SECRET: &str = "unsecretoparalostestsquenadiedeberiausar";

/// Crea un AppState para los tests
///
/// # Arguments
/// * `backend_url` - URL del backend simulado (wiremock)
///
/// # Returns
/// Arc<AppState> apuntando al backend simulado y con el JWT secret de test
pub fn create_test_state(backend_url: &str) -> Arc<AppState> {
    let config = Config {
        api_base_url: backend_url.trim_end_matches('/').to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        request_timeout_secs: 5,
        allowed_origin: None,
        app_env: "test".to_string(),
    };
    Arc::new(AppState::new(&config).expect("Failed to create app state"))
}

/// Crea un TestServer para los tests
///
/// # Arguments
/// * `state` - AppState a utilizar por el gateway
///
/// # Returns
/// TestServer configurado y listo para ejecutar peticiones
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = gestionainador_gateway::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT de prueba firmado con el secreto compartido
///
/// # Arguments
/// * `user_id` - ID del usuario (el backend usa ids de texto)
/// * `role` - Rol en minúsculas: "organizer", "provider" o "admin"
/// * `jwt_secret` - Secreto con el que firmar
///
/// # Returns
/// Token JWT válido durante 24 horas
pub fn create_test_jwt(user_id: &str, role: &str, jwt_secret: &str) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Claims {
        id: String,
        role: String,
        exp: usize,
        iat: usize,
    }

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        id: user_id.to_string(),
        role: role.to_string(),
        exp: expiration,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("Failed to create JWT token")
}
