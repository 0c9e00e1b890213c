use crate::core::{AppError, AppState};
use crate::entities::UserRole;
use axum::{body::Body, extract::Request, extract::State, http::Response, middleware::Next};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Nombre del header plano que envía el dashboard. El gateway lo traduce a
/// `Authorization: Bearer` al reenviar; nunca lee cookies (el token viaja
/// explícito en cada petición).
pub const TOKEN_HEADER: &str = "token";

/// Token opaco extraído del header `token`, listo para la traducción Bearer.
#[derive(Debug, Clone)]
pub struct AuthToken(pub String);

/// Claims del token emitido por el backend (secreto compartido).
/// El rol viene SIEMPRE de aquí, nunca del texto de la URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

/// Middleware de autenticación: exige el header `token` y lo deja en las
/// extensions como [`AuthToken`]. Sin token -> 401 con el envelope fijo.
#[instrument(skip(req, next))]
pub async fn token_middleware(mut req: Request, next: Next) -> Result<Response<Body>, AppError> {
    debug!("Running token middleware");
    let header = match req.headers().get(TOKEN_HEADER) {
        Some(value) => value,
        None => {
            warn!("Missing token header");
            return Err(AppError::missing_token());
        }
    };

    let token = header.to_str().map_err(|_| {
        warn!("Token header is not valid ASCII");
        AppError::invalid_token()
    })?;

    if token.is_empty() || token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        warn!("Token header is empty or malformed");
        return Err(AppError::invalid_token());
    }

    let auth_token = AuthToken(token.to_string());
    req.extensions_mut().insert(auth_token);
    Ok(next.run(req).await)
}

/// Decodifica y verifica los claims del token con el secreto compartido.
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        warn!("Failed to decode token claims: {:?}", e);
        AppError::invalid_token()
    })
}

/// Middleware para las rutas de workflow: además del token opaco necesita
/// los claims verificados (id de usuario y rol) en las extensions.
#[instrument(skip(state, req, next))]
pub async fn claims_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running claims middleware");
    let token = req
        .extensions()
        .get::<AuthToken>()
        .cloned()
        .ok_or_else(AppError::missing_token)?;

    let claims = decode_claims(&token.0, &state.jwt_secret)?;
    debug!("Claims decoded for user {} with role {:?}", claims.id, claims.role);

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Verifica que el rol del usuario esté entre los permitidos.
///
/// # Returns
/// * `Ok(())` si el rol está permitido
/// * `Err(AppError)` con 403 en caso contrario
pub fn require_role(claims: &Claims, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    if !allowed_roles.contains(&claims.role) {
        warn!(
            "User {} has insufficient role {:?}, required one of: {:?}",
            claims.id, claims.role, allowed_roles
        );
        return Err(AppError::forbidden("Rol sin permisos para esta operación"));
    }
    Ok(())
}
