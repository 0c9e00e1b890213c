//! Cliente HTTP hacia el backend de Gestionainador.
//!
//! Toda petición saliente traduce el token plano del cliente a
//! `Authorization: Bearer` y devuelve el cuerpo y el estado del backend tal
//! cual. Los fallos locales (conexión, timeout, cuerpo ilegible) se vuelven
//! [`AppError`] interno, nunca una respuesta inventada del backend.

use crate::core::coalesce::RequestCoalescer;
use crate::core::error::AppError;
use axum::body::{Body, Bytes};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use reqwest::Method;
use reqwest::multipart::Form;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Respuesta del backend lista para reenviar al cliente: estado, tipo de
/// contenido y cuerpo en crudo. Clonable para que el coalescing pueda
/// repartirla entre peticiones simultáneas.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RelayedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Interpreta el cuerpo como JSON. Un cuerpo ilegible cuenta como fallo
    /// local del gateway, no del backend.
    pub fn json(&self) -> Result<Value, AppError> {
        serde_json::from_slice(&self.body).map_err(AppError::from)
    }
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        if let Some(content_type) = self.content_type {
            if let Ok(value) = HeaderValue::from_str(&content_type) {
                response.headers_mut().insert(header::CONTENT_TYPE, value);
            }
        }
        response
    }
}

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    coalescer: RequestCoalescer<RelayedResponse>,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            coalescer: RequestCoalescer::new(),
        })
    }

    /// GET con coalescing: lecturas idénticas (misma ruta, mismo token) en
    /// vuelo comparten una sola llamada al backend.
    pub async fn get(&self, path: &str, token: &str) -> Result<RelayedResponse, AppError> {
        let key = format!("{path}\n{token}");
        self.coalescer
            .run(&key, || self.send(Method::GET, path, Some(token), None))
            .await
    }

    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: &Value,
    ) -> Result<RelayedResponse, AppError> {
        self.send(Method::POST, path, token, Some(body)).await
    }

    pub async fn patch(
        &self,
        path: &str,
        token: &str,
        body: &Value,
    ) -> Result<RelayedResponse, AppError> {
        self.send(Method::PATCH, path, Some(token), Some(body))
            .await
    }

    pub async fn delete(&self, path: &str, token: &str) -> Result<RelayedResponse, AppError> {
        self.send(Method::DELETE, path, Some(token), None).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        token: &str,
        form: Form,
    ) -> Result<RelayedResponse, AppError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("forwarding multipart POST {}", path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::relay(response).await
    }

    /// GET sin consumir el cuerpo, para descargas que se reenvían en
    /// streaming. No pasa por el coalescing.
    pub async fn download(&self, path: &str, token: &str) -> Result<reqwest::Response, AppError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("forwarding download GET {}", path);
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        Ok(response)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<RelayedResponse, AppError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("forwarding {} {}", method, path);

        let mut request = self.http.request(method, &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::relay(response).await
    }

    async fn relay(response: reqwest::Response) -> Result<RelayedResponse, AppError> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let body = response.bytes().await?;
        Ok(RelayedResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relayed_response_preserves_status_and_content_type() {
        let relayed = RelayedResponse {
            status: 404,
            content_type: Some("application/json".to_string()),
            body: Bytes::from_static(b"{\"message\":{\"code\":\"404\"}}"),
        };
        let response = relayed.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_relayed_response_without_content_type_sets_none() {
        let relayed = RelayedResponse {
            status: 204,
            content_type: None,
            body: Bytes::new(),
        };
        let response = relayed.into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_json_rejects_non_json_body() {
        let relayed = RelayedResponse {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: Bytes::from_static(b"<html>no soy json</html>"),
        };
        assert!(relayed.json().is_err());
    }

    #[test]
    fn test_is_success_bounds() {
        let mut relayed = RelayedResponse {
            status: 200,
            content_type: None,
            body: Bytes::new(),
        };
        assert!(relayed.is_success());
        relayed.status = 299;
        assert!(relayed.is_success());
        relayed.status = 300;
        assert!(!relayed.is_success());
        relayed.status = 199;
        assert!(!relayed.is_success());
    }
}
