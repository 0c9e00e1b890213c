//! Quote services - Relay de cotizaciones y vista agrupada
//!
//! El ciclo de vida de una cotización lo lleva el backend (pendiente pasa a
//! aceptada o rechazada, nunca al revés); aquí solo se disparan los relays
//! y se agrupa para mostrar.

use crate::core::{AppError, AppState, RelayedResponse, auth::AuthToken};
use crate::dtos::{GroupedQuotesDTO, QuoteGroup, QuotesQuery};
use crate::entities::Quote;
use crate::services::require_field;
use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, token, body))]
pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    body: Bytes,
) -> Result<RelayedResponse, AppError> {
    debug!("Relaying quote submission");
    let body: Value = serde_json::from_slice(&body)?;
    require_field(&body, "serviceType")?;
    require_field(&body, "price")?;
    state.backend.post("/quote", Some(&token.0), &body).await
}

/// Cotizaciones recibidas por el organizador para un evento.
#[instrument(skip(state, token), fields(event_id = %event_id))]
pub async fn list_event_quotes(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path(event_id): Path<String>,
) -> Result<RelayedResponse, AppError> {
    state.backend.get(&format!("/quote_O/{event_id}"), &token.0).await
}

/// Cotizaciones enviadas por el proveedor autenticado.
#[instrument(skip(state, token))]
pub async fn list_sent_quotes(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
) -> Result<RelayedResponse, AppError> {
    state.backend.get("/quote_pro", &token.0).await
}

#[instrument(skip(state, token), fields(quote_id = %quote_id, action = %action))]
pub async fn respond_to_quote(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Path((quote_id, action)): Path<(String, String)>,
) -> Result<RelayedResponse, AppError> {
    debug!("Responding to quote");
    // Validar action antes de reenviar; la transición la ejecuta el backend
    match action.as_str() {
        "accept" | "reject" => {}
        _ => {
            warn!("Invalid quote action: {}", action);
            return Err(AppError::bad_request("Action must be 'accept' or 'reject'"));
        }
    }

    state
        .backend
        .patch(
            &format!("/quote/{quote_id}/{action}"),
            &token.0,
            &Value::Object(serde_json::Map::new()),
        )
        .await
}

#[instrument(skip(state, token), fields(event = query.event.as_deref().unwrap_or("-")))]
pub async fn grouped_quotes(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AuthToken>,
    Query(query): Query<QuotesQuery>,
) -> Result<Response, AppError> {
    debug!("Building grouped quote view");
    // 1. Con `event`: cotizaciones recibidas del organizador para ese evento
    //    Sin `event`: cotizaciones enviadas del proveedor
    // 2. Si el backend falló, reenviar su respuesta tal cual
    // 3. Filtrar por evento (el id es texto) y agrupar por etiqueta de tipo

    let relayed = match &query.event {
        Some(event_id) => {
            state
                .backend
                .get(&format!("/quote_O/{event_id}"), &token.0)
                .await?
        }
        None => state.backend.get("/quote_pro", &token.0).await?,
    };

    if !relayed.is_success() {
        debug!("Quote fetch failed with status {}", relayed.status);
        return Ok(relayed.into_response());
    }

    let mut quotes: Vec<Quote> = serde_json::from_slice(&relayed.body)?;
    if let Some(event_id) = &query.event {
        quotes = filter_by_event(quotes, event_id);
    }

    let groups = group_by_service_type(quotes);
    info!("Grouped quotes into {} service types", groups.len());
    Ok(Json(GroupedQuotesDTO { groups }).into_response())
}

/// Se queda solo con las cotizaciones del evento pedido, en el orden de
/// entrada. La comparación es por texto: los ids vienen como cadenas.
fn filter_by_event(quotes: Vec<Quote>, event_id: &str) -> Vec<Quote> {
    quotes
        .into_iter()
        .filter(|quote| quote.event_id.as_deref() == Some(event_id))
        .collect()
}

/// Agrupa por etiqueta de tipo de servicio. Los grupos salen en el orden de
/// primera aparición de cada etiqueta y cada grupo conserva el orden de
/// entrada de sus cotizaciones.
fn group_by_service_type(quotes: Vec<Quote>) -> Vec<QuoteGroup> {
    let mut groups: Vec<QuoteGroup> = Vec::new();
    for quote in quotes {
        match groups.iter_mut().find(|g| g.service_type == quote.service_type) {
            Some(group) => {
                group.count += 1;
                group.quotes.push(quote);
            }
            None => groups.push(QuoteGroup {
                service_type: quote.service_type.clone(),
                count: 1,
                quotes: vec![quote],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quote(id: &str, service_type: &str, event_id: &str) -> Quote {
        serde_json::from_value(json!({
            "id": id,
            "serviceType": service_type,
            "price": 100.0,
            "status": "pending",
            "eventId": event_id
        }))
        .unwrap()
    }

    #[test]
    fn test_grouping_counts_by_service_type() {
        let quotes = vec![
            quote("q-1", "Catering", "1"),
            quote("q-2", "Catering", "1"),
            quote("q-3", "Música", "2"),
        ];

        let groups = group_by_service_type(quotes);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].service_type, "Catering");
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].service_type, "Música");
        assert_eq!(groups[1].count, 1);
    }

    #[test]
    fn test_grouping_preserves_first_appearance_order() {
        let quotes = vec![
            quote("q-1", "Música", "1"),
            quote("q-2", "Catering", "1"),
            quote("q-3", "Música", "1"),
        ];

        let groups = group_by_service_type(quotes);
        assert_eq!(groups[0].service_type, "Música");
        assert_eq!(groups[0].quotes[0].id, "q-1");
        assert_eq!(groups[0].quotes[1].id, "q-3");
        assert_eq!(groups[1].service_type, "Catering");
    }

    #[test]
    fn test_filter_by_event_keeps_matches_in_order() {
        let quotes = vec![
            quote("q-1", "Catering", "1"),
            quote("q-2", "Música", "1"),
            quote("q-3", "Catering", "2"),
        ];

        let filtered = filter_by_event(quotes, "1");
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "q-1");
        assert_eq!(filtered[1].id, "q-2");
    }

    #[test]
    fn test_grouping_empty_list_yields_no_groups() {
        assert!(group_by_service_type(Vec::new()).is_empty());
    }
}
