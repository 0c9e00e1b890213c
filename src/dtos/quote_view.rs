//! Quote view DTOs - Cotizaciones agrupadas por tipo de servicio

use crate::entities::Quote;
use serde::{Deserialize, Serialize};

/// Un grupo de cotizaciones bajo la misma etiqueta de tipo de servicio.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuoteGroup {
    pub service_type: String,
    pub count: usize,
    pub quotes: Vec<Quote>,
}

/// Respuesta de la vista agrupada. Los grupos aparecen en el orden de la
/// primera aparición de cada etiqueta; no hay agregación numérica más allá
/// del conteo (los porcentajes los calcula el backend).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GroupedQuotesDTO {
    pub groups: Vec<QuoteGroup>,
}
