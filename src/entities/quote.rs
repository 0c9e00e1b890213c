//! Quote entity - Cotización de un proveedor para un evento

use super::enums::QuoteStatus;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    /// Etiqueta del tipo de servicio; es la clave de agrupación en las vistas.
    pub service_type: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub provider_id: Option<String>,
    pub status: QuoteStatus,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
}
