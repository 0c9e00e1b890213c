//! Service entity - Servicio solicitado dentro de un evento

use super::quote::Quote;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    // renombrado porque type es palabra reservada
    #[serde(default, rename = "type")]
    pub service_type: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    // presente solo cuando el servicio ya tiene cotización asociada
    #[serde(default)]
    pub quote: Option<Quote>,
}
