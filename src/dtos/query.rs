//! Query DTOs - Data Transfer Objects para parámetros de consulta

use serde::{Deserialize, Serialize};

/// Filtro por evento para la vista de detalle de tarea: los organizadores
/// indican el evento padre; los proveedores no lo necesitan.
#[derive(Serialize, Deserialize, Debug)]
pub struct TaskViewQuery {
    #[serde(default)]
    pub event: Option<String>,
}

/// Filtro por evento para la vista agrupada de cotizaciones.
#[derive(Serialize, Deserialize, Debug)]
pub struct QuotesQuery {
    #[serde(default)]
    pub event: Option<String>,
}
