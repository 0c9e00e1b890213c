//! Event entity - Entidad evento con sus servicios y tareas anidados

use super::enums::EventStatus;
use super::service::Service;
use super::task::Task;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    // las fechas viajan como texto; el backend es quien las interpreta
    #[serde(default)]
    pub date: Option<String>,
    // renombrado porque type es palabra reservada
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    pub status: EventStatus,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}
