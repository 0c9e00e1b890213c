//! Task entity - Tarea de un evento con comentarios y adjuntos

use super::attachment::AttachmentRef;
use super::comment::Comment;
use super::enums::TaskStatus;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub reminder_date: Option<String>,
    #[serde(default)]
    pub completion_date: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub files: Vec<AttachmentRef>,
    // proveedor asignado; el backend exige cotización aceptada en el evento
    #[serde(default)]
    pub provider_id: Option<String>,
}
