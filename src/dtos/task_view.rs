//! Task view DTOs - Estado de una tarea listo para mostrar

use crate::entities::{AttachmentRef, Comment, Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comentario con el autor ya resuelto a etiqueta localizada.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentViewDTO {
    pub author_label: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

impl From<Comment> for CommentViewDTO {
    fn from(value: Comment) -> Self {
        Self {
            author_label: value.user_type.label().to_string(),
            text: value.text,
            date: value.date,
        }
    }
}

/// Struct para la vista de detalle de una tarea. Los comentarios y adjuntos
/// conservan el orden en que el backend los devuelve.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaskViewDTO {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub creation_date: Option<String>,
    pub due_date: Option<String>,
    pub reminder_date: Option<String>,
    pub completion_date: Option<String>,
    pub status: TaskStatus,
    pub provider_id: Option<String>,
    pub comments: Vec<CommentViewDTO>,
    pub files: Vec<AttachmentRef>,
}

impl From<Task> for TaskViewDTO {
    fn from(value: Task) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            creation_date: value.creation_date,
            due_date: value.due_date,
            reminder_date: value.reminder_date,
            completion_date: value.completion_date,
            status: value.status,
            provider_id: value.provider_id,
            comments: value.comments.into_iter().map(CommentViewDTO::from).collect(),
            files: value.files,
        }
    }
}
