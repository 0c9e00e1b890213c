//! Comment entity - Comentario de una tarea

use super::enums::CommentAuthor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub user_type: CommentAuthor,
    pub text: String,
    // el backend envía iso8601; serde lo convierte a DateTime UTC
    pub date: DateTime<Utc>,
}
