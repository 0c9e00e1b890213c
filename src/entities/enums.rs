//! Enumeraciones - Tipos enumerados del dominio

use serde::{Deserialize, Serialize};

// ********************* ENUMERACIONES DEL DOMINIO **********************//

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Organizer,
    Provider,
}

impl UserRole {
    /// Los comentarios solo llevan autor organizador o proveedor; un admin
    /// no tiene autor de comentario.
    pub fn as_comment_author(&self) -> Option<CommentAuthor> {
        match self {
            UserRole::Organizer => Some(CommentAuthor::Organizer),
            UserRole::Provider => Some(CommentAuthor::Provider),
            UserRole::Admin => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum EventStatus {
    // el backend serializa el estado con espacio, no sirve rename_all
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "finished")]
    Finished,
    #[serde(rename = "canceled")]
    Canceled,
}

impl EventStatus {
    /// Un evento cancelado o finalizado no admite crear ni editar tareas.
    pub fn allows_task_mutation(&self) -> bool {
        matches!(self, EventStatus::InProgress)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Pending,
    Accepted,
    Rejected,
}

impl QuoteStatus {
    /// Transiciones unidireccionales: solo una cotización pendiente cambia
    /// de estado, y nunca vuelve atrás.
    pub fn can_transition_to(&self, next: &QuoteStatus) -> bool {
        matches!(
            (self, next),
            (QuoteStatus::Pending, QuoteStatus::Accepted)
                | (QuoteStatus::Pending, QuoteStatus::Rejected)
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CommentAuthor {
    Organizer,
    Provider,
}

impl CommentAuthor {
    /// Etiqueta localizada que se muestra en la vista de comentarios.
    pub fn label(&self) -> &'static str {
        match self {
            CommentAuthor::Organizer => "Organizador",
            CommentAuthor::Provider => "Proveedor",
        }
    }

    /// Segmento de ruta que el backend espera en el PATCH de comentarios.
    pub fn path_segment(&self) -> &'static str {
        match self {
            CommentAuthor::Organizer => "organizer",
            CommentAuthor::Provider => "provider",
        }
    }
}
