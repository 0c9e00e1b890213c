//! Entities module - Entidades del dominio
//!
//! Modelos serde del JSON que posee el backend externo. El gateway no
//! persiste nada: estas entidades existen para los flujos que necesitan
//! mirar dentro de la respuesta (workflow de tareas, agrupación de
//! cotizaciones); las rutas de relay puro tratan el cuerpo como JSON opaco.

pub mod attachment;
pub mod comment;
pub mod enums;
pub mod event;
pub mod quote;
pub mod service;
pub mod task;
pub mod user;

// Re-exports para facilitar el import
pub use attachment::AttachmentRef;
pub use comment::Comment;
pub use enums::{CommentAuthor, EventStatus, QuoteStatus, TaskStatus, UserRole};
pub use event::Event;
pub use quote::Quote;
pub use service::Service;
pub use task::Task;
pub use user::User;
