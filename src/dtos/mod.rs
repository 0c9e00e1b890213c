//! DTOs module - Data Transfer Objects
//!
//! Este módulo contiene los DTOs de la comunicación con el dashboard. Los
//! DTOs separan la representación externa (API del gateway) de la
//! representación interna (entities del backend).

pub mod auth;
pub mod query;
pub mod quote_view;
pub mod task_view;

// Re-exports para facilitar el import
pub use auth::{SessionDTO, SignupDTO};
pub use query::{QuotesQuery, TaskViewQuery};
pub use quote_view::{GroupedQuotesDTO, QuoteGroup};
pub use task_view::{CommentViewDTO, TaskViewDTO};
