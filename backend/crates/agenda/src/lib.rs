//! Agenda (Tasks & Appointments) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! Handlers are deliberately thin CRUD over the repository; there is no
//! use-case layer here because there would be nothing inside it.
//!
//! ## Security Model
//! - Every route requires a verified bearer token (auth crate's guard)
//! - Mutations prove ownership before touching a resource
//! - Missing and foreign resources are indistinguishable (both 403)

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{AgendaError, AgendaResult};
pub use infra::postgres::PgAgendaRepository;
pub use presentation::router::{appointments_router, tasks_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAgendaRepository as AgendaStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
