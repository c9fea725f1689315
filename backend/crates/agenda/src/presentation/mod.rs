//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::AgendaAppState;
pub use router::{
    appointments_router, appointments_router_generic, tasks_router, tasks_router_generic,
};
