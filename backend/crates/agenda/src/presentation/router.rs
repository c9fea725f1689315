//! Agenda Routers

use axum::{
    Router, middleware,
    routing::{get, put},
};
use std::sync::Arc;

use auth::presentation::middleware::{AuthGuardState, require_auth};

use crate::domain::repository::{AppointmentRepository, TaskRepository};
use crate::infra::postgres::PgAgendaRepository;
use crate::presentation::handlers::{self, AgendaAppState};

/// Create the tasks router with PostgreSQL repository
pub fn tasks_router(repo: PgAgendaRepository, guard: AuthGuardState) -> Router {
    tasks_router_generic(repo, guard)
}

/// Create a generic tasks router for any repository implementation
///
/// Every route sits behind the session guard.
pub fn tasks_router_generic<R>(repo: R, guard: AuthGuardState) -> Router
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let state = AgendaAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_tasks::<R>).post(handlers::create_task::<R>),
        )
        .route(
            "/{id}",
            put(handlers::update_task::<R>).delete(handlers::delete_task::<R>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_auth))
        .with_state(state)
}

/// Create the appointments router with PostgreSQL repository
pub fn appointments_router(repo: PgAgendaRepository, guard: AuthGuardState) -> Router {
    appointments_router_generic(repo, guard)
}

/// Create a generic appointments router for any repository implementation
pub fn appointments_router_generic<R>(repo: R, guard: AuthGuardState) -> Router
where
    R: AppointmentRepository + Clone + Send + Sync + 'static,
{
    let state = AgendaAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_appointments::<R>).post(handlers::create_appointment::<R>),
        )
        .route(
            "/{id}",
            put(handlers::update_appointment::<R>).delete(handlers::delete_appointment::<R>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_auth))
        .with_state(state)
}
