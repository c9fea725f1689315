//! HTTP Handlers
//!
//! Thin CRUD: validate, check ownership, delegate to the repository.
//! The session guard has already resolved the caller's identity.

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use auth::presentation::middleware::AuthenticatedUser;

use crate::domain::entity::{appointment::Appointment, task::Task};
use crate::domain::repository::{AppointmentRepository, TaskRepository};
use crate::domain::value_object::{
    appointment_id::AppointmentId, task_id::TaskId, task_priority::TaskPriority,
    task_status::TaskStatus,
};
use crate::error::{AgendaError, AgendaResult};
use crate::presentation::dto::{
    AppointmentPayload, AppointmentResponse, MessageResponse, TaskPayload, TaskResponse,
};

/// Shared state for agenda handlers
///
/// Each handler bounds `R` by just the repository trait it uses, so the
/// shared method names of the two traits never collide.
#[derive(Clone)]
pub struct AgendaAppState<R> {
    pub repo: Arc<R>,
}

// ============================================================================
// Tasks
// ============================================================================

/// GET /tasks
pub async fn list_tasks<R>(
    State(state): State<AgendaAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
) -> AgendaResult<Json<Vec<TaskResponse>>>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let tasks = state.repo.list_by_owner(&current.user_id).await?;

    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// POST /tasks
pub async fn create_task<R>(
    State(state): State<AgendaAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(payload): Json<TaskPayload>,
) -> AgendaResult<impl IntoResponse>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let (title, notes, deadline, status, priority) = validate_task_payload(payload)?;

    let task = Task::new(current.user_id, title, notes, deadline, status, priority);

    state.repo.create(&task).await?;

    tracing::info!(task_id = %task.task_id, owner_id = %task.owner_id, "Task created");

    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// PUT /tasks/{id}
pub async fn update_task<R>(
    State(state): State<AgendaAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TaskPayload>,
) -> AgendaResult<Json<TaskResponse>>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let (title, notes, deadline, status, priority) = validate_task_payload(payload)?;

    let task_id = TaskId::from_uuid(id);

    // Ownership check before any mutation; missing and foreign both 403
    let mut task = state
        .repo
        .find_by_id(&task_id)
        .await?
        .filter(|t| t.is_owned_by(&current.user_id))
        .ok_or(AgendaError::NotAuthorized)?;

    task.apply_update(title, notes, deadline, status, priority);

    state.repo.update(&task).await?;

    Ok(Json(TaskResponse::from(&task)))
}

/// DELETE /tasks/{id}
pub async fn delete_task<R>(
    State(state): State<AgendaAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> AgendaResult<Json<MessageResponse>>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let task_id = TaskId::from_uuid(id);

    let task = state
        .repo
        .find_by_id(&task_id)
        .await?
        .filter(|t| t.is_owned_by(&current.user_id))
        .ok_or(AgendaError::NotAuthorized)?;

    state.repo.delete(&task.task_id).await?;

    tracing::info!(task_id = %task.task_id, "Task deleted");

    Ok(Json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}

/// Validate a task payload, naming every missing field at once
fn validate_task_payload(
    payload: TaskPayload,
) -> AgendaResult<(
    String,
    Option<String>,
    DateTime<Utc>,
    TaskStatus,
    TaskPriority,
)> {
    let title = payload.title.filter(|t| !t.trim().is_empty());

    let mut missing = Vec::new();
    if title.is_none() {
        missing.push("title".to_string());
    }
    if payload.deadline.is_none() {
        missing.push("deadline".to_string());
    }
    if payload.status.is_none() {
        missing.push("status".to_string());
    }
    if payload.priority.is_none() {
        missing.push("priority".to_string());
    }

    let (Some(title), Some(deadline), Some(status), Some(priority)) =
        (title, payload.deadline, payload.status, payload.priority)
    else {
        return Err(AgendaError::MissingFields(missing));
    };

    let status = TaskStatus::from_code(&status)
        .ok_or_else(|| AgendaError::Validation(format!("Unknown task status: {status}")))?;
    let priority = TaskPriority::from_code(&priority)
        .ok_or_else(|| AgendaError::Validation(format!("Unknown task priority: {priority}")))?;

    Ok((title, payload.notes, deadline, status, priority))
}

// ============================================================================
// Appointments
// ============================================================================

/// GET /appointments
pub async fn list_appointments<R>(
    State(state): State<AgendaAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
) -> AgendaResult<Json<Vec<AppointmentResponse>>>
where
    R: AppointmentRepository + Clone + Send + Sync + 'static,
{
    let appointments = state.repo.list_by_owner(&current.user_id).await?;

    Ok(Json(
        appointments.iter().map(AppointmentResponse::from).collect(),
    ))
}

/// POST /appointments
pub async fn create_appointment<R>(
    State(state): State<AgendaAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(payload): Json<AppointmentPayload>,
) -> AgendaResult<impl IntoResponse>
where
    R: AppointmentRepository + Clone + Send + Sync + 'static,
{
    let Some(date) = payload.date else {
        return Err(AgendaError::MissingFields(vec!["date".to_string()]));
    };

    let appointment = Appointment::new(current.user_id, date, payload.notes);

    state.repo.create(&appointment).await?;

    tracing::info!(
        appointment_id = %appointment.appointment_id,
        owner_id = %appointment.owner_id,
        "Appointment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from(&appointment)),
    ))
}

/// PUT /appointments/{id}
pub async fn update_appointment<R>(
    State(state): State<AgendaAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AppointmentPayload>,
) -> AgendaResult<Json<AppointmentResponse>>
where
    R: AppointmentRepository + Clone + Send + Sync + 'static,
{
    let Some(date) = payload.date else {
        return Err(AgendaError::MissingFields(vec!["date".to_string()]));
    };

    let appointment_id = AppointmentId::from_uuid(id);

    let mut appointment = state
        .repo
        .find_by_id(&appointment_id)
        .await?
        .filter(|a| a.is_owned_by(&current.user_id))
        .ok_or(AgendaError::NotAuthorized)?;

    appointment.apply_update(date, payload.notes);

    state.repo.update(&appointment).await?;

    Ok(Json(AppointmentResponse::from(&appointment)))
}

/// DELETE /appointments/{id}
pub async fn delete_appointment<R>(
    State(state): State<AgendaAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> AgendaResult<Json<MessageResponse>>
where
    R: AppointmentRepository + Clone + Send + Sync + 'static,
{
    let appointment_id = AppointmentId::from_uuid(id);

    let appointment = state
        .repo
        .find_by_id(&appointment_id)
        .await?
        .filter(|a| a.is_owned_by(&current.user_id))
        .ok_or(AgendaError::NotAuthorized)?;

    state.repo.delete(&appointment.appointment_id).await?;

    tracing::info!(appointment_id = %appointment.appointment_id, "Appointment deleted");

    Ok(Json(MessageResponse {
        message: "Appointment deleted".to_string(),
    }))
}
