//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use auth::domain::value_object::user_id::UserId;

use crate::domain::entity::{appointment::Appointment, task::Task};
use crate::domain::value_object::{appointment_id::AppointmentId, task_id::TaskId};
use crate::error::AgendaResult;

/// Task repository trait
#[trait_variant::make(TaskRepository: Send)]
pub trait LocalTaskRepository {
    /// Create a new task
    async fn create(&self, task: &Task) -> AgendaResult<()>;

    /// Find task by ID
    async fn find_by_id(&self, task_id: &TaskId) -> AgendaResult<Option<Task>>;

    /// List tasks for one owner, newest first
    async fn list_by_owner(&self, owner_id: &UserId) -> AgendaResult<Vec<Task>>;

    /// Update a task
    async fn update(&self, task: &Task) -> AgendaResult<()>;

    /// Delete a task
    async fn delete(&self, task_id: &TaskId) -> AgendaResult<()>;
}

/// Appointment repository trait
#[trait_variant::make(AppointmentRepository: Send)]
pub trait LocalAppointmentRepository {
    /// Create a new appointment
    async fn create(&self, appointment: &Appointment) -> AgendaResult<()>;

    /// Find appointment by ID
    async fn find_by_id(
        &self,
        appointment_id: &AppointmentId,
    ) -> AgendaResult<Option<Appointment>>;

    /// List appointments for one owner, soonest first
    async fn list_by_owner(&self, owner_id: &UserId) -> AgendaResult<Vec<Appointment>>;

    /// Update an appointment
    async fn update(&self, appointment: &Appointment) -> AgendaResult<()>;

    /// Delete an appointment
    async fn delete(&self, appointment_id: &AppointmentId) -> AgendaResult<()>;
}
