//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{appointment::Appointment, task::Task};

// ============================================================================
// Tasks
// ============================================================================

/// Task create/update payload
///
/// All fields optional at the wire level so validation can name every
/// missing field in one 400 response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Task response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    pub deadline: DateTime<Utc>,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.task_id.to_string(),
            title: task.title.clone(),
            notes: task.notes.clone(),
            deadline: task.deadline,
            status: task.status.code().to_string(),
            priority: task.priority.code().to_string(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

// ============================================================================
// Appointments
// ============================================================================

/// Appointment create/update payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    pub date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Appointment response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: String,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Appointment> for AppointmentResponse {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.appointment_id.to_string(),
            date: appointment.date,
            notes: appointment.notes.clone(),
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

// ============================================================================
// Shared
// ============================================================================

/// Simple confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
