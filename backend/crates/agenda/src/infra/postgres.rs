//! PostgreSQL Repository Implementations

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{appointment::Appointment, task::Task};
use crate::domain::repository::{AppointmentRepository, TaskRepository};
use crate::domain::value_object::{
    appointment_id::AppointmentId, task_id::TaskId, task_priority::TaskPriority,
    task_status::TaskStatus,
};
use crate::error::{AgendaError, AgendaResult};

/// PostgreSQL-backed agenda repository
#[derive(Clone)]
pub struct PgAgendaRepository {
    pool: PgPool,
}

impl PgAgendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Task Repository Implementation
// ============================================================================

impl TaskRepository for PgAgendaRepository {
    async fn create(&self, task: &Task) -> AgendaResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                task_id,
                owner_id,
                title,
                notes,
                deadline,
                status,
                priority,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(task.task_id.as_uuid())
        .bind(task.owner_id.as_uuid())
        .bind(&task.title)
        .bind(&task.notes)
        .bind(task.deadline)
        .bind(task.status.code())
        .bind(task.priority.code())
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, task_id: &TaskId) -> AgendaResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT
                task_id,
                owner_id,
                title,
                notes,
                deadline,
                status,
                priority,
                created_at,
                updated_at
            FROM tasks
            WHERE task_id = $1
            "#,
        )
        .bind(task_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_task()).transpose()
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> AgendaResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT
                task_id,
                owner_id,
                title,
                notes,
                deadline,
                status,
                priority,
                created_at,
                updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_task()).collect()
    }

    async fn update(&self, task: &Task) -> AgendaResult<()> {
        sqlx::query(
            r#"
            UPDATE tasks SET
                title = $2,
                notes = $3,
                deadline = $4,
                status = $5,
                priority = $6,
                updated_at = $7
            WHERE task_id = $1
            "#,
        )
        .bind(task.task_id.as_uuid())
        .bind(&task.title)
        .bind(&task.notes)
        .bind(task.deadline)
        .bind(task.status.code())
        .bind(task.priority.code())
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, task_id: &TaskId) -> AgendaResult<()> {
        sqlx::query("DELETE FROM tasks WHERE task_id = $1")
            .bind(task_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Appointment Repository Implementation
// ============================================================================

impl AppointmentRepository for PgAgendaRepository {
    async fn create(&self, appointment: &Appointment) -> AgendaResult<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments (
                appointment_id,
                owner_id,
                date,
                notes,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(appointment.appointment_id.as_uuid())
        .bind(appointment.owner_id.as_uuid())
        .bind(appointment.date)
        .bind(&appointment.notes)
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        appointment_id: &AppointmentId,
    ) -> AgendaResult<Option<Appointment>> {
        let row = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT
                appointment_id,
                owner_id,
                date,
                notes,
                created_at,
                updated_at
            FROM appointments
            WHERE appointment_id = $1
            "#,
        )
        .bind(appointment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_appointment()))
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> AgendaResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT
                appointment_id,
                owner_id,
                date,
                notes,
                created_at,
                updated_at
            FROM appointments
            WHERE owner_id = $1
            ORDER BY date ASC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_appointment()).collect())
    }

    async fn update(&self, appointment: &Appointment) -> AgendaResult<()> {
        sqlx::query(
            r#"
            UPDATE appointments SET
                date = $2,
                notes = $3,
                updated_at = $4
            WHERE appointment_id = $1
            "#,
        )
        .bind(appointment.appointment_id.as_uuid())
        .bind(appointment.date)
        .bind(&appointment.notes)
        .bind(appointment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, appointment_id: &AppointmentId) -> AgendaResult<()> {
        sqlx::query("DELETE FROM appointments WHERE appointment_id = $1")
            .bind(appointment_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct TaskRow {
    task_id: Uuid,
    owner_id: Uuid,
    title: String,
    notes: Option<String>,
    deadline: DateTime<Utc>,
    status: String,
    priority: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_task(self) -> AgendaResult<Task> {
        let status = TaskStatus::from_code(&self.status)
            .ok_or_else(|| AgendaError::Internal(format!("Invalid task status: {}", self.status)))?;
        let priority = TaskPriority::from_code(&self.priority).ok_or_else(|| {
            AgendaError::Internal(format!("Invalid task priority: {}", self.priority))
        })?;

        Ok(Task {
            task_id: TaskId::from_uuid(self.task_id),
            owner_id: UserId::from_uuid(self.owner_id),
            title: self.title,
            notes: self.notes,
            deadline: self.deadline,
            status,
            priority,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AppointmentRow {
    appointment_id: Uuid,
    owner_id: Uuid,
    date: DateTime<Utc>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AppointmentRow {
    fn into_appointment(self) -> Appointment {
        Appointment {
            appointment_id: AppointmentId::from_uuid(self.appointment_id),
            owner_id: UserId::from_uuid(self.owner_id),
            date: self.date,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
