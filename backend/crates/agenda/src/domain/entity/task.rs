//! Task Entity

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    task_id::TaskId, task_priority::TaskPriority, task_status::TaskStatus,
};

/// Task entity
///
/// Every task belongs to exactly one user; mutations must prove ownership
/// before touching it.
#[derive(Debug, Clone)]
pub struct Task {
    /// Internal UUID identifier
    pub task_id: TaskId,
    /// Owning user
    pub owner_id: UserId,
    /// Short title
    pub title: String,
    /// Free-form notes
    pub notes: Option<String>,
    /// Due date
    pub deadline: DateTime<Utc>,
    /// Workflow status
    pub status: TaskStatus,
    /// Priority
    pub priority: TaskPriority,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task owned by `owner_id`
    pub fn new(
        owner_id: UserId,
        title: String,
        notes: Option<String>,
        deadline: DateTime<Utc>,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> Self {
        let now = Utc::now();

        Self {
            task_id: TaskId::new(),
            owner_id,
            title,
            notes,
            deadline,
            status,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields (full update, as the API does)
    pub fn apply_update(
        &mut self,
        title: String,
        notes: Option<String>,
        deadline: DateTime<Utc>,
        status: TaskStatus,
        priority: TaskPriority,
    ) {
        self.title = title;
        self.notes = notes;
        self.deadline = deadline;
        self.status = status;
        self.priority = priority;
        self.updated_at = Utc::now();
    }

    /// Check whether `user_id` owns this task
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id == *user_id
    }
}
