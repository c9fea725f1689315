//! Appointment Entity

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::appointment_id::AppointmentId;

/// Appointment entity
#[derive(Debug, Clone)]
pub struct Appointment {
    /// Internal UUID identifier
    pub appointment_id: AppointmentId,
    /// Owning user
    pub owner_id: UserId,
    /// Scheduled date and time
    pub date: DateTime<Utc>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a new appointment owned by `owner_id`
    pub fn new(owner_id: UserId, date: DateTime<Utc>, notes: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            appointment_id: AppointmentId::new(),
            owner_id,
            date,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields
    pub fn apply_update(&mut self, date: DateTime<Utc>, notes: Option<String>) {
        self.date = date;
        self.notes = notes;
        self.updated_at = Utc::now();
    }

    /// Check whether `user_id` owns this appointment
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id == *user_id
    }
}
