//! User Entity
//!
//! Core user profile entity containing non-sensitive user data.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId};

/// User entity
///
/// Contains the user profile.
/// The password hash lives in the Credential entity, never here.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Email address (unique, used for login)
    pub email: Email,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Contact phone number
    pub phone: String,
    /// Postal address
    pub address: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        email: Email,
        first_name: String,
        last_name: String,
        phone: String,
        address: String,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            first_name,
            last_name,
            phone,
            address,
            created_at: now,
            updated_at: now,
        }
    }
}
