//! Credential Entity
//!
//! Salted password hash for one user. Loaded only on the login path and
//! never held beyond the verification call.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{user_id::UserId, user_password::UserPassword};

/// Credential entity
#[derive(Debug, Clone)]
pub struct Credential {
    /// Reference to User
    pub user_id: UserId,
    /// Argon2id hash in PHC format
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Create credentials for a freshly registered user
    pub fn new(user_id: UserId, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
