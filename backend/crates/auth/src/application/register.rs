//! Register Use Case
//!
//! Creates a new user account with its credentials.

use std::sync::Arc;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
///
/// Fields arrive as options so that every absent field can be reported
/// in a single validation error instead of failing one at a time.
pub struct RegisterInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: String,
    pub email: String,
}

/// Register use case
pub struct RegisterUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
}

impl<U, C> RegisterUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>) -> Self {
        Self {
            user_repo,
            credential_repo,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email = non_blank(input.email);
        let password = non_blank(input.password);
        let first_name = non_blank(input.first_name);
        let last_name = non_blank(input.last_name);
        let phone = non_blank(input.phone);
        let address = non_blank(input.address);

        let mut missing = Vec::new();
        for (name, value) in [
            ("email", &email),
            ("password", &password),
            ("firstName", &first_name),
            ("lastName", &last_name),
            ("phone", &phone),
            ("address", &address),
        ] {
            if value.is_none() {
                missing.push(name.to_string());
            }
        }

        let (
            Some(email),
            Some(password),
            Some(first_name),
            Some(last_name),
            Some(phone),
            Some(address),
        ) = (email, password, first_name, last_name, phone, address)
        else {
            return Err(AuthError::MissingFields(missing));
        };

        let email =
            Email::new(email).map_err(|e| AuthError::Validation(e.message().to_string()))?;

        // Reject duplicates before doing any expensive hashing
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(password)
            .map_err(|e| AuthError::PasswordValidation(e.message().to_string()))?;
        let password_hash = UserPassword::from_raw(&raw_password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(email, first_name, last_name, phone, address);
        let credential = Credential::new(user.user_id, password_hash);

        self.user_repo.create(&user).await?;
        self.credential_repo.create(&credential).await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput {
            user_id: user.user_id.to_string(),
            email: user.email.to_string(),
        })
    }
}

/// Treat blank strings the same as absent fields
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
