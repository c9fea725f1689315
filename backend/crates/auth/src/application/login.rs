//! Login Use Case
//!
//! Verifies credentials and issues a bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::entity::user::User;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer token
    pub token: String,
    /// Profile of the authenticated user
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    codec: TokenCodec,
}

impl<U, C> LoginUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            credential_repo,
            codec: config.codec(),
        }
    }

    /// Authenticate and issue a token
    ///
    /// Every failure on this path collapses into the same generic
    /// `InvalidCredentials`, so a caller cannot tell an unknown email
    /// from a wrong password.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = input
            .email
            .and_then(|e| Email::new(e).ok())
            .ok_or(AuthError::InvalidCredentials)?;

        let password = input
            .password
            .and_then(|p| RawPassword::new(p).ok())
            .ok_or(AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credential = self
            .credential_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credential not found".to_string()))?;

        if !credential.password_hash.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .codec
            .issue(&user.user_id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { token, user })
    }
}
