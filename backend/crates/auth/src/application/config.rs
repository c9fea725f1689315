//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use crate::application::token::TokenCodec;

/// Environment variable holding the process-wide token signing secret
pub const TOKEN_SECRET_ENV: &str = "AUTH_TOKEN_SECRET";

/// Auth application configuration
///
/// Constructed once at startup and passed into the router builders;
/// there is no ambient global configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for bearer tokens
    pub token_secret: Vec<u8>,
    /// Token lifetime, fixed at issuance (1 week)
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Create config with an explicit secret and the default TTL
    pub fn new(token_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
        }
    }

    /// Read the signing secret from the environment
    ///
    /// The secret is a startup requirement: callers are expected to treat
    /// a `None` here as fatal before binding the listener.
    pub fn from_env() -> Option<Self> {
        let secret = std::env::var(TOKEN_SECRET_ENV).ok()?;
        if secret.is_empty() {
            return None;
        }
        Some(Self::new(secret.into_bytes()))
    }

    /// Create config with a random secret (for development and tests)
    pub fn development() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self::new(secret.to_vec())
    }

    /// Build the token codec for this configuration
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(&self.token_secret, self.token_ttl)
    }
}
