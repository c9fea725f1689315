//! Token Codec
//!
//! Issues and verifies the signed, expiring bearer tokens that carry the
//! user identity claim. Tokens are self-contained (HS256 JWT): verification
//! needs no database lookup, and there is no server-side revocation list.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_object::user_id::UserId;

/// Token verification failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token could not be parsed or decoded
    #[error("token is malformed")]
    Malformed,

    /// Token is past its expiry instant
    #[error("token has expired")]
    Expired,

    /// Signature does not match the configured secret
    #[error("token signature is invalid")]
    SignatureInvalid,

    /// Neither identity claim field carries a usable identity
    #[error("token carries no identity claim")]
    MissingIdentity,

    /// Token could not be signed at issuance
    #[error("token could not be signed")]
    Signing,
}

/// Wire claims
///
/// The identity has historically been written under two field names:
/// `userId` (current) and `id` (legacy). Verification accepts either;
/// `userId` wins when both are present. New tokens only write `userId`.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    iat: i64,
    exp: i64,
}

/// Token codec
///
/// Holds the process-wide signing secret. Stateless and cheap to clone;
/// safe to share across concurrent request handlers.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from a signing secret and a fixed token lifetime
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token embedding the identity claim
    ///
    /// Expiry is fixed at issuance time from the configured TTL.
    pub fn issue(&self, user_id: &UserId) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            user_id: Some(user_id.to_string()),
            id: None,
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| TokenError::Signing)
    }

    /// Verify a token and return the embedded identity
    ///
    /// Succeeds only if the signature matches AND the token has not expired.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed,
            }
        })?;

        // Normalize the two historical claim fields; `userId` takes precedence.
        let claim = data
            .claims
            .user_id
            .or(data.claims.id)
            .ok_or(TokenError::MissingIdentity)?;

        let uuid = Uuid::parse_str(&claim).map_err(|_| TokenError::MissingIdentity)?;

        Ok(UserId::from_uuid(uuid))
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}
