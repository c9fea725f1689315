//! Auth Middleware
//!
//! The session guard for protected routes: extracts and verifies the bearer
//! token, then attaches the resolved identity to the request. A pure gate —
//! it performs no I/O and mutates nothing but the in-flight request.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenCodec, TokenError};
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;

/// Guard state
///
/// Holds only the codec; token verification is stateless, so the guard is
/// safe under arbitrary concurrent request handling.
#[derive(Clone)]
pub struct AuthGuardState {
    codec: Arc<TokenCodec>,
}

impl AuthGuardState {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            codec: Arc::new(config.codec()),
        }
    }
}

/// Identity resolved by the guard, attached to the request extensions
///
/// Downstream handlers take this via `Extension<AuthenticatedUser>` instead
/// of re-reading headers.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid bearer token
///
/// Per-request state machine:
/// - no `Authorization` header → 401 `No token provided`
/// - header present but token malformed/expired/badly signed → 401 `Invalid token`
/// - token verified but no usable identity claim → 401 `Invalid token payload`
/// - otherwise the identity is attached and the request passes through
pub async fn require_auth(
    State(state): State<AuthGuardState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(auth_header) = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return Err(AuthError::MissingToken.into_response());
    };

    let Some(token) = auth_header.strip_prefix("Bearer ").map(str::trim) else {
        // Header present but not a bearer credential
        return Err(AuthError::InvalidToken.into_response());
    };

    let user_id = match state.codec.verify(token) {
        Ok(user_id) => user_id,
        Err(TokenError::MissingIdentity) => {
            return Err(AuthError::InvalidTokenPayload.into_response());
        }
        Err(_) => return Err(AuthError::InvalidToken.into_response()),
    };

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Extension, Router, body::Body, http::Request as HttpRequest, http::StatusCode,
        middleware, routing::get};
    use tower::ServiceExt;

    async fn whoami(Extension(current): Extension<AuthenticatedUser>) -> String {
        current.user_id.to_string()
    }

    fn guarded_router(config: &AuthConfig) -> Router {
        let guard = AuthGuardState::new(config);
        Router::new()
            .route("/protected", get(whoami))
            .route_layer(middleware::from_fn_with_state(guard, require_auth))
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_no_header_is_rejected() {
        let config = AuthConfig::development();
        let app = guarded_router(&config);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(response).await.contains("No token provided"));
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected() {
        let config = AuthConfig::development();
        let app = guarded_router(&config);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(response).await.contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_rejected() {
        let config = AuthConfig::development();
        let app = guarded_router(&config);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_foreign_secret_is_rejected() {
        let config = AuthConfig::development();
        let other = AuthConfig::development();
        let app = guarded_router(&config);

        let token = other.codec().issue(&UserId::new()).unwrap();

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(response).await.contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_valid_token_passes_identity_through() {
        let config = AuthConfig::development();
        let app = guarded_router(&config);

        let user_id = UserId::new();
        let token = config.codec().issue(&user_id).unwrap();

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, user_id.to_string());
    }
}
