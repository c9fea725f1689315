//! Agenda Error Types
//!
//! This module provides agenda-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Agenda-specific result type alias
pub type AgendaResult<T> = Result<T, AgendaError>;

/// Agenda-specific error variants
#[derive(Debug, Error)]
pub enum AgendaError {
    /// Resource missing or owned by someone else; both collapse to 403
    /// so foreign resource ids are not probeable
    #[error("Not authorized")]
    NotAuthorized,

    /// Required request fields absent or blank
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Request field present but malformed
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AgendaError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AgendaError::NotAuthorized => StatusCode::FORBIDDEN,
            AgendaError::MissingFields(_) | AgendaError::Validation(_) => StatusCode::BAD_REQUEST,
            AgendaError::Database(_) | AgendaError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AgendaError::NotAuthorized => ErrorKind::Forbidden,
            AgendaError::MissingFields(_) | AgendaError::Validation(_) => ErrorKind::BadRequest,
            AgendaError::Database(_) | AgendaError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AgendaError::Database(e) => {
                tracing::error!(error = %e, "Agenda database error");
            }
            AgendaError::Internal(msg) => {
                tracing::error!(message = %msg, "Agenda internal error");
            }
            AgendaError::NotAuthorized => {
                tracing::warn!("Ownership check rejected a mutation");
            }
            _ => {
                tracing::debug!(error = %self, "Agenda error");
            }
        }
    }
}

impl IntoResponse for AgendaError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_authorized_shape() {
        let err = AgendaError::NotAuthorized;
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Not authorized");
    }

    #[test]
    fn test_missing_fields_message() {
        let err = AgendaError::MissingFields(vec!["title".to_string(), "deadline".to_string()]);
        assert_eq!(err.to_string(), "Missing required fields: title, deadline");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
