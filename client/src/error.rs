//! Client Error Types

use thiserror::Error;

use crate::store::StoreError;

/// Client-side errors
///
/// Everything the presentation layer needs to distinguish: transport
/// failures, server rejections (with status), and local storage failures.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, TLS, decode)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected the request
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Token storage failed
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ClientError {
    /// Server-reported status, if the server got to answer at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 401 rejection
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
