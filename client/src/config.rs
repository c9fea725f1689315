//! Client Configuration
//!
//! Explicit configuration passed to the client factory; there are no
//! module-level singletons. The storage backend is picked here, once,
//! based on the hosting runtime.

use std::path::PathBuf;
use std::sync::Arc;

use crate::store::{KeyringStore, PlainFileStore, SessionStore};

/// Storage backend selection
#[derive(Debug, Clone)]
pub enum StorageKind {
    /// Plain persistent file (browser-hosted runtime)
    PlainFile { path: PathBuf },
    /// OS-encrypted credential store (native runtime)
    Keyring { service: String },
}

impl StorageKind {
    /// Plain-file storage under the platform data directory
    pub fn plain_file(app_name: &str) -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::PlainFile {
            path: base.join(app_name).join("session_token"),
        }
    }

    /// Keyring storage scoped to the given service name
    pub fn keyring(service: &str) -> Self {
        Self::Keyring {
            service: service.to_string(),
        }
    }

    /// Build the store for this backend
    pub fn build(&self) -> Arc<dyn SessionStore> {
        match self {
            StorageKind::PlainFile { path } => Arc::new(PlainFileStore::new(path.clone())),
            StorageKind::Keyring { service } => Arc::new(KeyringStore::new(service.clone())),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, without a trailing slash
    pub base_url: String,
    /// Token storage backend
    pub storage: StorageKind,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, storage: StorageKind) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, storage }
    }
}
