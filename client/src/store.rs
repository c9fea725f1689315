//! Client Session Store
//!
//! Persists the bearer token across restarts under a single fixed key.
//! Two backends cover the runtime split: a plain persistent file for
//! browser-hosted runtimes, and the OS credential store for native ones.
//! The backend is chosen once at construction, never per call site.
//!
//! No expiry is tracked here; a stale token is simply rejected by the
//! server on the next request.

use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fixed storage key for the single active session token
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// File-backed storage failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// OS credential store failed
    #[error("keyring operation failed: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Token persistence capability
///
/// Holds at most one token: saving overwrites, clearing is idempotent.
pub trait SessionStore: Send + Sync {
    /// Persist the token, replacing any previous one
    fn save(&self, token: &str) -> Result<(), StoreError>;

    /// Load the stored token, if any
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Remove the stored token; succeeds when nothing is stored
    fn clear(&self) -> Result<(), StoreError>;
}

// ============================================================================
// Plain file store (browser-style runtime)
// ============================================================================

/// Plain persistent key/value storage
///
/// Not encrypted; acceptable for this use case, matching what a browser
/// localStorage-backed client does.
pub struct PlainFileStore {
    path: PathBuf,
}

impl PlainFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for PlainFileStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Keyring store (native runtime)
// ============================================================================

/// OS-encrypted credential storage
///
/// Service-scoped entry in the platform keychain, the native analogue of
/// secure encrypted storage on a mobile device.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, StoreError> {
        Ok(keyring::Entry::new(&self.service, TOKEN_STORAGE_KEY)?)
    }
}

impl SessionStore for KeyringStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        self.entry()?.set_password(token)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
