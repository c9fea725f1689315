//! Client Session Controller
//!
//! Orchestrates login, logout, and startup session restoration, exposing
//! the current session state to the presentation layer. Navigation stays
//! with the presentation layer; this controller only holds state.
//!
//! ## Interleaving
//! Explicit actions (login, logout) bump a generation counter; an
//! in-flight restoration only commits its result while the generation it
//! started under is still current. The final state therefore reflects the
//! most recent explicit action, never a stale startup check.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{ApiClient, Profile};
use crate::store::SessionStore;

/// Session state exposed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup restoration still in flight
    Loading,
    /// A verified identity with its profile
    Authenticated(Profile),
    /// No session
    Anonymous,
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Profile of the authenticated user, if any
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            SessionState::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Client session controller
pub struct SessionController {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
    state: Mutex<SessionState>,
    /// Bumped by every explicit action; stale restores check it and yield
    generation: AtomicU64,
}

impl SessionController {
    /// Build the controller; starts in `Loading` until `restore` runs
    pub fn new(config: ClientConfig) -> Self {
        let store = config.storage.build();

        Self {
            api: ApiClient::new(config.base_url),
            store,
            state: Mutex::new(SessionState::Loading),
            generation: AtomicU64::new(0),
        }
    }

    /// The request client, for the rest of the application
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Snapshot of the current session state
    pub fn state(&self) -> SessionState {
        self.state.lock().expect("session state poisoned").clone()
    }

    /// Attempt to restore the session persisted by a previous run
    ///
    /// Any failure (no token, network, 401, decode) ends in `Anonymous`
    /// with the stored token cleared; there is no partial state.
    pub async fn restore(&self) {
        let generation = self.generation.load(Ordering::SeqCst);

        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored token");
                None
            }
        };

        let Some(token) = stored else {
            self.commit(generation, SessionState::Anonymous);
            return;
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            // An explicit action already took over
            return;
        }

        self.api.set_token(&token);

        match self.api.me().await {
            Ok(profile) => {
                self.commit(generation, SessionState::Authenticated(profile));
            }
            Err(e) => {
                tracing::info!(error = %e, "Stored session is not restorable, clearing it");

                if self.generation.load(Ordering::SeqCst) == generation {
                    // An unverifiable stored token is the same as no session
                    if let Err(e) = self.store.clear() {
                        tracing::warn!(error = %e, "Failed to clear stored token");
                    }
                    self.api.clear_token();
                    self.commit(generation, SessionState::Anonymous);
                }
            }
        }
    }

    /// Log in with credentials
    ///
    /// On success the token is persisted and attached; on failure the
    /// session state is left untouched and the error surfaces to the
    /// caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile, ClientError> {
        // Supersede any in-flight restoration
        self.generation.fetch_add(1, Ordering::SeqCst);

        let response = self.api.login(email, password).await?;

        self.store.save(&response.token)?;
        self.api.set_token(&response.token);

        *self.state.lock().expect("session state poisoned") =
            SessionState::Authenticated(response.user.clone());

        tracing::info!(user = %response.user.email, "Logged in");

        Ok(response.user)
    }

    /// Log out
    ///
    /// Idempotent; safe to call when already anonymous.
    pub async fn logout(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);

        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear stored token");
        }
        self.api.clear_token();

        *self.state.lock().expect("session state poisoned") = SessionState::Anonymous;

        tracing::info!("Logged out");
    }

    /// Commit a restore result unless an explicit action superseded it
    fn commit(&self, generation: u64, state: SessionState) {
        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }
        *self.state.lock().expect("session state poisoned") = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageKind;
    use crate::store::{PlainFileStore, SessionStore};
    use std::path::PathBuf;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile_json() -> serde_json::Value {
        serde_json::json!({
            "id": "b2c5a7a8-9b1f-4f7e-9a46-0d2f3f3f9e01",
            "email": "ada@example.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "phone": "555-0100",
            "address": "12 Analytical St",
        })
    }

    struct TestHarness {
        _dir: tempfile::TempDir,
        token_path: PathBuf,
        server: MockServer,
    }

    impl TestHarness {
        async fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let token_path = dir.path().join("session_token");
            Self {
                _dir: dir,
                token_path,
                server: MockServer::start().await,
            }
        }

        fn controller(&self) -> SessionController {
            SessionController::new(ClientConfig::new(
                self.server.uri(),
                StorageKind::PlainFile {
                    path: self.token_path.clone(),
                },
            ))
        }

        fn stored_token(&self) -> Option<String> {
            PlainFileStore::new(self.token_path.clone()).load().unwrap()
        }

        fn seed_token(&self, token: &str) {
            PlainFileStore::new(self.token_path.clone())
                .save(token)
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_restore_without_token_is_anonymous() {
        let harness = TestHarness::new().await;
        let controller = harness.controller();

        assert!(controller.state().is_loading());

        controller.restore().await;

        assert_eq!(controller.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_restore_with_valid_token_is_authenticated() {
        let harness = TestHarness::new().await;
        harness.seed_token("stored-token");

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("Authorization", "Bearer stored-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
            .mount(&harness.server)
            .await;

        let controller = harness.controller();
        controller.restore().await;

        let state = controller.state();
        assert!(state.is_authenticated());
        assert_eq!(state.profile().unwrap().email, "ada@example.com");
        assert_eq!(controller.api().token(), Some("stored-token".to_string()));
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_clears_it() {
        let harness = TestHarness::new().await;
        harness.seed_token("stale-token");

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&harness.server)
            .await;

        let controller = harness.controller();
        controller.restore().await;

        // Not stuck in Loading, and the stored token is gone
        assert_eq!(controller.state(), SessionState::Anonymous);
        assert_eq!(harness.stored_token(), None);
        assert_eq!(controller.api().token(), None);
    }

    #[tokio::test]
    async fn test_restore_with_unreachable_server_is_anonymous() {
        let harness = TestHarness::new().await;
        harness.seed_token("stored-token");

        // Point at a closed port
        let controller = SessionController::new(ClientConfig::new(
            "http://127.0.0.1:1",
            StorageKind::PlainFile {
                path: harness.token_path.clone(),
            },
        ));
        controller.restore().await;

        assert_eq!(controller.state(), SessionState::Anonymous);
        assert_eq!(harness.stored_token(), None);
    }

    #[tokio::test]
    async fn test_login_persists_token_and_authenticates() {
        let harness = TestHarness::new().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "fresh-token",
                "user": profile_json(),
            })))
            .mount(&harness.server)
            .await;

        let controller = harness.controller();
        controller.restore().await;

        let profile = controller.login("ada@example.com", "pw").await.unwrap();

        assert_eq!(profile.first_name, "Ada");
        assert!(controller.state().is_authenticated());
        assert_eq!(harness.stored_token(), Some("fresh-token".to_string()));
        assert_eq!(controller.api().token(), Some("fresh-token".to_string()));
    }

    #[tokio::test]
    async fn test_login_failure_leaves_state_unchanged() {
        let harness = TestHarness::new().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "detail": "Invalid credentials",
            })))
            .mount(&harness.server)
            .await;

        let controller = harness.controller();
        controller.restore().await;
        assert_eq!(controller.state(), SessionState::Anonymous);

        let err = controller.login("ada@example.com", "wrong").await.unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(controller.state(), SessionState::Anonymous);
        assert_eq!(harness.stored_token(), None);
    }

    #[tokio::test]
    async fn test_logout_then_restart_restores_anonymous() {
        let harness = TestHarness::new().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "fresh-token",
                "user": profile_json(),
            })))
            .mount(&harness.server)
            .await;

        let controller = harness.controller();
        controller.restore().await;
        controller.login("ada@example.com", "pw").await.unwrap();

        controller.logout().await;
        assert_eq!(controller.state(), SessionState::Anonymous);

        // Logout is idempotent
        controller.logout().await;
        assert_eq!(controller.state(), SessionState::Anonymous);

        // "Restart": a fresh controller over the same storage
        let restarted = harness.controller();
        restarted.restore().await;
        assert_eq!(restarted.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_login_supersedes_inflight_restore() {
        let harness = TestHarness::new().await;
        harness.seed_token("stale-token");

        // The startup check is slow and will come back negative
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(
                ResponseTemplate::new(401).set_delay(Duration::from_millis(300)),
            )
            .mount(&harness.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "fresh-token",
                "user": profile_json(),
            })))
            .mount(&harness.server)
            .await;

        let controller = Arc::new(harness.controller());

        let restoring = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.restore().await })
        };

        // Let the restore reach its network call, then log in
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.login("ada@example.com", "pw").await.unwrap();

        restoring.await.unwrap();

        // The stale startup check must not have undone the login
        assert!(controller.state().is_authenticated());
        assert_eq!(harness.stored_token(), Some("fresh-token".to_string()));
        assert_eq!(controller.api().token(), Some("fresh-token".to_string()));
    }
}
