//! Request Client
//!
//! Wraps outgoing HTTP calls. The current token lives in an in-memory
//! mirror that is read immediately before each request and attached as a
//! bearer credential; with no token the request simply goes out
//! unauthenticated and the server decides admissibility.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

// ============================================================================
// Wire types
// ============================================================================

/// User profile as returned by the server
///
/// `/auth/login` returns a summary without phone/address; `/auth/me`
/// returns the full profile. Both deserialize into this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Profile,
}

/// Task as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    pub deadline: DateTime<Utc>,
    pub status: String,
    pub priority: String,
}

/// Task create/update payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub deadline: DateTime<Utc>,
    pub status: String,
    pub priority: String,
}

/// Appointment as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Appointment create/update payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// RFC 7807 problem body, as far as the client cares
#[derive(Debug, Deserialize)]
struct ProblemDetails {
    detail: Option<String>,
    title: Option<String>,
}

// ============================================================================
// API client
// ============================================================================

/// API client with an in-memory token mirror
///
/// Cheap to clone; clones share the same token mirror, so attaching or
/// detaching the token anywhere is visible everywhere.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Attach a token; subsequent requests carry it
    pub fn set_token(&self, token: &str) {
        *self.token.write().expect("token mirror poisoned") = Some(token.to_string());
    }

    /// Detach the token; subsequent requests go out unauthenticated
    pub fn clear_token(&self) {
        *self.token.write().expect("token mirror poisoned") = None;
    }

    /// Current token, if any
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token mirror poisoned").clone()
    }

    /// Build a request, reading the token mirror immediately before the call
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));

        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        Ok(response.json().await?)
    }

    // ========================================================================
    // Auth endpoints
    // ========================================================================

    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        self.send(
            self.request(Method::POST, "/auth/login")
                .json(&serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    /// GET /auth/me
    pub async fn me(&self) -> Result<Profile, ClientError> {
        self.send(self.request(Method::GET, "/auth/me")).await
    }

    // ========================================================================
    // Task endpoints
    // ========================================================================

    /// GET /tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.send(self.request(Method::GET, "/tasks")).await
    }

    /// POST /tasks
    pub async fn create_task(&self, payload: &TaskPayload) -> Result<Task, ClientError> {
        self.send(self.request(Method::POST, "/tasks").json(payload))
            .await
    }

    /// PUT /tasks/{id}
    pub async fn update_task(&self, id: &str, payload: &TaskPayload) -> Result<Task, ClientError> {
        self.send(
            self.request(Method::PUT, &format!("/tasks/{id}"))
                .json(payload),
        )
        .await
    }

    /// DELETE /tasks/{id}
    pub async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/tasks/{id}"))
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        Ok(())
    }

    // ========================================================================
    // Appointment endpoints
    // ========================================================================

    /// GET /appointments
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, ClientError> {
        self.send(self.request(Method::GET, "/appointments")).await
    }

    /// POST /appointments
    pub async fn create_appointment(
        &self,
        payload: &AppointmentPayload,
    ) -> Result<Appointment, ClientError> {
        self.send(self.request(Method::POST, "/appointments").json(payload))
            .await
    }
}

/// Turn a non-success response into an API error, salvaging the server's
/// message when the body is a problem document
async fn api_error(status: StatusCode, response: reqwest::Response) -> ClientError {
    let message = response
        .json::<ProblemDetails>()
        .await
        .ok()
        .and_then(|p| p.detail.or(p.title))
        .unwrap_or_else(|| status.to_string());

    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
