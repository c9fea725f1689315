//! Router-level tests against an in-memory repository
//!
//! These exercise the full path through the session guard, validation, and
//! the ownership checks without a database.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use auth::application::config::AuthConfig;
use auth::domain::value_object::user_id::UserId;
use auth::presentation::middleware::AuthGuardState;

use crate::domain::entity::{appointment::Appointment, task::Task};
use crate::domain::repository::{AppointmentRepository, TaskRepository};
use crate::domain::value_object::{appointment_id::AppointmentId, task_id::TaskId};
use crate::error::AgendaResult;
use crate::presentation::router::{appointments_router_generic, tasks_router_generic};

/// In-memory repository standing in for Postgres
#[derive(Clone, Default)]
struct MemoryRepository {
    tasks: Arc<Mutex<Vec<Task>>>,
    appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl TaskRepository for MemoryRepository {
    async fn create(&self, task: &Task) -> AgendaResult<()> {
        self.tasks.lock().unwrap().push(task.clone());
        Ok(())
    }

    async fn find_by_id(&self, task_id: &TaskId) -> AgendaResult<Option<Task>> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.task_id == *task_id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> AgendaResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.owner_id == *owner_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> AgendaResult<()> {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(existing) = tasks.iter_mut().find(|t| t.task_id == task.task_id) {
            *existing = task.clone();
        }
        Ok(())
    }

    async fn delete(&self, task_id: &TaskId) -> AgendaResult<()> {
        self.tasks.lock().unwrap().retain(|t| t.task_id != *task_id);
        Ok(())
    }
}

impl AppointmentRepository for MemoryRepository {
    async fn create(&self, appointment: &Appointment) -> AgendaResult<()> {
        self.appointments.lock().unwrap().push(appointment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        appointment_id: &AppointmentId,
    ) -> AgendaResult<Option<Appointment>> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.appointment_id == *appointment_id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> AgendaResult<Vec<Appointment>> {
        let mut appointments: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.owner_id == *owner_id)
            .cloned()
            .collect();
        appointments.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(appointments)
    }

    async fn update(&self, appointment: &Appointment) -> AgendaResult<()> {
        let mut appointments = self.appointments.lock().unwrap();
        if let Some(existing) = appointments
            .iter_mut()
            .find(|a| a.appointment_id == appointment.appointment_id)
        {
            *existing = appointment.clone();
        }
        Ok(())
    }

    async fn delete(&self, appointment_id: &AppointmentId) -> AgendaResult<()> {
        self.appointments
            .lock()
            .unwrap()
            .retain(|a| a.appointment_id != *appointment_id);
        Ok(())
    }
}

// ============================================================================
// Test harness
// ============================================================================

struct Harness {
    repo: MemoryRepository,
    config: AuthConfig,
}

impl Harness {
    fn new() -> Self {
        Self {
            repo: MemoryRepository::default(),
            config: AuthConfig::development(),
        }
    }

    fn tasks_app(&self) -> Router {
        tasks_router_generic(self.repo.clone(), AuthGuardState::new(&self.config))
    }

    fn appointments_app(&self) -> Router {
        appointments_router_generic(self.repo.clone(), AuthGuardState::new(&self.config))
    }

    fn bearer(&self, user_id: &UserId) -> String {
        format!("Bearer {}", self.config.codec().issue(user_id).unwrap())
    }

    fn seed_task(&self, owner_id: UserId, title: &str) -> Task {
        let task = Task::new(
            owner_id,
            title.to_string(),
            None,
            Utc::now() + Duration::days(1),
            Default::default(),
            Default::default(),
        );
        self.repo.tasks.lock().unwrap().push(task.clone());
        task
    }
}

fn json_request(method: &str, uri: &str, auth: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn task_payload(title: &str) -> Value {
    json!({
        "title": title,
        "notes": "bring receipts",
        "deadline": (Utc::now() + Duration::days(3)).to_rfc3339(),
        "status": "IN_PROGRESS",
        "priority": "HIGH",
    })
}

// ============================================================================
// Tasks
// ============================================================================

#[tokio::test]
async fn test_tasks_require_token() {
    let harness = Harness::new();

    let response = harness
        .tasks_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["detail"], "No token provided");
}

#[tokio::test]
async fn test_create_and_list_own_tasks_only() {
    let harness = Harness::new();
    let alice = UserId::new();
    let bob = UserId::new();

    let response = harness
        .tasks_app()
        .oneshot(json_request(
            "POST",
            "/",
            &harness.bearer(&alice),
            task_payload("File taxes"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["title"], "File taxes");
    assert_eq!(created["status"], "IN_PROGRESS");

    // Alice sees her task
    let response = harness
        .tasks_app()
        .oneshot(get_request("/", &harness.bearer(&alice)))
        .await
        .unwrap();
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Bob sees nothing
    let response = harness
        .tasks_app()
        .oneshot(get_request("/", &harness.bearer(&bob)))
        .await
        .unwrap();
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_task_missing_fields_names_them() {
    let harness = Harness::new();
    let alice = UserId::new();

    let response = harness
        .tasks_app()
        .oneshot(json_request(
            "POST",
            "/",
            &harness.bearer(&alice),
            json!({ "notes": "only notes" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("title"));
    assert!(detail.contains("deadline"));
    assert!(detail.contains("status"));
    assert!(detail.contains("priority"));
    assert_eq!(harness.repo.tasks.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn test_update_foreign_task_is_forbidden_and_unmodified() {
    let harness = Harness::new();
    let alice = UserId::new();
    let bob = UserId::new();

    let task = harness.seed_task(alice, "Water the plants");

    let response = harness
        .tasks_app()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", task.task_id),
            &harness.bearer(&bob),
            task_payload("Hijacked"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["detail"], "Not authorized");

    let stored = harness.repo.tasks.lock().unwrap();
    assert_eq!(stored[0].title, "Water the plants");
}

#[tokio::test]
async fn test_delete_foreign_task_is_forbidden_and_kept() {
    let harness = Harness::new();
    let alice = UserId::new();
    let bob = UserId::new();

    let task = harness.seed_task(alice, "Water the plants");

    let response = harness
        .tasks_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", task.task_id))
                .header(header::AUTHORIZATION, harness.bearer(&bob))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(harness.repo.tasks.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_owner_can_update_and_delete() {
    let harness = Harness::new();
    let alice = UserId::new();

    let task = harness.seed_task(alice, "Draft report");

    let response = harness
        .tasks_app()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", task.task_id),
            &harness.bearer(&alice),
            task_payload("Draft report v2"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["title"], "Draft report v2");

    let response = harness
        .tasks_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", task.task_id))
                .header(header::AUTHORIZATION, harness.bearer(&alice))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Task deleted");
    assert_eq!(harness.repo.tasks.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn test_unknown_status_code_is_rejected() {
    let harness = Harness::new();
    let alice = UserId::new();

    let mut payload = task_payload("File taxes");
    payload["status"] = json!("DONE");

    let response = harness
        .tasks_app()
        .oneshot(json_request("POST", "/", &harness.bearer(&alice), payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Appointments
// ============================================================================

#[tokio::test]
async fn test_appointments_list_is_soonest_first() {
    let harness = Harness::new();
    let alice = UserId::new();
    let auth = harness.bearer(&alice);

    for days in [5, 1, 3] {
        let response = harness
            .appointments_app()
            .oneshot(json_request(
                "POST",
                "/",
                &auth,
                json!({
                    "date": (Utc::now() + Duration::days(days)).to_rfc3339(),
                    "notes": format!("in {days} days"),
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = harness
        .appointments_app()
        .oneshot(get_request("/", &auth))
        .await
        .unwrap();
    let listed = json_body(response).await;
    let notes: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["notes"].as_str().unwrap())
        .collect();

    assert_eq!(notes, vec!["in 1 days", "in 3 days", "in 5 days"]);
}

#[tokio::test]
async fn test_appointment_without_date_is_rejected() {
    let harness = Harness::new();
    let alice = UserId::new();

    let response = harness
        .appointments_app()
        .oneshot(json_request(
            "POST",
            "/",
            &harness.bearer(&alice),
            json!({ "notes": "no date" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().contains("date"));
}

#[tokio::test]
async fn test_delete_foreign_appointment_is_forbidden() {
    let harness = Harness::new();
    let alice = UserId::new();
    let bob = UserId::new();

    let appointment = Appointment::new(alice, Utc::now() + Duration::days(2), None);
    harness
        .repo
        .appointments
        .lock()
        .unwrap()
        .push(appointment.clone());

    let response = harness
        .appointments_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", appointment.appointment_id))
                .header(header::AUTHORIZATION, harness.bearer(&bob))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(harness.repo.appointments.lock().unwrap().len(), 1);
}
