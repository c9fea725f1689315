//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use agenda::PgAgendaRepository;
use agenda::router::{appointments_router, tasks_router};
use auth::presentation::middleware::AuthGuardState;
use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,agenda=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // The signing secret is a startup requirement, never a per-request
    // fallback: refuse to serve without it.
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::from_env().unwrap_or_else(AuthConfig::development)
    } else {
        AuthConfig::from_env().expect("AUTH_TOKEN_SECRET must be set in production")
    };

    let auth_repo = PgAuthRepository::new(pool.clone());
    let agenda_repo = PgAgendaRepository::new(pool.clone());
    let guard = AuthGuardState::new(&auth_config);

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:8081,http://127.0.0.1:8081".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let health_router = Router::new()
        .route("/health", get(health))
        .with_state(pool.clone());

    let app = Router::new()
        .nest("/auth", auth_router(auth_repo, auth_config))
        .nest("/tasks", tasks_router(agenda_repo.clone(), guard.clone()))
        .nest("/appointments", appointments_router(agenda_repo, guard))
        .merge(health_router)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /health
///
/// Probes the database so the check means something.
async fn health(
    axum::extract::State(pool): axum::extract::State<PgPool>,
) -> Result<Json<serde_json::Value>, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Health check failed");
            AppError::new(ErrorKind::InternalServerError, "DB connection failed")
        })?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}
