//! Application route configuration.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::handlers::{auth_handler, auth_routes, note_handler, note_routes, user_routes};
use super::AppState;

/// Prefix of the versioned API
pub const API_PREFIX: &str = "/api/v1";

/// Create the application router with all routes configured.
///
/// The API is served under [`API_PREFIX`] and, for older clients, at the root
/// together with the bare `/register` and `/login` paths.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest(API_PREFIX, api_routes())
        .merge(api_routes())
        .route("/register", post(auth_handler::register))
        .route("/login", post(auth_handler::login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/notes", note_routes())
        .route("/user/:user_id/notes", get(note_handler::list_notes_by_owner))
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to the Notes API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    error: Some("database unreachable".to_string()),
                }),
            )
        }
    }
}
