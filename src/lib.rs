pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod realtime;
pub mod services;
pub mod state;

#[cfg(test)]
pub mod testing;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_public_routes())
        // Protected API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new().route("/auth/login", post(auth::login))
}

fn api_routes() -> Router<AppState> {
    use handlers::protected::{auth, documents, projects};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        .route("/api/projects/pending", get(projects::projects_pending))
        .route("/api/projects/:id/approve", post(projects::project_approve))
        .route("/api/documents/pending", get(documents::documents_pending))
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Barangay API (Rust)",
            "version": version,
            "description": "Barangay administrative platform backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "/auth/login (public - token acquisition)",
                "auth": "/api/auth/whoami (protected)",
                "projects": "/api/projects/pending, /api/projects/:id/approve (protected)",
                "documents": "/api/documents/pending (protected)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
