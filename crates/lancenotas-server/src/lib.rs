//! HTTP surface of Lancenotas: the login/logout endpoints.
//!
//! Every login outcome is answered with HTTP 200; the result is in the body.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{info, warn};

use lancenotas_core::LancenotasError;
use lancenotas_core::auth::{AuthResponse, LoginRequest, UserDirectory};
use lancenotas_core::error::Result;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
}

impl AppState {
    pub fn new(directory: UserDirectory) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}

/// Builds the router with all routes mounted under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/health", get(health))
        .with_state(state)
}

/// Serves on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Binds `addr` and serves.
pub async fn run(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Starting server on {}", listener.local_addr()?);
    serve(listener, state).await
}

/// POST /api/login
///
/// A body that is not a JSON object is handled like one with both fields missing.
/// Password hashes are checked on the blocking pool.
async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = body.map(|Json(b)| b).unwrap_or_default();

    let directory = state.directory.clone();
    let result = tokio::task::spawn_blocking(move || {
        directory.authenticate(&request.email, &request.password)
    })
    .await
    .unwrap_or_else(|e| {
        warn!(error = %e, "Credential check task failed");
        Err(LancenotasError::internal(e.to_string()))
    });
    match &result {
        Ok(professor) => info!(professor_id = %professor.id, "Login accepted"),
        Err(e) => info!(reason = ?e.auth_failure(), "Login rejected"),
    }

    Json(AuthResponse::from(result))
}

/// POST /api/logout
async fn logout() -> impl IntoResponse {
    Json(AuthResponse::logged_out())
}

/// GET /api/health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
