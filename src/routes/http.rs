// GET handlers: dashboard, api/health, version

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use super::AppState;
use crate::version::{NAME, VERSION};

/// GET /: serves `<web_root>/index.html`, or 404 text/plain if it is missing or empty.
pub(super) async fn dashboard_handler(State(state): State<AppState>) -> Response {
    let path = state.web_root.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) if !html.is_empty() => Html(html).into_response(),
        result => {
            if let Err(e) = result {
                tracing::debug!(error = %e, path = %path.display(), "dashboard not readable");
            }
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/plain")],
                "index.html not found",
            )
                .into_response()
        }
    }
}

/// GET /api/health: one fresh snapshot, assembled on the blocking pool (CPU window, docker ps).
pub(super) async fn health_handler(State(state): State<AppState>) -> Response {
    let collector = state.collector.clone();
    match tokio::task::spawn_blocking(move || collector.snapshot()).await {
        Ok(snapshot) => axum::Json(snapshot).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, operation = "snapshot", "snapshot task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}
