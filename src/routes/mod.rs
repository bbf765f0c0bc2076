// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::collector::HealthCollector;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) collector: Arc<HealthCollector>,
    pub(crate) web_root: PathBuf,
}

pub fn app(collector: Arc<HealthCollector>, web_root: PathBuf) -> Router {
    let state = AppState {
        collector,
        web_root,
    };
    Router::new()
        .route("/", get(http::dashboard_handler)) // GET /
        .route("/api/health", get(http::health_handler)) // GET /api/health
        .route("/version", get(http::version_handler)) // GET /version
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
