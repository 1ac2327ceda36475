use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness payload; returned whenever the process can serve requests.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
}

pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        name: app.name.to_string(),
        version: app.version.to_string(),
    })
}

/// `GET /health`, reporting the app's name and version.
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
