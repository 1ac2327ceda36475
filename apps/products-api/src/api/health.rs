//! Readiness endpoint

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::AppError;
use database::mongodb::check_health_detailed;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ReadyResponse {
    status: &'static str,
    database: &'static str,
    response_time_ms: u64,
}

/// 200 while MongoDB answers a ping, 503 otherwise.
async fn ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>, AppError> {
    let health = check_health_detailed(&state.mongo_client).await;

    if !health.healthy {
        warn!(
            error = health.message.as_deref().unwrap_or("unknown"),
            response_time_ms = health.response_time_ms,
            "Readiness check failed"
        );
        return Err(AppError::ServiceUnavailable(
            "Database is not reachable".to_string(),
        ));
    }

    Ok(Json(ReadyResponse {
        status: "ready",
        database: "mongodb",
        response_time_ms: health.response_time_ms,
    }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
