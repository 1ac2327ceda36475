use axum::response::{IntoResponse, Response};

use super::AppError;

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    AppError::NotFound("The requested resource was not found".to_string()).into_response()
}

/// Method-router fallback for verbs a route does not handle.
pub async fn method_not_allowed() -> Response {
    AppError::MethodNotAllowed.into_response()
}
