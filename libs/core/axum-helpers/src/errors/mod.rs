pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::error::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// { "error": "Invalid ID", "code": "INVALID_ID" }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable identifier
    pub code: ErrorCode,
    /// Structured context, e.g. per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }
}

/// Error type returned by handlers; renders as [`ErrorResponse`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Invalid JSON body: {0}")]
    Json(#[from] JsonRejection),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid ID: {0}")]
    InvalidId(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    fn into_parts(self) -> (StatusCode, ErrorCode, String, Option<serde_json::Value>) {
        match self {
            AppError::Json(e) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidJson,
                e.body_text(),
                None,
            ),
            AppError::Query(e) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidQuery,
                e.body_text(),
                None,
            ),
            AppError::Validation(e) => {
                let mut fields: Vec<&str> = e.errors().keys().map(|k| k.as_ref()).collect();
                fields.sort_unstable();
                let message = format!("Invalid value for: {}", fields.join(", "));
                let details = serde_json::to_value(&e).ok();
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError,
                    message,
                    details,
                )
            }
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::MissingFields,
                format!("Missing required fields: {}", fields.join(", ")),
                Some(serde_json::json!({ "fields": fields })),
            ),
            AppError::InvalidQuery(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidQuery, msg, None)
            }
            AppError::InvalidId(_) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidId,
                ErrorCode::InvalidId.default_message().to_string(),
                None,
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, msg, None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg, None),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorCode::MethodNotAllowed,
                ErrorCode::MethodNotAllowed.default_message().to_string(),
                None,
            ),
            AppError::Database(e) => {
                let (status, code) = map_mongo_error(&e);
                tracing::error!(error_code = code.code(), error = ?e, "Database error");
                (status, code, code.default_message().to_string(), None)
            }
            AppError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                msg,
                None,
            ),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                msg,
                None,
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.into_parts();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), status = status.as_u16(), "{message}");
        } else {
            tracing::info!(error_code = code.code(), status = status.as_u16(), "{message}");
        }

        let body = ErrorResponse {
            error: message,
            code,
            details,
        };
        (status, Json(body)).into_response()
    }
}

/// Classify a driver error by its kind.
///
/// Only an unreachable deployment is reported as 503; everything else is a
/// 500 with a code naming the failure class.
pub fn map_mongo_error(error: &mongodb::error::Error) -> (StatusCode, ErrorCode) {
    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::DatabaseUnavailable)
        }
        ErrorKind::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseIo),
        ErrorKind::Authentication { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseAuth)
        }
        ErrorKind::BsonDeserialization(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseDecode)
        }
        ErrorKind::Write(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseWrite),
        ErrorKind::Command(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseCommand),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseUnhandled),
    }
}
