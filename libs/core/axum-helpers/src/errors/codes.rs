//! Error codes shared by every error response.
//!
//! Each code has a string form sent to clients (`"INVALID_ID"`), an integer
//! form for logs (`1002`) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidId;
//! assert_eq!(code.as_str(), "INVALID_ID");
//! assert_eq!(code.code(), 1002);
//! assert_eq!(code.default_message(), "Invalid ID");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1099)
    /// A field failed validation
    ValidationError,
    /// Path id is not a valid identifier for the store
    InvalidId,
    /// Body is not JSON, not an object of the expected shape, or has unknown fields
    InvalidJson,
    /// Query string could not be parsed or failed validation
    InvalidQuery,
    /// One or more required fields are absent
    MissingFields,
    NotFound,
    MethodNotAllowed,

    // Server errors (1100-1199)
    InternalError,
    ServiceUnavailable,

    // Database errors (2000-2999)
    /// No server could be selected within the timeout
    DatabaseUnavailable,
    DatabaseIo,
    DatabaseAuth,
    /// Stored document does not match the expected shape
    DatabaseDecode,
    DatabaseWrite,
    DatabaseCommand,
    DatabaseUnhandled,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier sent in the `code` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::MissingFields => "MISSING_FIELDS",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            Self::DatabaseIo => "DATABASE_IO",
            Self::DatabaseAuth => "DATABASE_AUTH",
            Self::DatabaseDecode => "DATABASE_DECODE",
            Self::DatabaseWrite => "DATABASE_WRITE",
            Self::DatabaseCommand => "DATABASE_COMMAND",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
        }
    }

    /// Integer code used in structured logs.
    ///
    /// - 1000-1099: client errors
    /// - 1100-1199: server errors
    /// - 2000-2999: database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::InvalidJson => 1003,
            Self::InvalidQuery => 1004,
            Self::MissingFields => 1005,
            Self::NotFound => 1006,
            Self::MethodNotAllowed => 1007,

            Self::InternalError => 1100,
            Self::ServiceUnavailable => 1101,

            Self::DatabaseUnavailable => 2001,
            Self::DatabaseIo => 2002,
            Self::DatabaseAuth => 2003,
            Self::DatabaseDecode => 2004,
            Self::DatabaseWrite => 2005,
            Self::DatabaseCommand => 2006,
            Self::DatabaseUnhandled => 2099,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidId => "Invalid ID",
            Self::InvalidJson => "Invalid JSON body",
            Self::InvalidQuery => "Invalid query parameters",
            Self::MissingFields => "Missing required fields",
            Self::NotFound => "Resource not found",
            Self::MethodNotAllowed => "Method not allowed",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseUnavailable => "Database is unavailable",
            Self::DatabaseIo => "Database I/O error",
            Self::DatabaseAuth => "Database authentication failed",
            Self::DatabaseDecode => "Failed to decode stored document",
            Self::DatabaseWrite => "Database write failed",
            Self::DatabaseCommand => "Database command failed",
            Self::DatabaseUnhandled => "Unhandled database error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
