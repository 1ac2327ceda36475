//! Reusable OpenAPI responses for the error cases every resource shares.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": "An internal server error occurred",
        "code": "INTERNAL_ERROR"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - validation failed",
    content_type = "application/json",
    example = json!({
        "error": "Invalid value for: price",
        "code": "VALIDATION_ERROR",
        "details": {
            "price": [{
                "code": "range",
                "message": null,
                "params": {"min": 0.0, "value": -5.0}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed id",
    content_type = "application/json",
    example = json!({
        "error": "Invalid ID",
        "code": "INVALID_ID"
    })
)]
pub struct BadRequestIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - invalid query parameters",
    content_type = "application/json",
    example = json!({
        "error": "Failed to deserialize query string: page: invalid digit found in string",
        "code": "INVALID_QUERY"
    })
)]
pub struct BadRequestQueryResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": "Resource not found",
        "code": "NOT_FOUND"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "error": "Database is unavailable",
        "code": "DATABASE_UNAVAILABLE"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
