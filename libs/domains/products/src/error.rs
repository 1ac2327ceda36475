use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::ProductId;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Invalid product id: {0}")]
    InvalidId(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {id} not found")),
            ProductError::InvalidId(raw) => AppError::InvalidId(raw),
            ProductError::MissingFields(fields) => {
                AppError::MissingFields(fields.into_iter().map(str::to_string).collect())
            }
            ProductError::Validation(errors) => AppError::Validation(errors),
            ProductError::InvalidQuery(msg) => AppError::InvalidQuery(msg),
            ProductError::Database(e) => AppError::Database(e),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
