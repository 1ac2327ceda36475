use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::str::FromStr;

/// Single path parameter parsed with the id type's [`FromStr`].
///
/// A value that does not parse is rejected with 400 `Invalid ID` before the
/// handler runs.
///
/// ```ignore
/// async fn get_product(IdPath(id): IdPath<ProductId>) -> String {
///     id.to_string()
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: FromStr + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        raw.parse::<T>()
            .map(IdPath)
            .map_err(|_| AppError::InvalidId(raw))
    }
}
