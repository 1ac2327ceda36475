use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body deserialized then checked with [`Validate`].
///
/// Every rejection is a 400: malformed JSON, a wrong content type, type
/// mismatches and unknown fields come back as `INVALID_JSON`, failed
/// validation rules as `VALIDATION_ERROR` with per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Rename {
///     #[validate(length(min = 1))]
///     name: String,
/// }
///
/// async fn rename(ValidatedJson(body): ValidatedJson<Rename>) -> String {
///     body.name
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
