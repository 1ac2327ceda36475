//! Extractors that turn request parts into validated values or an [`AppError`](crate::AppError).

pub mod id_path;
pub mod json_body;
pub mod validated_json;
pub mod validated_query;

pub use id_path::IdPath;
pub use json_body::JsonBody;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
