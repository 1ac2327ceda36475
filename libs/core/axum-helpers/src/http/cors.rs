use axum::http::{HeaderName, HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

const TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// CORS for browser clients on the listed origins.
///
/// Preflight requests are answered by the layer itself; `X-Total-Count` is
/// exposed so scripts can read collection counts.
pub fn create_cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([TOTAL_COUNT])
        .max_age(Duration::from_secs(3600))
}

/// Split a comma-separated origin list, dropping blanks and invalid values.
pub fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}
