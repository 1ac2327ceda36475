//! # Axum Helpers
//!
//! Building blocks shared by the HTTP services in this workspace.
//!
//! - **[`errors`]**: `AppError`, the JSON error body and error codes
//! - **[`extractors`]**: `IdPath`, `JsonBody`, `ValidatedJson`, `ValidatedQuery`
//! - **[`http`]**: security headers and CORS
//! - **[`server`]**: router assembly with API docs, `/health`, graceful shutdown
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let app = create_router::<ApiDoc>(routes, None).merge(health_router(app_info!()));
//! create_production_app(app, &server_config, async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{IdPath, JsonBody, ValidatedJson, ValidatedQuery};
pub use http::{create_cors_layer, parse_origins, security_headers};
pub use server::{
    HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, shutdown_signal,
};
