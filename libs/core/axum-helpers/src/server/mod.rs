//! Router assembly, liveness endpoint and graceful shutdown.
//!
//! ```ignore
//! let app = create_router::<ApiDoc>(routes, None).merge(health_router(app_info!()));
//! create_production_app(app, &config.server, async move { client.shutdown().await }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
