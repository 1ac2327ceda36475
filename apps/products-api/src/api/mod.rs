//! API routes module

pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

pub const ROOT_MESSAGE: &str = "Products API is running";

async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(products::router(state))
        .merge(health::router(state.clone()))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}
