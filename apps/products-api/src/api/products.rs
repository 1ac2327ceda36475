//! `/products` routes over the MongoDB repository

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

fn repository(state: &AppState) -> MongoProductRepository {
    MongoProductRepository::new(&state.db)
}

pub fn router(state: &AppState) -> Router {
    handlers::router(ProductService::new(repository(state)))
}

/// Ensure the listing and filter indexes exist before serving traffic.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    repository(state).init_indexes().await?;
    Ok(())
}
