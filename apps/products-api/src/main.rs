//! Products API - REST server over MongoDB

use axum_helpers::server::{create_production_app, create_router, health_router};
use axum_helpers::{create_cors_layer, parse_origins};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::connect_from_config_with_retry;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(url = %config.mongodb.redacted_url(), "Connecting to MongoDB");
    let mongo_client = connect_from_config_with_retry(&config.mongodb, None).await?;
    let state = AppState::new(mongo_client, &config.mongodb.database);
    info!(database = %config.mongodb.database, "Connected to MongoDB");

    api::init_indexes(&state).await?;

    let cors = config
        .cors_allowed_origin
        .as_deref()
        .map(|origins| create_cors_layer(parse_origins(origins)));

    let app = create_router::<openapi::ApiDoc>(api::routes(&state), cors)
        .merge(health_router(config.app));

    info!(
        name = config.app.name,
        version = config.app.version,
        port = config.server.port,
        "Starting Products API"
    );

    let client = state.mongo_client.clone();
    create_production_app(app, &config.server, async move {
        info!("Closing MongoDB connections");
        client.shutdown().await;
        info!("MongoDB connections closed");
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
