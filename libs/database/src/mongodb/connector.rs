use mongodb::bson::doc;
use mongodb::{Client, options::ClientOptions};
use tracing::info;

use super::MongoConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("invalid MongoDB options: {0}")]
    Options(#[source] mongodb::error::Error),

    #[error("MongoDB is unreachable: {0}")]
    Unreachable(#[source] mongodb::error::Error),
}

/// Build a client from `config` and verify it with a `ping`.
///
/// The driver connects lazily, so without the ping a wrong URL would only
/// surface on the first request.
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!(url = %config.redacted_url(), database = %config.database, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url)
        .await
        .map_err(MongoError::Options)?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.server_selection_timeout);
    if let Some(app_name) = &config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options).map_err(MongoError::Options)?;

    client
        .database(&config.database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(MongoError::Unreachable)?;

    info!(database = %config.database, "Connected to MongoDB");
    Ok(client)
}

/// [`connect_from_config`] retried with exponential backoff.
///
/// `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> Result<Client, MongoError> {
    match retry_config {
        Some(policy) => retry_with_backoff(|| connect_from_config(config), policy).await,
        None => retry(|| connect_from_config(config)).await,
    }
}
