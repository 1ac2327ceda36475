use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first_of, env_parse_or};

const DEFAULT_DATABASE: &str = "products";
const DEFAULT_MAX_POOL_SIZE: u32 = 100;
const DEFAULT_MIN_POOL_SIZE: u32 = 5;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SERVER_SELECTION_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a MongoDB deployment.
///
/// Built by hand in tests, or from the environment with the `config` feature.
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// `mongodb://` or `mongodb+srv://` connection string
    pub url: String,
    pub database: String,
    /// Reported to the server in the handshake, visible in server logs
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout: Duration,
    pub server_selection_timeout: Duration,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            server_selection_timeout: Duration::from_secs(DEFAULT_SERVER_SELECTION_TIMEOUT_SECS),
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_pool_size(mut self, min: u32, max: u32) -> Self {
        self.min_pool_size = min;
        self.max_pool_size = max;
        self
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    /// Connection string with any `user:password@` credentials masked.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        match rest.rsplit_once('@') {
            Some((_, host)) => format!("{scheme}://***@{host}"),
            None => self.url.clone(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017", DEFAULT_DATABASE)
    }
}

/// Environment variables:
/// - `MONGODB_URL` (or `MONGO_URI`, `MONGO_URL`), required
/// - `MONGODB_DATABASE` (or `MONGO_DATABASE`), default `products`
/// - `MONGODB_APP_NAME`
/// - `MONGODB_MAX_POOL_SIZE` (100), `MONGODB_MIN_POOL_SIZE` (5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (10), `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_first_of(&["MONGODB_URL", "MONGO_URI", "MONGO_URL"])?;
        let database = env_first_of(&["MONGODB_DATABASE", "MONGO_DATABASE"])
            .unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        let connect_secs = env_parse_or("MONGODB_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?;
        let selection_secs = env_parse_or(
            "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
            DEFAULT_SERVER_SELECTION_TIMEOUT_SECS,
        )?;

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", DEFAULT_MAX_POOL_SIZE)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", DEFAULT_MIN_POOL_SIZE)?,
            connect_timeout: Duration::from_secs(connect_secs),
            server_selection_timeout: Duration::from_secs(selection_secs),
        })
    }
}
