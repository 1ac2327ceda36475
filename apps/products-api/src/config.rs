//! Configuration for Products API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Comma-separated origins; CORS is off when unset
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origins| !origins.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_mongodb_url() {
        temp_env::with_vars_unset(["MONGODB_URL", "MONGO_URI", "MONGO_URL"], || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        });
    }

    #[test]
    fn test_from_env_reads_all_sections() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://db:27017")),
                ("MONGODB_DATABASE", Some("shop")),
                ("PORT", Some("3003")),
                ("APP_ENV", Some("production")),
                ("CORS_ALLOWED_ORIGIN", Some("https://shop.example")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "products_api");
                assert_eq!(config.mongodb.database, "shop");
                assert_eq!(config.server.port, 3003);
                assert!(config.environment.is_production());
                assert_eq!(
                    config.cors_allowed_origin.as_deref(),
                    Some("https://shop.example")
                );
            },
        );
    }

    #[test]
    fn test_blank_cors_origin_disables_cors() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://db:27017")),
                ("CORS_ALLOWED_ORIGIN", Some("  ")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.cors_allowed_origin.is_none());
            },
        );
    }

    #[test]
    fn test_bad_port_names_the_key() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://db:27017")),
                ("PORT", Some("eighty")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "PORT"));
            },
        );
    }
}
