//! Store connectors shared by the services in this workspace.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client construction, health checks
//! - `config` - `core_config::FromEnv` support for the store configs
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::new("mongodb://localhost:27017", "shop");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(&config.database);
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
