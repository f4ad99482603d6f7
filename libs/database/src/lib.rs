//! Database library providing MongoDB connectors and probe commands
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::new("mongodb://localhost:27017").with_credentials("monitor", "secret");
//! let client = mongodb::connect_from_config(&config.secure()).await?;
//! let status = mongodb::ping(&client).await;
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
