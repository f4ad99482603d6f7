//! MongoDB connector and probe commands
//!
//! Provides secure/plain connection variants for a single node and the
//! lightweight commands health probes are built on.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_APP_NAME, DEFAULT_URL, MongoConfig, TlsSettings};
pub use connector::{MongoError, client_options, connect_from_config};
pub use health::{HealthStatus, list_databases, ping, replica_set_status};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, bson};
