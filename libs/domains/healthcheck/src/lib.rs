//! Health check domain
//!
//! Decides whether a mongod or mongos process is alive or ready, from one
//! freshly opened handle and one status command per invocation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Resolver   │  ← secure attempt, then plain attempt
//! └──────┬──────┘
//!        │ handle
//! ┌──────▼──────┐
//! │  Inspector  │  ← replSetGetStatus / ping / listDatabases via CommandRunner
//! └──────┬──────┘
//!        │ snapshot
//! ┌──────▼──────┐
//! │ Evaluators  │  ← liveness (state table + startup delay), readiness
//! └──────┬──────┘
//!        │
//!     Verdict
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::mongodb::MongoConfig;
//! use domain_healthcheck::{
//!     Component, ConnectionResolver, HealthCheckService, MongoCommandRunner,
//!     MongoConnectionProvider, ProbeKind, ProbeSettings, TracingSink,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoConfig::default();
//! let client = ConnectionResolver::new(MongoConnectionProvider, TracingSink)
//!     .resolve(&config)
//!     .await?;
//!
//! let service = HealthCheckService::new(MongoCommandRunner::new(client), ProbeSettings::default());
//! let verdict = service.check(Component::Mongod, ProbeKind::Liveness).await;
//! service.into_runner().shutdown().await;
//! println!("{:?}", verdict);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod events;
pub mod inspector;
pub mod liveness;
pub mod models;
pub mod mongodb;
pub mod readiness;
pub mod resolver;
pub mod runner;
pub mod service;

// Re-export commonly used types
pub use crate::mongodb::{MongoCommandRunner, MongoConnectionProvider};
pub use error::{HealthCheckError, HealthCheckResult};
pub use events::{EventSink, ProbeEvent, TracingSink};
pub use models::{
    Component, DEFAULT_STARTUP_DELAY_SECS, MemberStateSnapshot, ProbeKind, ProbeSettings,
    ReplicationState, RouterStatus, Snapshot, StateClass, Verdict,
};
pub use resolver::{ConnectionProvider, ConnectionResolver};
pub use runner::CommandRunner;
pub use service::HealthCheckService;
