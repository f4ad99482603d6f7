//! MongoDB implementation of the connection provider and command runner

use async_trait::async_trait;
use database::mongodb::{self as db, HealthStatus, MongoConfig, MongoError};
use mongodb::{
    Client,
    bson::{self, Document},
};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{HealthCheckError, HealthCheckResult};
use crate::models::{MemberStateSnapshot, ReplicationState, RouterStatus};
use crate::resolver::ConnectionProvider;
use crate::runner::CommandRunner;

/// Opens direct connections to the node described by a [`MongoConfig`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoConnectionProvider;

#[async_trait]
impl ConnectionProvider for MongoConnectionProvider {
    type Config = MongoConfig;
    type Handle = Client;
    type Error = MongoError;

    async fn open_secure(&self, config: &MongoConfig) -> Result<Client, MongoError> {
        db::connect_from_config(&config.secure()).await
    }

    async fn open_plain(&self, config: &MongoConfig) -> Result<Client, MongoError> {
        db::connect_from_config(&config.plain()).await
    }
}

/// Runs status commands over an owned client
pub struct MongoCommandRunner {
    client: Client,
}

impl MongoCommandRunner {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Release the handle
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        debug!("MongoDB client shut down");
    }
}

#[async_trait]
impl CommandRunner for MongoCommandRunner {
    #[instrument(skip(self))]
    async fn member_state(&self) -> HealthCheckResult<MemberStateSnapshot> {
        let reply = db::replica_set_status(&self.client)
            .await
            .map_err(|e| HealthCheckError::Command(format!("replSetGetStatus failed: {}", e)))?;
        parse_member_state(reply)
    }

    async fn ping(&self) -> RouterStatus {
        db::ping(&self.client).await.into()
    }

    async fn route_capability(&self) -> RouterStatus {
        db::list_databases(&self.client).await.into()
    }
}

impl From<HealthStatus> for RouterStatus {
    fn from(status: HealthStatus) -> Self {
        if status.healthy {
            RouterStatus::Reachable
        } else {
            RouterStatus::Unreachable(
                status
                    .message
                    .unwrap_or_else(|| "command failed without an error message".to_string()),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReplSetStatus {
    #[serde(default)]
    members: Vec<ReplSetMember>,
}

#[derive(Debug, Deserialize)]
struct ReplSetMember {
    #[serde(default)]
    name: String,
    state: i32,
    #[serde(rename = "self", default)]
    is_self: bool,
    #[serde(default)]
    uptime: u64,
}

/// Extract this node's own entry from a `replSetGetStatus` reply
///
/// The entry is found through the `self` flag, never by comparing host
/// names, which differ between what the node and the driver call it.
pub fn parse_member_state(reply: Document) -> HealthCheckResult<MemberStateSnapshot> {
    let status: ReplSetStatus = bson::from_document(reply).map_err(|e| {
        HealthCheckError::Command(format!("unexpected replSetGetStatus reply: {}", e))
    })?;

    let member = status
        .members
        .into_iter()
        .find(|member| member.is_self)
        .ok_or_else(|| {
            HealthCheckError::Command(
                "replSetGetStatus reply has no member flagged as self".to_string(),
            )
        })?;

    let snapshot = MemberStateSnapshot {
        name: member.name,
        state: ReplicationState::from_code(member.state),
        uptime_secs: member.uptime,
    };
    debug!(
        member = %snapshot.name,
        state = %snapshot.state,
        state_code = snapshot.state.code(),
        uptime_secs = snapshot.uptime_secs,
        "Read own replica set member state"
    );
    Ok(snapshot)
}
