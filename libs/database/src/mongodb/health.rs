use mongodb::{
    Client,
    bson::{Document, doc},
};
use std::time::Instant;
use tracing::debug;

use super::MongoError;

/// Outcome of a lightweight probe command
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the command succeeded
    pub healthy: bool,
    /// Error details when the command failed
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl HealthStatus {
    fn from_result<T, E: std::fmt::Display>(result: Result<T, E>, start: Instant) -> Self {
        let response_time_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(_) => Self {
                healthy: true,
                message: None,
                response_time_ms,
            },
            Err(e) => Self {
                healthy: false,
                message: Some(e.to_string()),
                response_time_ms,
            },
        }
    }
}

/// Run `{ ping: 1 }` against `admin`
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect_from_config, ping};
///
/// let status = ping(&client).await;
/// if !status.healthy {
///     println!("mongos unreachable: {:?}", status.message);
/// }
/// ```
pub async fn ping(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = client.database("admin").run_command(doc! { "ping": 1 }).await;
    let status = HealthStatus::from_result(result, start);
    debug!(healthy = status.healthy, response_time_ms = status.response_time_ms, "ping");
    status
}

/// Run `listDatabases`, which a router can only answer when it can reach
/// the config servers and shards
pub async fn list_databases(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = client.list_database_names().await;
    let status = HealthStatus::from_result(result, start);
    debug!(
        healthy = status.healthy,
        response_time_ms = status.response_time_ms,
        "listDatabases"
    );
    status
}

/// Run `replSetGetStatus` against `admin` and return the raw reply
pub async fn replica_set_status(client: &Client) -> Result<Document, MongoError> {
    let reply = client
        .database("admin")
        .run_command(doc! { "replSetGetStatus": 1 })
        .await?;
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn local_client() -> Client {
        Client::with_uri_str("mongodb://localhost:27017/?directConnection=true")
            .await
            .unwrap()
    }

    #[test]
    fn test_health_status_from_error() {
        let result: Result<(), String> = Err("not connected".to_string());
        let status = HealthStatus::from_result(result, Instant::now());
        assert!(!status.healthy);
        assert!(status.message.unwrap().contains("not connected"));
    }

    #[test]
    fn test_health_status_from_success() {
        let result: Result<(), String> = Ok(());
        let status = HealthStatus::from_result(result, Instant::now());
        assert!(status.healthy);
        assert!(status.message.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_ping() {
        let status = ping(&local_client().await).await;
        assert!(status.healthy);
        assert!(status.message.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires a replica set member
    async fn test_replica_set_status() {
        let reply = replica_set_status(&local_client().await).await.unwrap();
        assert!(reply.contains_key("members"));
    }
}
