use async_trait::async_trait;

use crate::error::HealthCheckResult;
use crate::models::{MemberStateSnapshot, RouterStatus};

/// Administrative status commands against one open handle
///
/// Implementations run the command and translate the reply; they do not
/// retry and do not classify.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// This node's own entry of `replSetGetStatus`
    ///
    /// Errors with `HealthCheckError::Command` when the command fails (for
    /// example the node is not running with replication) or when no member
    /// of the reply is flagged as self.
    async fn member_state(&self) -> HealthCheckResult<MemberStateSnapshot>;

    /// Lightweight ping
    async fn ping(&self) -> RouterStatus;

    /// A command a router can only answer when it can route reads
    async fn route_capability(&self) -> RouterStatus;
}
