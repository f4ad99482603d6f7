//! Issues the status command that matches the component and returns a typed snapshot

use crate::error::HealthCheckResult;
use crate::models::{Component, RouterStatus, Snapshot};
use crate::runner::CommandRunner;

/// Gather liveness state for `component`
///
/// A failing `replSetGetStatus` is an error and not a snapshot; a failing
/// ping is a valid router snapshot.
pub async fn inspect<R>(runner: &R, component: Component) -> HealthCheckResult<Snapshot>
where
    R: CommandRunner + ?Sized,
{
    match component {
        Component::Mongod => runner.member_state().await.map(Snapshot::Member),
        Component::Mongos => Ok(Snapshot::Router(runner.ping().await)),
    }
}

/// Check whether a router can currently serve reads
pub async fn inspect_routing<R>(runner: &R) -> RouterStatus
where
    R: CommandRunner + ?Sized,
{
    runner.route_capability().await
}
