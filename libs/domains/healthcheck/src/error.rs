use thiserror::Error;

use crate::models::{Component, ProbeKind, ReplicationState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthCheckError {
    /// Neither the secure nor the plain connection attempt produced a session
    #[error("Error connecting to mongodb: secure attempt: {secure}; plain attempt: {plain}")]
    Connection { secure: String, plain: String },

    /// A status or ping command could not be run or its reply was unusable
    #[error("{0}")]
    Command(String),

    /// The member reports a state that is never acceptable
    #[error(
        "Member failed Kubernetes liveness check with replication state {state} (uptime {uptime_secs}s)"
    )]
    UnacceptableState {
        state: ReplicationState,
        uptime_secs: u64,
    },

    /// The member is still in a transient state after the startup delay elapsed
    #[error(
        "Member failed Kubernetes liveness check: replication state {state} after {uptime_secs}s uptime exceeds startup delay of {startup_delay_secs}s"
    )]
    StartupDelayExceeded {
        state: ReplicationState,
        uptime_secs: u64,
        startup_delay_secs: u64,
    },

    #[error("{probe} check for {component} is not implemented")]
    NotImplemented {
        component: Component,
        probe: ProbeKind,
    },
}

pub type HealthCheckResult<T> = Result<T, HealthCheckError>;
