use std::fmt;

use strum::{AsRefStr, Display, EnumString};

use crate::error::HealthCheckError;

/// Startup grace period applied to transient replication states (2 hours)
pub const DEFAULT_STARTUP_DELAY_SECS: u64 = 7200;

/// Which MongoDB process the probe is running against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Component {
    /// Storage/replication node
    #[default]
    Mongod,
    /// Router fronting a sharded cluster
    Mongos,
}

/// Orchestrator probe being answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProbeKind {
    #[default]
    Liveness,
    Readiness,
}

/// Caller supplied knobs for the decision logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    /// How long after process start STARTUP, STARTUP2 and ROLLBACK are tolerated
    pub startup_delay_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            startup_delay_secs: DEFAULT_STARTUP_DELAY_SECS,
        }
    }
}

/// How a replication state is treated by the liveness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    /// Passes regardless of uptime
    Healthy,
    /// Passes only while uptime is within the startup delay
    StartupGrace,
    /// Fails regardless of uptime
    Unhealthy,
}

/// Replica set member state as reported by `replSetGetStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplicationState {
    Startup,
    Primary,
    Secondary,
    Recovering,
    Startup2,
    Unknown,
    Arbiter,
    Down,
    Rollback,
    Removed,
    /// A numeric state code outside the table above
    Unrecognized(i32),
}

impl ReplicationState {
    /// Map the server's numeric `state` code
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Startup,
            1 => Self::Primary,
            2 => Self::Secondary,
            3 => Self::Recovering,
            5 => Self::Startup2,
            6 => Self::Unknown,
            7 => Self::Arbiter,
            8 => Self::Down,
            9 => Self::Rollback,
            10 => Self::Removed,
            other => Self::Unrecognized(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Startup => 0,
            Self::Primary => 1,
            Self::Secondary => 2,
            Self::Recovering => 3,
            Self::Startup2 => 5,
            Self::Unknown => 6,
            Self::Arbiter => 7,
            Self::Down => 8,
            Self::Rollback => 9,
            Self::Removed => 10,
            Self::Unrecognized(code) => *code,
        }
    }

    /// Server-side name of the state (`stateStr`)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Startup => "STARTUP",
            Self::Primary => "PRIMARY",
            Self::Secondary => "SECONDARY",
            Self::Recovering => "RECOVERING",
            Self::Startup2 => "STARTUP2",
            Self::Unknown => "UNKNOWN",
            Self::Arbiter => "ARBITER",
            Self::Down => "DOWN",
            Self::Rollback => "ROLLBACK",
            Self::Removed => "REMOVED",
            Self::Unrecognized(_) => "UNRECOGNIZED",
        }
    }

    /// Liveness classification table.
    ///
    /// No wildcard arm: a new variant does not compile until it is placed
    /// in one of the three classes.
    pub fn class(&self) -> StateClass {
        match self {
            Self::Primary | Self::Secondary | Self::Arbiter | Self::Recovering => {
                StateClass::Healthy
            }
            Self::Startup | Self::Startup2 | Self::Rollback => StateClass::StartupGrace,
            Self::Down | Self::Removed | Self::Unknown | Self::Unrecognized(_) => {
                StateClass::Unhealthy
            }
        }
    }
}

impl fmt::Display for ReplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(code) => write!(f, "UNRECOGNIZED({})", code),
            other => f.write_str(other.name()),
        }
    }
}

/// This node's own entry of the replica set status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStateSnapshot {
    /// host:port the member is known as
    pub name: String,
    pub state: ReplicationState,
    /// Seconds since the mongod process started
    pub uptime_secs: u64,
}

/// Whether a router answered a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterStatus {
    Reachable,
    Unreachable(String),
}

impl RouterStatus {
    /// A router either answers or it does not
    pub fn verdict(&self) -> Verdict {
        match self {
            Self::Reachable => Verdict::pass(),
            Self::Unreachable(message) => Verdict::Fail(HealthCheckError::Command(message.clone())),
        }
    }
}

/// State gathered for one probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    Member(MemberStateSnapshot),
    Router(RouterStatus),
}

/// Result of one probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Healthy; mongod checks carry the replication state for the log line
    Pass { state: Option<ReplicationState> },
    /// Unhealthy
    Fail(HealthCheckError),
    /// No decision logic exists for this probe and component
    NotImplemented,
}

impl Verdict {
    pub fn pass() -> Self {
        Self::Pass { state: None }
    }

    pub fn pass_with_state(state: ReplicationState) -> Self {
        Self::Pass { state: Some(state) }
    }

    #[cfg(test)]
    pub(crate) fn is_pass(&self) -> bool {
        matches!(self, Self::Pass { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const ALL_KNOWN: [ReplicationState; 10] = [
        ReplicationState::Startup,
        ReplicationState::Primary,
        ReplicationState::Secondary,
        ReplicationState::Recovering,
        ReplicationState::Startup2,
        ReplicationState::Unknown,
        ReplicationState::Arbiter,
        ReplicationState::Down,
        ReplicationState::Rollback,
        ReplicationState::Removed,
    ];

    #[test]
    fn test_state_codes_match_server_table() {
        for state in ALL_KNOWN {
            assert_eq!(ReplicationState::from_code(state.code()), state);
        }
        assert_eq!(ReplicationState::from_code(5), ReplicationState::Startup2);
        assert_eq!(ReplicationState::from_code(9), ReplicationState::Rollback);
    }

    #[test]
    fn test_unlisted_codes_are_unrecognized() {
        // 4 was FATAL in older servers and is no longer part of the table
        assert_eq!(ReplicationState::from_code(4), ReplicationState::Unrecognized(4));
        assert_eq!(ReplicationState::from_code(-1), ReplicationState::Unrecognized(-1));
        assert_eq!(ReplicationState::from_code(42).code(), 42);
    }

    #[test]
    fn test_classification_table() {
        use ReplicationState::*;

        for state in [Primary, Secondary, Arbiter, Recovering] {
            assert_eq!(state.class(), StateClass::Healthy, "{state}");
        }
        for state in [Startup, Startup2, Rollback] {
            assert_eq!(state.class(), StateClass::StartupGrace, "{state}");
        }
        for state in [Down, Removed, Unknown, Unrecognized(4)] {
            assert_eq!(state.class(), StateClass::Unhealthy, "{state}");
        }
    }

    #[test]
    fn test_state_display_uses_server_names() {
        assert_eq!(ReplicationState::Startup2.to_string(), "STARTUP2");
        assert_eq!(ReplicationState::Primary.to_string(), "PRIMARY");
        assert_eq!(ReplicationState::Unrecognized(11).to_string(), "UNRECOGNIZED(11)");
    }

    #[test]
    fn test_component_parsing() {
        assert_eq!(Component::from_str("mongod").unwrap(), Component::Mongod);
        assert_eq!(Component::from_str("MONGOS").unwrap(), Component::Mongos);
        assert!(Component::from_str("mongoc").is_err());
        assert_eq!(Component::default(), Component::Mongod);
        assert_eq!(Component::Mongos.to_string(), "mongos");
    }

    #[test]
    fn test_probe_kind_parsing() {
        assert_eq!(ProbeKind::from_str("readiness").unwrap(), ProbeKind::Readiness);
        assert_eq!(ProbeKind::default(), ProbeKind::Liveness);
        assert_eq!(ProbeKind::Liveness.as_ref(), "liveness");
    }

    #[test]
    fn test_default_startup_delay() {
        assert_eq!(ProbeSettings::default().startup_delay_secs, 7200);
    }

    #[test]
    fn test_router_status_verdict() {
        assert_eq!(RouterStatus::Reachable.verdict(), Verdict::pass());
        assert_eq!(
            RouterStatus::Unreachable("not connected".to_string()).verdict(),
            Verdict::Fail(HealthCheckError::Command("not connected".to_string()))
        );
    }
}
