//! Liveness decisions
//!
//! mongod: classify the member state through [`ReplicationState::class`](crate::models::ReplicationState::class) and
//! apply the startup delay to transient states. The delay bound is inclusive.
//!
//! mongos: the router either answered the ping or it did not.

use crate::error::HealthCheckError;
use crate::models::{MemberStateSnapshot, Snapshot, StateClass, Verdict};

pub fn evaluate(snapshot: &Snapshot, startup_delay_secs: u64) -> Verdict {
    match snapshot {
        Snapshot::Member(member) => evaluate_member(member, startup_delay_secs),
        Snapshot::Router(status) => status.verdict(),
    }
}

pub fn evaluate_member(member: &MemberStateSnapshot, startup_delay_secs: u64) -> Verdict {
    let MemberStateSnapshot {
        state, uptime_secs, ..
    } = *member;

    match state.class() {
        StateClass::Healthy => Verdict::pass_with_state(state),
        StateClass::StartupGrace if uptime_secs <= startup_delay_secs => {
            Verdict::pass_with_state(state)
        }
        StateClass::StartupGrace => Verdict::Fail(HealthCheckError::StartupDelayExceeded {
            state,
            uptime_secs,
            startup_delay_secs,
        }),
        StateClass::Unhealthy => {
            Verdict::Fail(HealthCheckError::UnacceptableState { state, uptime_secs })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_STARTUP_DELAY_SECS, ReplicationState, RouterStatus};

    fn member(state: ReplicationState, uptime_secs: u64) -> MemberStateSnapshot {
        MemberStateSnapshot {
            name: "rs0-0.rs0.mongo.svc:27017".to_string(),
            state,
            uptime_secs,
        }
    }

    const UPTIMES: [u64; 5] = [0, 5, 7200, 7201, u64::MAX];

    #[test]
    fn test_healthy_states_pass_at_any_uptime() {
        use ReplicationState::*;

        for state in [Primary, Secondary, Arbiter, Recovering] {
            for uptime in UPTIMES {
                assert_eq!(
                    evaluate_member(&member(state, uptime), DEFAULT_STARTUP_DELAY_SECS),
                    Verdict::pass_with_state(state),
                    "{state} at {uptime}s"
                );
            }
        }
    }

    #[test]
    fn test_transient_states_pass_within_startup_delay() {
        use ReplicationState::*;

        for state in [Startup, Startup2, Rollback] {
            for uptime in [0, 1, 3600, 7199, 7200] {
                assert!(
                    evaluate_member(&member(state, uptime), 7200).is_pass(),
                    "{state} at {uptime}s"
                );
            }
        }
    }

    #[test]
    fn test_transient_states_fail_after_startup_delay() {
        use ReplicationState::*;

        for state in [Startup, Startup2, Rollback] {
            for uptime in [7201, 9000, u64::MAX] {
                assert_eq!(
                    evaluate_member(&member(state, uptime), 7200),
                    Verdict::Fail(HealthCheckError::StartupDelayExceeded {
                        state,
                        uptime_secs: uptime,
                        startup_delay_secs: 7200,
                    })
                );
            }
        }
    }

    #[test]
    fn test_startup_delay_boundary_is_inclusive() {
        let state = ReplicationState::Startup;
        assert!(evaluate_member(&member(state, 30), 30).is_pass());
        assert!(!evaluate_member(&member(state, 31), 30).is_pass());
    }

    #[test]
    fn test_zero_startup_delay_only_tolerates_zero_uptime() {
        let state = ReplicationState::Rollback;
        assert!(evaluate_member(&member(state, 0), 0).is_pass());
        assert!(!evaluate_member(&member(state, 1), 0).is_pass());
    }

    #[test]
    fn test_unhealthy_states_fail_closed() {
        use ReplicationState::*;

        for state in [Down, Removed, Unknown, Unrecognized(4), Unrecognized(99)] {
            for uptime in UPTIMES {
                assert_eq!(
                    evaluate_member(&member(state, uptime), DEFAULT_STARTUP_DELAY_SECS),
                    Verdict::Fail(HealthCheckError::UnacceptableState {
                        state,
                        uptime_secs: uptime
                    }),
                    "{state} at {uptime}s"
                );
            }
        }
    }

    #[test]
    fn test_startup2_within_grace_reports_state() {
        let verdict = evaluate_member(&member(ReplicationState::Startup2, 3600), 7200);
        assert_eq!(verdict, Verdict::pass_with_state(ReplicationState::Startup2));
    }

    #[test]
    fn test_startup2_past_grace_reason() {
        let verdict = evaluate_member(&member(ReplicationState::Startup2, 9000), 7200);
        let Verdict::Fail(reason) = verdict else {
            panic!("expected a failing verdict");
        };
        let message = reason.to_string();
        assert!(message.contains("STARTUP2"));
        assert!(message.contains("9000"));
        assert!(message.contains("7200"));
    }

    #[test]
    fn test_fresh_primary_passes() {
        let verdict = evaluate_member(&member(ReplicationState::Primary, 5), 7200);
        assert_eq!(verdict, Verdict::pass_with_state(ReplicationState::Primary));
    }

    #[test]
    fn test_router_snapshot() {
        assert_eq!(
            evaluate(&Snapshot::Router(RouterStatus::Reachable), 0),
            Verdict::pass()
        );
        assert_eq!(
            evaluate(&Snapshot::Router(RouterStatus::Unreachable("timed out".to_string())), 0),
            Verdict::Fail(HealthCheckError::Command("timed out".to_string()))
        );
    }
}
