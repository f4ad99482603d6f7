//! Readiness decisions
//!
//! Only routers have a readiness definition. A mongod readiness probe yields
//! [`Verdict::NotImplemented`] and never a pass: a probe that is wired up but
//! has no logic behind it has to be visible to the operator.

use crate::models::{RouterStatus, Verdict};

/// Readiness of a router from its capability command
pub fn evaluate_router(status: &RouterStatus) -> Verdict {
    status.verdict()
}

/// mongod readiness has no definition
pub fn evaluate_mongod() -> Verdict {
    Verdict::NotImplemented
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HealthCheckError;

    #[test]
    fn test_router_ready_when_capability_command_succeeds() {
        assert_eq!(evaluate_router(&RouterStatus::Reachable), Verdict::pass());
    }

    #[test]
    fn test_router_not_ready_reports_command_error() {
        let verdict = evaluate_router(&RouterStatus::Unreachable("not connected".to_string()));
        assert_eq!(
            verdict,
            Verdict::Fail(HealthCheckError::Command("not connected".to_string()))
        );
    }

    #[test]
    fn test_mongod_readiness_is_not_implemented() {
        let verdict = evaluate_mongod();
        assert_eq!(verdict, Verdict::NotImplemented);
        assert!(!verdict.is_pass());
    }
}
