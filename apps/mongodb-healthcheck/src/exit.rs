//! Process exit codes
//!
//! Orchestrators only look at zero versus non-zero. The distinct non-zero
//! codes let an operator tell an unhealthy node from a probe that cannot run.

use std::process::ExitCode;

use clap::error::ErrorKind;
use domain_healthcheck::{HealthCheckError, HealthCheckResult, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Healthy,
    Unhealthy,
    /// Neither the secure nor the plain connection succeeded
    ConnectionFailed,
    /// The probe has no decision logic for the component
    NotImplemented,
    /// The status command could not be issued at all
    CommandFailed,
    /// Invalid environment configuration or command line
    ConfigInvalid,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Self::Healthy => 0,
            Self::Unhealthy => 1,
            Self::ConnectionFailed => 2,
            Self::NotImplemented => 3,
            Self::CommandFailed => 4,
            Self::ConfigInvalid => 5,
        }
    }

    pub fn from_result(result: &HealthCheckResult<Verdict>) -> Self {
        match result {
            Ok(Verdict::Pass { .. }) => Self::Healthy,
            Ok(Verdict::Fail(_)) => Self::Unhealthy,
            Ok(Verdict::NotImplemented) => Self::NotImplemented,
            Err(e) => Self::from_error(e),
        }
    }

    /// Outcome of a command line that did not parse
    ///
    /// `None` for `--help` and `--version`, which are not failures. Everything
    /// else is a misconfigured probe and must not share a code with an
    /// unreachable node.
    pub fn from_cli_error(error: &clap::Error) -> Option<Self> {
        match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => None,
            _ => Some(Self::ConfigInvalid),
        }
    }

    pub fn from_error(error: &HealthCheckError) -> Self {
        match error {
            HealthCheckError::Connection { .. } => Self::ConnectionFailed,
            HealthCheckError::Command(_) => Self::CommandFailed,
            HealthCheckError::NotImplemented { .. } => Self::NotImplemented,
            HealthCheckError::UnacceptableState { .. }
            | HealthCheckError::StartupDelayExceeded { .. } => Self::Unhealthy,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}
