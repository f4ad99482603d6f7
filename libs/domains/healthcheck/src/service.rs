//! Health check service - runs one probe against one open handle

use tracing::instrument;

use crate::error::HealthCheckResult;
use crate::events::{EventSink, ProbeEvent, TracingSink};
use crate::models::{Component, ProbeKind, ProbeSettings, Verdict};
use crate::runner::CommandRunner;
use crate::{inspector, liveness, readiness};

/// Health check service
///
/// Holds no state between calls: every check issues a fresh status command
/// and derives the verdict from that reply alone.
pub struct HealthCheckService<R: CommandRunner, S: EventSink = TracingSink> {
    runner: R,
    sink: S,
    settings: ProbeSettings,
}

impl<R: CommandRunner> HealthCheckService<R, TracingSink> {
    /// Create a service that logs through `tracing`
    pub fn new(runner: R, settings: ProbeSettings) -> Self {
        Self::with_sink(runner, TracingSink, settings)
    }
}

impl<R: CommandRunner, S: EventSink> HealthCheckService<R, S> {
    pub fn with_sink(runner: R, sink: S, settings: ProbeSettings) -> Self {
        Self {
            runner,
            sink,
            settings,
        }
    }

    /// Give the handle back so the caller can release it
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Run one probe and report its outcome to the sink
    ///
    /// `Ok` carries the verdict. `Err` means no verdict could be reached:
    /// the mongod status command could not be issued at all.
    #[instrument(skip(self))]
    pub async fn check(&self, component: Component, probe: ProbeKind) -> HealthCheckResult<Verdict> {
        self.sink.record(ProbeEvent::CheckStarted { component, probe });

        let outcome = match probe {
            ProbeKind::Liveness => self.liveness(component).await,
            ProbeKind::Readiness => self.readiness(component).await,
        };

        let event = match &outcome {
            Ok(Verdict::Pass { state }) => ProbeEvent::Passed {
                component,
                probe,
                state: *state,
            },
            Ok(Verdict::Fail(reason)) => ProbeEvent::Failed {
                component,
                probe,
                reason: reason.to_string(),
            },
            Ok(Verdict::NotImplemented) => ProbeEvent::NotImplemented { component, probe },
            Err(e) => ProbeEvent::Aborted {
                component,
                probe,
                error: e.to_string(),
            },
        };
        self.sink.record(event);

        outcome
    }

    /// Is the process alive
    pub async fn liveness(&self, component: Component) -> HealthCheckResult<Verdict> {
        let snapshot = inspector::inspect(&self.runner, component).await?;
        Ok(liveness::evaluate(&snapshot, self.settings.startup_delay_secs))
    }

    /// Should the process receive traffic
    pub async fn readiness(&self, component: Component) -> HealthCheckResult<Verdict> {
        match component {
            Component::Mongod => Ok(readiness::evaluate_mongod()),
            Component::Mongos => {
                let status = inspector::inspect_routing(&self.runner).await;
                Ok(readiness::evaluate_router(&status))
            }
        }
    }
}
