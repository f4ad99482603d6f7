//! Logging sink handed to the decision core
//!
//! The core never touches a global logger directly. Every observable step is
//! reported as a [`ProbeEvent`] to the sink it was constructed with; the
//! binary passes [`TracingSink`], tests pass a recorder.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::HealthCheckError;
use crate::models::{Component, ProbeKind, ReplicationState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    /// The TLS attempt failed; a plain attempt follows
    SecureConnectFailed { error: String },
    /// The plain attempt failed too; no verdict will be produced
    PlainConnectFailed { error: String },
    Connected { tls: bool },
    CheckStarted {
        component: Component,
        probe: ProbeKind,
    },
    Passed {
        component: Component,
        probe: ProbeKind,
        state: Option<ReplicationState>,
    },
    Failed {
        component: Component,
        probe: ProbeKind,
        reason: String,
    },
    NotImplemented {
        component: Component,
        probe: ProbeKind,
    },
    /// The check could not reach a verdict
    Aborted {
        component: Component,
        probe: ProbeKind,
        error: String,
    },
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: ProbeEvent);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn record(&self, event: ProbeEvent) {
        (**self).record(event)
    }
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: ProbeEvent) {
        match event {
            ProbeEvent::SecureConnectFailed { error } => {
                warn!(%error, "ssl connection error, retrying without TLS");
            }
            ProbeEvent::PlainConnectFailed { error } => {
                error!(%error, "Error connecting to mongodb");
            }
            ProbeEvent::Connected { tls } => {
                debug!(tls, "Connected to mongodb");
            }
            ProbeEvent::CheckStarted { component, probe } => {
                info!("Running Kubernetes {} check for {}", probe, component);
            }
            ProbeEvent::Passed {
                component,
                probe,
                state: Some(state),
            } => {
                info!(
                    %component,
                    "Member passed Kubernetes {} check with replication state: {}", probe, state
                );
            }
            ProbeEvent::Passed {
                component,
                probe,
                state: None,
            } => {
                info!("{} passed Kubernetes {} check", component, probe);
            }
            ProbeEvent::Failed {
                component,
                probe,
                reason,
            } => {
                warn!(%component, %probe, "{}", reason);
            }
            ProbeEvent::NotImplemented { component, probe } => {
                let err = HealthCheckError::NotImplemented { component, probe };
                error!("{}", err);
            }
            ProbeEvent::Aborted {
                component,
                probe,
                error,
            } => {
                error!(%component, %probe, %error, "Health check aborted");
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Keeps every recorded event in memory
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<ProbeEvent>>,
    }

    impl RecordingSink {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn events(&self) -> Vec<ProbeEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn record(&self, event: ProbeEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
