//! Secure-then-plain connection resolution
//!
//! Some deployments run probes against nodes with self-signed or absent
//! certificates. The resolver therefore makes exactly two ordered attempts:
//! TLS with relaxed certificate validation, then plain. The downgrade is
//! reported through the event sink every time it happens.

use std::fmt::Display;

use async_trait::async_trait;

use crate::error::{HealthCheckError, HealthCheckResult};
use crate::events::{EventSink, ProbeEvent};

/// Opens handles for the two connection variants
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    type Config: Sync;
    type Handle: Send;
    type Error: Display + Send;

    async fn open_secure(&self, config: &Self::Config) -> Result<Self::Handle, Self::Error>;

    async fn open_plain(&self, config: &Self::Config) -> Result<Self::Handle, Self::Error>;
}

pub struct ConnectionResolver<P, S> {
    provider: P,
    sink: S,
}

impl<P, S> ConnectionResolver<P, S>
where
    P: ConnectionProvider,
    S: EventSink,
{
    pub fn new(provider: P, sink: S) -> Self {
        Self { provider, sink }
    }

    /// Obtain a handle, preferring TLS
    ///
    /// Any failure of the secure attempt (handshake or otherwise) leads to
    /// one plain attempt. The secure path is never tried again.
    pub async fn resolve(&self, config: &P::Config) -> HealthCheckResult<P::Handle> {
        let secure_error = match self.provider.open_secure(config).await {
            Ok(handle) => {
                self.sink.record(ProbeEvent::Connected { tls: true });
                return Ok(handle);
            }
            Err(e) => e.to_string(),
        };
        self.sink.record(ProbeEvent::SecureConnectFailed {
            error: secure_error.clone(),
        });

        match self.provider.open_plain(config).await {
            Ok(handle) => {
                self.sink.record(ProbeEvent::Connected { tls: false });
                Ok(handle)
            }
            Err(e) => {
                let plain_error = e.to_string();
                self.sink.record(ProbeEvent::PlainConnectFailed {
                    error: plain_error.clone(),
                });
                Err(HealthCheckError::Connection {
                    secure: secure_error,
                    plain: plain_error,
                })
            }
        }
    }
}
