//! Command line interface
//!
//! ```text
//! mongodb-healthcheck [--verbose] k8s [--component mongod|mongos] [liveness [--startupDelaySeconds N] | readiness]
//! ```

use std::sync::LazyLock;

use clap::{Args, Parser, Subcommand};
use domain_healthcheck::{Component, DEFAULT_STARTUP_DELAY_SECS, ProbeKind, ProbeSettings};

/// Version line including the commit and branch the binary was built from
static VERSION: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{}\ngit commit {}, branch {}",
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_COMMIT").unwrap_or("unknown"),
        option_env!("GIT_BRANCH").unwrap_or("unknown"),
    )
});

#[derive(Debug, Parser)]
#[command(name = "mongodb-healthcheck")]
#[command(about = "Performs health and readiness checks for MongoDB")]
#[command(version = VERSION.as_str())]
pub struct Cli {
    /// Enable verbose logging (also LOG_VERBOSE=true)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Performs liveness and readiness checks for MongoDB on Kubernetes
    K8s(K8sArgs),
}

#[derive(Debug, Args)]
pub struct K8sArgs {
    /// Component to check (mongod or mongos)
    #[arg(long, global = true, default_value_t = Component::Mongod)]
    pub component: Component,

    /// Probe to run. Defaults to liveness.
    #[command(subcommand)]
    pub probe: Option<ProbeCommand>,
}

#[derive(Debug, Subcommand)]
pub enum ProbeCommand {
    /// Run a liveness check of MongoDB
    Liveness {
        /// Seconds after start during which STARTUP, STARTUP2 and ROLLBACK still pass
        #[arg(
            long = "startupDelaySeconds",
            visible_alias = "startup-delay-seconds",
            default_value_t = DEFAULT_STARTUP_DELAY_SECS
        )]
        startup_delay_seconds: u64,
    },

    /// Run a readiness check of MongoDB
    Readiness,
}

impl K8sArgs {
    /// Probe kind and decision settings selected on the command line
    pub fn probe(&self) -> (ProbeKind, ProbeSettings) {
        match self.probe {
            None => (ProbeKind::Liveness, ProbeSettings::default()),
            Some(ProbeCommand::Liveness {
                startup_delay_seconds,
            }) => (
                ProbeKind::Liveness,
                ProbeSettings {
                    startup_delay_secs: startup_delay_seconds,
                },
            ),
            Some(ProbeCommand::Readiness) => (ProbeKind::Readiness, ProbeSettings::default()),
        }
    }
}
