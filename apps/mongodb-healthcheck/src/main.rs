//! MongoDB health check
//!
//! One-shot Kubernetes probe: connect to the local mongod or mongos, run one
//! status command, log one verdict line and exit with a matching code.

use std::process::ExitCode;

use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv, env_flag};
use database::mongodb::MongoConfig;
use domain_healthcheck::{
    ConnectionResolver, HealthCheckService, MongoCommandRunner, MongoConnectionProvider,
    TracingSink,
};
use eyre::{Result, WrapErr};
use tracing::error;

mod cli;
mod exit;

use cli::{Cli, Commands};
use exit::Outcome;

#[tokio::main]
async fn main() -> ExitCode {
    install_color_eyre();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let Some(outcome) = Outcome::from_cli_error(&e) else {
                e.exit()
            };
            init_tracing(&Environment::from_env(), env_flag("LOG_VERBOSE"));
            error!("Invalid command line: {}", e.render());
            return outcome.into();
        }
    };
    let verbose = cli.verbose || env_flag("LOG_VERBOSE");
    init_tracing(&Environment::from_env(), verbose);

    let outcome = match run(cli).await {
        Ok(outcome) => outcome,
        Err(report) => {
            error!("{:#}", report);
            Outcome::ConfigInvalid
        }
    };

    outcome.into()
}

async fn run(cli: Cli) -> Result<Outcome> {
    let Commands::K8s(args) = cli.command;
    let (probe, settings) = args.probe();

    let config = <MongoConfig as FromEnv>::from_env()
        .wrap_err("Invalid MongoDB connection settings")?;

    let resolver = ConnectionResolver::new(MongoConnectionProvider, TracingSink);
    let client = match resolver.resolve(&config).await {
        Ok(client) => client,
        Err(e) => return Ok(Outcome::from_error(&e)),
    };

    let service = HealthCheckService::new(MongoCommandRunner::new(client), settings);
    let result = service.check(args.component, probe).await;

    // Released before exiting on every path that opened a handle
    service.into_runner().shutdown().await;

    Ok(Outcome::from_result(&result))
}
