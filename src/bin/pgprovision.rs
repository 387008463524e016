//! pgprovision server binary
//!
//! Reads database settings from `PGHOST`, `PGDATABASE`, `PGUSER` and
//! `PGPASSWORD`, then serves `POST /api/create_user` until Ctrl-C or SIGTERM.

use anyhow::Context;
use clap::Parser;
use pgprovision::App;
use pgprovision_conf::{DatabaseSettings, Env, ServerSettings};
use pgprovision_db::PoolConfig;
use pgprovision_server::{ShutdownCoordinator, shutdown_signal};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pgprovision", version, about = "Provision PostgreSQL login roles over HTTP")]
struct Cli {
	#[command(flatten)]
	server: ServerSettings,

	/// tracing filter directives, e.g. `info,pgprovision_db=debug`
	#[arg(long, env = "PGPROVISION_LOG", default_value = "info")]
	log_filter: String,
}

fn init_tracing(filter: &str) -> anyhow::Result<()> {
	let filter = EnvFilter::try_new(filter).context("invalid log filter")?;
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(true)
		.try_init()
		.map_err(|e| anyhow::anyhow!(e))
		.context("failed to install tracing subscriber")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	init_tracing(&cli.log_filter)?;

	let database = DatabaseSettings::from_env(&Env::new())
		.context("database configuration is incomplete")?;
	tracing::info!(database = %database.masked_url(), "Loaded database settings");

	let app = App::new(database, PoolConfig::default());
	let coordinator = ShutdownCoordinator::new(cli.server.shutdown_grace());

	let signal_coordinator = coordinator.clone();
	tokio::spawn(async move {
		shutdown_signal().await;
		signal_coordinator.shutdown();
	});

	app.serve(&cli.server, coordinator)
		.await
		.with_context(|| format!("server on {} failed", cli.server.bind))?;

	tracing::info!("Shut down cleanly");
	Ok(())
}
