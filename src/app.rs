//! Service assembly
//!
//! Wires the lazily-built pool, the provisioner and the create-user handler
//! together, and runs them behind the HTTP server.

use pgprovision_conf::{DatabaseSettings, ServerSettings};
use pgprovision_db::{LazyPgProvider, PoolConfig, RoleProvisioner};
use pgprovision_server::{CreateUserHandler, Handler, HttpServer, ShutdownCoordinator};
use std::sync::Arc;

/// The assembled service
///
/// Building an `App` opens no connections; the pool is created by the first
/// request that reaches the database.
pub struct App {
	provider: Arc<LazyPgProvider>,
	handler: Arc<dyn Handler>,
}

impl App {
	pub fn new(database: DatabaseSettings, pool: PoolConfig) -> Self {
		let database_name = database.name.clone();
		let provider = Arc::new(LazyPgProvider::new(database, pool));
		let provisioner = Arc::new(RoleProvisioner::new(Arc::clone(&provider), database_name));
		let handler: Arc<dyn Handler> = Arc::new(CreateUserHandler::new(provisioner));

		Self { provider, handler }
	}

	pub fn handler(&self) -> Arc<dyn Handler> {
		Arc::clone(&self.handler)
	}

	pub fn provider(&self) -> &Arc<LazyPgProvider> {
		&self.provider
	}

	/// Serve until `coordinator` requests shutdown, then close the pool
	pub async fn serve(
		self,
		server: &ServerSettings,
		coordinator: ShutdownCoordinator,
	) -> std::io::Result<()> {
		let result = HttpServer::new(self.handler())
			.listen_with_shutdown(server.bind, coordinator)
			.await;
		self.provider.close().await;
		result
	}
}
