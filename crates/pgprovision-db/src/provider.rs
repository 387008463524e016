//! Connection provider
//!
//! The pool is built on first [`ConnectionProvider::acquire`] and shared by
//! every request for the rest of the process. Callers only ever see leased
//! connections; the pool itself stays private.

use crate::connection::{PgRoleConnection, RoleConnection};
use crate::pool::{PoolConfig, PoolError, PoolResult};
use async_trait::async_trait;
use pgprovision_conf::DatabaseSettings;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;

/// Source of leased connections
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
	type Connection: RoleConnection;

	/// Lease a connection, waiting at most the pool's acquire timeout
	async fn acquire(&self) -> PoolResult<Self::Connection>;

	/// Return a leased connection, discarding it if it is no longer healthy
	async fn release(&self, conn: Self::Connection);
}

/// Process-wide PostgreSQL pool, created on first use
///
/// Concurrent first callers wait on the same initialization; a failed
/// initialization leaves the cell empty so the next call retries.
pub struct LazyPgProvider {
	settings: DatabaseSettings,
	config: PoolConfig,
	pool: OnceCell<PgPool>,
}

impl LazyPgProvider {
	pub fn new(settings: DatabaseSettings, config: PoolConfig) -> Self {
		Self {
			settings,
			config,
			pool: OnceCell::new(),
		}
	}

	/// Name of the database roles are granted access to
	pub fn database_name(&self) -> &str {
		&self.settings.name
	}

	/// Whether the pool has been built yet
	pub fn is_initialized(&self) -> bool {
		self.pool.initialized()
	}

	async fn pool(&self) -> PoolResult<&PgPool> {
		self.pool
			.get_or_try_init(|| async {
				self.config.validate().map_err(PoolError::Config)?;

				tracing::info!(
					url = %self.settings.masked_url(),
					min = self.config.min_connections,
					max = self.config.max_connections,
					"Creating database connection pool"
				);

				let url = self.settings.to_url();
				PgPoolOptions::new()
					.min_connections(self.config.min_connections)
					.max_connections(self.config.max_connections)
					.acquire_timeout(self.config.acquire_timeout)
					.connect(url.expose_secret())
					.await
					.map_err(|e| self.map_sqlx_error(e))
			})
			.await
	}

	fn map_sqlx_error(&self, err: sqlx::Error) -> PoolError {
		match err {
			sqlx::Error::PoolTimedOut => PoolError::Exhausted(self.config.acquire_timeout),
			other => PoolError::ConnectionFailed(other.to_string()),
		}
	}

	/// Close every pooled connection
	///
	/// Does nothing if the pool was never built.
	pub async fn close(&self) {
		if let Some(pool) = self.pool.get() {
			tracing::info!("Closing database connection pool");
			pool.close().await;
		}
	}
}

#[async_trait]
impl ConnectionProvider for LazyPgProvider {
	type Connection = PgRoleConnection;

	async fn acquire(&self) -> PoolResult<PgRoleConnection> {
		let pool = self.pool().await?;
		let conn = pool.acquire().await.map_err(|e| self.map_sqlx_error(e))?;
		Ok(PgRoleConnection::new(conn))
	}

	async fn release(&self, conn: PgRoleConnection) {
		if conn.is_healthy() {
			// Dropping a PoolConnection hands it back to the pool.
			drop(conn.into_inner());
			return;
		}

		tracing::warn!("Discarding broken database connection");
		if let Err(e) = conn.into_inner().close().await {
			tracing::warn!(error = %e, "Failed to close broken database connection");
		}
	}
}
