//! Leased connections
//!
//! [`RoleConnection`] is the narrow surface the provisioner needs from a
//! database session. [`PgRoleConnection`] implements it over a pooled sqlx
//! connection and remembers whether the session is still usable.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{Postgres, raw_sql};

/// Errors raised by a leased connection
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConnectionError {
	/// Error reported by the database driver or server
	#[error(transparent)]
	Driver(#[from] sqlx::Error),

	/// Anything that did not come from the driver
	#[error("{0}")]
	Other(String),
}

impl ConnectionError {
	/// Whether this error originated in the database layer
	pub fn is_database(&self) -> bool {
		matches!(self, ConnectionError::Driver(_))
	}
}

/// A database session leased for one provisioning operation
#[async_trait]
pub trait RoleConnection: Send {
	/// Open a transaction
	async fn begin(&mut self) -> Result<(), ConnectionError>;

	/// Whether a role with this exact name exists
	async fn role_exists(&mut self, username: &str) -> Result<bool, ConnectionError>;

	/// Execute a utility statement that returns no rows
	async fn execute(&mut self, sql: &str) -> Result<(), ConnectionError>;

	/// Commit the open transaction
	async fn commit(&mut self) -> Result<(), ConnectionError>;

	/// Roll back the open transaction
	async fn rollback(&mut self) -> Result<(), ConnectionError>;

	/// Whether the session may go back to the pool
	fn is_healthy(&self) -> bool;

	/// Give up on a session whose lease was dropped mid-operation
	///
	/// Called instead of [`ConnectionProvider::release`] when the session may
	/// still hold an open transaction. The connection is dropped right after
	/// and must not go back to the pool.
	///
	/// [`ConnectionProvider::release`]: crate::provider::ConnectionProvider::release
	fn abandon(&mut self);
}

const ROLE_EXISTS_SQL: &str = "SELECT 1 FROM pg_catalog.pg_roles WHERE rolname = $1";

/// [`RoleConnection`] over a pooled PostgreSQL connection
pub struct PgRoleConnection {
	conn: PoolConnection<Postgres>,
	broken: bool,
}

impl PgRoleConnection {
	pub fn new(conn: PoolConnection<Postgres>) -> Self {
		Self {
			conn,
			broken: false,
		}
	}

	/// Give back the underlying pooled connection
	pub fn into_inner(self) -> PoolConnection<Postgres> {
		self.conn
	}

	fn track<T>(&mut self, result: Result<T, sqlx::Error>) -> Result<T, ConnectionError> {
		if let Err(err) = &result
			&& is_fatal(err)
		{
			self.broken = true;
		}
		result.map_err(ConnectionError::from)
	}
}

/// Errors after which the session state is unknown
fn is_fatal(err: &sqlx::Error) -> bool {
	matches!(
		err,
		sqlx::Error::Io(_)
			| sqlx::Error::Tls(_)
			| sqlx::Error::Protocol(_)
			| sqlx::Error::PoolClosed
			| sqlx::Error::WorkerCrashed
	)
}

#[async_trait]
impl RoleConnection for PgRoleConnection {
	async fn begin(&mut self) -> Result<(), ConnectionError> {
		let result = sqlx::Executor::execute(&mut *self.conn, raw_sql("BEGIN")).await.map(|_| ());
		self.track(result)
	}

	async fn role_exists(&mut self, username: &str) -> Result<bool, ConnectionError> {
		let result = sqlx::query_scalar::<_, i32>(ROLE_EXISTS_SQL)
			.bind(username)
			.fetch_optional(&mut *self.conn)
			.await;
		self.track(result).map(|row| row.is_some())
	}

	async fn execute(&mut self, sql: &str) -> Result<(), ConnectionError> {
		let result = sqlx::Executor::execute(&mut *self.conn, raw_sql(sql)).await.map(|_| ());
		self.track(result)
	}

	async fn commit(&mut self) -> Result<(), ConnectionError> {
		let result = sqlx::Executor::execute(&mut *self.conn, raw_sql("COMMIT")).await.map(|_| ());
		self.track(result)
	}

	async fn rollback(&mut self) -> Result<(), ConnectionError> {
		let result = sqlx::Executor::execute(&mut *self.conn, raw_sql("ROLLBACK")).await.map(|_| ());
		// A session whose rollback failed may still hold an open transaction.
		if result.is_err() {
			self.broken = true;
		}
		self.track(result)
	}

	fn is_healthy(&self) -> bool {
		!self.broken
	}

	fn abandon(&mut self) {
		self.broken = true;
		// The server rolls back whatever was open when the session ends.
		self.conn.close_on_drop();
	}
}
