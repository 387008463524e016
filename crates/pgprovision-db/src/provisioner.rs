//! Role provisioning
//!
//! [`RoleProvisioner::provision`] runs the whole create-role workflow on one
//! leased connection inside one transaction:
//!
//! 1. `BEGIN`
//! 2. look the role up in `pg_catalog.pg_roles`; stop with 409 if it exists
//! 3. `CREATE ROLE ... WITH LOGIN PASSWORD ...`
//! 4. the tier's GRANT statements, in order
//! 5. `COMMIT`
//!
//! Any failure rolls back and is reported as a [`ProvisionResult`]; nothing
//! escapes as an `Err` or a panic. The connection goes back to the provider
//! exactly once on every path. If the future is dropped before it finishes,
//! the connection is abandoned and closed instead, so a half-built role can
//! never be committed by a later request on the same session.
//!
//! The existence check and the creation are not atomic across concurrent
//! requests. Two requests racing on one name both pass step 2, and the loser
//! fails in step 3 with a duplicate-role error reported as a database error.

use crate::connection::{ConnectionError, RoleConnection};
use crate::policy::grants_for;
use crate::pool::PoolError;
use crate::provider::ConnectionProvider;
use futures::FutureExt;
use pgprovision_core::exception::Error;
use pgprovision_core::tier::PrivilegeTier;
use pgprovision_core::validators::check_username;
use pgprovision_query::backend::{PostgresQueryBuilder, QueryBuilder};
use pgprovision_query::dcl::{CreateRoleStatement, RoleAttribute};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// How a provisioning attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
	Created,
	AlreadyExists,
	ValidationFailed,
	DatabaseError,
	UnexpectedError,
}

/// Result of one provisioning attempt, ready to be turned into a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionResult {
	pub outcome: ProvisionOutcome,
	pub message: String,
	pub status_code: u16,
}

impl ProvisionResult {
	fn created(username: &str, tier: PrivilegeTier) -> Self {
		Self {
			outcome: ProvisionOutcome::Created,
			message: format!("User '{}' created successfully with {} privileges", username, tier),
			status_code: 201,
		}
	}

	fn from_error(err: &Error) -> Self {
		let outcome = match err {
			Error::Validation(_) => ProvisionOutcome::ValidationFailed,
			Error::Conflict(_) => ProvisionOutcome::AlreadyExists,
			Error::Database(_) => ProvisionOutcome::DatabaseError,
			Error::Unexpected(_) => ProvisionOutcome::UnexpectedError,
		};
		Self {
			outcome,
			message: err.to_string(),
			status_code: err.status_code(),
		}
	}

	pub fn is_success(&self) -> bool {
		self.outcome == ProvisionOutcome::Created
	}
}

fn connection_error(err: ConnectionError) -> Error {
	if err.is_database() {
		Error::Database(err.to_string())
	} else {
		Error::Unexpected(err.to_string())
	}
}

fn pool_error(err: PoolError) -> Error {
	match err {
		PoolError::Exhausted(_) | PoolError::ConnectionFailed(_) => Error::Database(err.to_string()),
		other => Error::Unexpected(other.to_string()),
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		(*s).to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"panic during provisioning".to_string()
	}
}

/// A leased connection that is handed back exactly once
///
/// [`Lease::release`] returns it to the provider. Dropping the lease without
/// releasing it abandons the connection.
struct Lease<P: ConnectionProvider> {
	provider: Arc<P>,
	conn: Option<P::Connection>,
}

impl<P: ConnectionProvider> Lease<P> {
	fn new(provider: Arc<P>, conn: P::Connection) -> Self {
		Self {
			provider,
			conn: Some(conn),
		}
	}

	fn connection(&mut self) -> Result<&mut P::Connection, Error> {
		self.conn
			.as_mut()
			.ok_or_else(|| Error::Unexpected("connection already released".to_string()))
	}

	async fn release(mut self) {
		if let Some(conn) = self.conn.take() {
			self.provider.release(conn).await;
		}
	}
}

impl<P: ConnectionProvider> Drop for Lease<P> {
	fn drop(&mut self) {
		if let Some(mut conn) = self.conn.take() {
			tracing::warn!("Provisioning cancelled, abandoning database connection");
			conn.abandon();
		}
	}
}

/// Creates login roles and grants them a privilege tier
pub struct RoleProvisioner<P> {
	provider: Arc<P>,
	database: String,
	builder: PostgresQueryBuilder,
}

impl<P: ConnectionProvider> RoleProvisioner<P> {
	/// `database` is the database the grants refer to
	pub fn new(provider: Arc<P>, database: impl Into<String>) -> Self {
		Self {
			provider,
			database: database.into(),
			builder: PostgresQueryBuilder::new(),
		}
	}

	pub fn provider(&self) -> &Arc<P> {
		&self.provider
	}

	pub fn database(&self) -> &str {
		&self.database
	}

	/// Create `username` with `password` and grant it `tier`
	///
	/// `None` grants [`PrivilegeTier::Full`].
	pub async fn provision(
		&self,
		username: &str,
		password: &str,
		tier: Option<PrivilegeTier>,
	) -> ProvisionResult {
		let tier = tier.unwrap_or(PrivilegeTier::Full);

		// The username ends up in identifier position.
		if let Err(e) = check_username(username) {
			tracing::warn!(error = %e, "Refusing to provision role with invalid name");
			return ProvisionResult::from_error(&Error::from(e));
		}

		tracing::info!(username, %tier, "Provisioning role");

		let mut lease = match self.provider.acquire().await {
			Ok(conn) => Lease::new(Arc::clone(&self.provider), conn),
			Err(e) => {
				tracing::error!(error = %e, "Could not acquire database connection");
				return ProvisionResult::from_error(&pool_error(e));
			}
		};

		let body = AssertUnwindSafe(self.run(&mut lease, username, password, tier))
			.catch_unwind()
			.await;

		let result = match body {
			Ok(Ok(())) => {
				tracing::info!(username, %tier, "Role created");
				ProvisionResult::created(username, tier)
			}
			Ok(Err(err @ Error::Conflict(_))) => {
				tracing::warn!(username, "Role already exists");
				ProvisionResult::from_error(&err)
			}
			Ok(Err(err)) => {
				tracing::error!(username, error = %err, "Provisioning failed");
				self.rollback(&mut lease).await;
				ProvisionResult::from_error(&err)
			}
			Err(payload) => {
				let err = Error::Unexpected(panic_message(payload.as_ref()));
				tracing::error!(username, error = %err, "Provisioning panicked");
				self.rollback(&mut lease).await;
				ProvisionResult::from_error(&err)
			}
		};

		lease.release().await;
		result
	}

	async fn run(
		&self,
		lease: &mut Lease<P>,
		username: &str,
		password: &str,
		tier: PrivilegeTier,
	) -> Result<(), Error> {
		let conn = lease.connection()?;
		conn.begin().await.map_err(connection_error)?;

		if conn.role_exists(username).await.map_err(connection_error)? {
			self.rollback(lease).await;
			return Err(Error::Conflict(format!("User '{}' already exists", username)));
		}

		let create = CreateRoleStatement::new()
			.role(username)
			.attribute(RoleAttribute::Login)
			.attribute(RoleAttribute::Password(password.to_string()));
		create.validate().map_err(Error::Unexpected)?;
		tracing::debug!(sql = %self.builder.build_create_role(&create.redacted()), "Executing");

		let conn = lease.connection()?;
		conn.execute(&self.builder.build_create_role(&create))
			.await
			.map_err(connection_error)?;

		for sql in grants_for(tier, &self.database, username) {
			tracing::debug!(sql = %sql, "Executing");
			conn.execute(&sql).await.map_err(connection_error)?;
		}

		conn.commit().await.map_err(connection_error)
	}

	async fn rollback(&self, lease: &mut Lease<P>) {
		let Ok(conn) = lease.connection() else {
			return;
		};
		if let Err(e) = conn.rollback().await {
			tracing::warn!(error = %e, "Rollback failed");
		}
	}
}
