//! Scripted connection fakes
//!
//! A [`FakeProvider`] hands out [`FakeConnection`]s that follow a [`Script`]
//! and write everything they see into a shared [`Journal`]. Roles created by
//! a committed transaction are remembered, so provisioning the same name
//! twice behaves like a real server.

use async_trait::async_trait;
use pgprovision_db::{ConnectionError, ConnectionProvider, PoolError, RoleConnection};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// A point in the provisioning conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	Begin,
	RoleExists,
	/// The n-th executed statement (0 is CREATE ROLE, grants follow)
	Execute(usize),
	Commit,
	Rollback,
}

/// How a scripted failure presents itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
	/// A driver error; also breaks the connection
	Database,
	/// A non-driver error
	Other,
	/// A panic inside the call
	Panic,
	/// The call never completes
	Stall,
}

/// What the fake database should do
#[derive(Debug, Clone, Default)]
pub struct Script {
	/// Roles that exist before the test starts
	pub existing_roles: Vec<String>,
	/// Fail once this step is reached
	pub fail_at: Option<(Step, FailureKind)>,
	/// Fail every acquire with this error
	pub acquire_error: Option<PoolError>,
}

impl Script {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_existing_role(mut self, name: impl Into<String>) -> Self {
		self.existing_roles.push(name.into());
		self
	}

	pub fn fail_at(mut self, step: Step, kind: FailureKind) -> Self {
		self.fail_at = Some((step, kind));
		self
	}

	pub fn fail_acquire(mut self, err: PoolError) -> Self {
		self.acquire_error = Some(err);
		self
	}
}

/// Everything the fake observed
#[derive(Debug, Clone, Default)]
pub struct Journal {
	/// Executed statements, in order (BEGIN/COMMIT/ROLLBACK excluded)
	pub statements: Vec<String>,
	/// Names looked up in the role catalog
	pub lookups: Vec<String>,
	pub begins: usize,
	pub commits: usize,
	pub rollbacks: usize,
	pub acquires: usize,
	/// Connections handed back healthy
	pub releases: usize,
	/// Connections handed back broken
	pub discards: usize,
	/// Connections given up on after their lease was dropped
	pub abandons: usize,
	/// Roles visible to new transactions
	pub roles: BTreeSet<String>,
}

impl Journal {
	/// Statements that create roles
	pub fn create_statements(&self) -> Vec<&str> {
		self.statements
			.iter()
			.filter(|s| s.starts_with("CREATE ROLE"))
			.map(String::as_str)
			.collect()
	}

	/// Statements that grant privileges
	pub fn grant_statements(&self) -> Vec<&str> {
		self.statements
			.iter()
			.filter(|s| s.starts_with("GRANT"))
			.map(String::as_str)
			.collect()
	}
}

fn lock(journal: &Mutex<Journal>) -> MutexGuard<'_, Journal> {
	journal.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Scripted [`ConnectionProvider`]
#[derive(Debug, Clone)]
pub struct FakeProvider {
	script: Script,
	journal: Arc<Mutex<Journal>>,
}

impl FakeProvider {
	pub fn new(script: Script) -> Self {
		let journal = Journal {
			roles: script.existing_roles.iter().cloned().collect(),
			..Journal::default()
		};
		Self {
			script,
			journal: Arc::new(Mutex::new(journal)),
		}
	}

	/// Snapshot of the journal
	pub fn journal(&self) -> Journal {
		lock(&self.journal).clone()
	}

	/// Replace the script for connections acquired from now on
	pub fn set_script(&mut self, script: Script) {
		self.script = script;
	}
}

impl Default for FakeProvider {
	fn default() -> Self {
		Self::new(Script::default())
	}
}

#[async_trait]
impl ConnectionProvider for FakeProvider {
	type Connection = FakeConnection;

	async fn acquire(&self) -> Result<FakeConnection, PoolError> {
		if let Some(err) = &self.script.acquire_error {
			return Err(err.clone());
		}
		lock(&self.journal).acquires += 1;
		Ok(FakeConnection {
			script: self.script.clone(),
			journal: Arc::clone(&self.journal),
			executed: 0,
			pending_roles: Vec::new(),
			broken: false,
		})
	}

	async fn release(&self, conn: FakeConnection) {
		let mut journal = lock(&self.journal);
		if conn.broken {
			journal.discards += 1;
		} else {
			journal.releases += 1;
		}
	}
}

/// Scripted [`RoleConnection`]
#[derive(Debug)]
pub struct FakeConnection {
	script: Script,
	journal: Arc<Mutex<Journal>>,
	executed: usize,
	pending_roles: Vec<String>,
	broken: bool,
}

impl FakeConnection {
	fn check(&mut self, step: Step) -> Result<(), ConnectionError> {
		match self.script.fail_at {
			Some((at, kind)) if at == step => match kind {
				FailureKind::Database => {
					self.broken = true;
					Err(ConnectionError::Driver(sqlx::Error::Protocol(format!(
						"scripted failure at {:?}",
						step
					))))
				}
				FailureKind::Other => Err(ConnectionError::Other(format!(
					"scripted failure at {:?}",
					step
				))),
				FailureKind::Panic => panic!("scripted panic at {:?}", step),
				FailureKind::Stall => Ok(()),
			},
			_ => Ok(()),
		}
	}

	/// Hang forever if the script stalls here, otherwise [`Self::check`]
	async fn enter(&mut self, step: Step) -> Result<(), ConnectionError> {
		if self.script.fail_at == Some((step, FailureKind::Stall)) {
			std::future::pending::<()>().await;
		}
		self.check(step)
	}
}

fn created_role_name(sql: &str) -> Option<String> {
	let rest = sql.strip_prefix("CREATE ROLE \"")?;
	let end = rest.find('"')?;
	Some(rest[..end].to_string())
}

#[async_trait]
impl RoleConnection for FakeConnection {
	async fn begin(&mut self) -> Result<(), ConnectionError> {
		self.enter(Step::Begin).await?;
		lock(&self.journal).begins += 1;
		Ok(())
	}

	async fn role_exists(&mut self, username: &str) -> Result<bool, ConnectionError> {
		self.enter(Step::RoleExists).await?;
		let mut journal = lock(&self.journal);
		journal.lookups.push(username.to_string());
		Ok(journal.roles.contains(username))
	}

	async fn execute(&mut self, sql: &str) -> Result<(), ConnectionError> {
		let step = Step::Execute(self.executed);
		self.executed += 1;
		self.enter(step).await?;

		let mut journal = lock(&self.journal);
		if let Some(name) = created_role_name(sql) {
			if journal.roles.contains(&name) {
				return Err(ConnectionError::Driver(sqlx::Error::Protocol(format!(
					"role \"{}\" already exists",
					name
				))));
			}
			self.pending_roles.push(name);
		}
		journal.statements.push(sql.to_string());
		Ok(())
	}

	async fn commit(&mut self) -> Result<(), ConnectionError> {
		self.enter(Step::Commit).await?;
		let mut journal = lock(&self.journal);
		journal.commits += 1;
		journal.roles.extend(self.pending_roles.drain(..));
		Ok(())
	}

	async fn rollback(&mut self) -> Result<(), ConnectionError> {
		lock(&self.journal).rollbacks += 1;
		self.pending_roles.clear();
		if let Err(e) = self.check(Step::Rollback) {
			self.broken = true;
			return Err(e);
		}
		Ok(())
	}

	fn is_healthy(&self) -> bool {
		!self.broken
	}

	fn abandon(&mut self) {
		self.broken = true;
		self.pending_roles.clear();
		lock(&self.journal).abandons += 1;
	}
}
