//! # pgprovision-db
//!
//! Everything that touches the target PostgreSQL server:
//!
//! - [`pool`]: pool bounds and pool errors
//! - [`connection`]: the [`RoleConnection`] seam and its sqlx implementation
//! - [`provider`]: the [`ConnectionProvider`] seam and the lazily-built
//!   process-wide pool
//! - [`policy`]: privilege tier to GRANT statement mapping
//! - [`provisioner`]: the transactional create-role workflow
//!
//! The provisioner only sees the two traits, so tests drive it with scripted
//! fakes and production drives it with [`LazyPgProvider`].

pub mod connection;
pub mod policy;
pub mod pool;
pub mod provider;
pub mod provisioner;

pub use connection::{ConnectionError, PgRoleConnection, RoleConnection};
pub use policy::grants_for;
pub use pool::{PoolConfig, PoolError};
pub use provider::{ConnectionProvider, LazyPgProvider};
pub use provisioner::{ProvisionOutcome, ProvisionResult, RoleProvisioner};
