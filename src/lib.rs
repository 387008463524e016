//! # pgprovision
//!
//! HTTP service that creates PostgreSQL login roles and grants them one of
//! three fixed privilege tiers (`readonly`, `readwrite`, `full`).
//!
//! ```text
//! POST /api/create_user
//! {"username": "report_reader", "password": "Passw0rd!", "privileges": "readonly"}
//! ```
//!
//! The workspace is split the usual way:
//!
//! - [`core`]: validators, privilege tiers, error taxonomy
//! - [`conf`]: environment and command-line settings
//! - [`query`]: DCL statement builders rendered for PostgreSQL
//! - [`db`]: pool, privilege policy and the transactional provisioner
//! - [`server`]: hyper server and the create-user handler
//!
//! [`app::App`] assembles them; the `pgprovision` binary runs it.

pub mod app;

pub use pgprovision_conf as conf;
pub use pgprovision_core as core;
pub use pgprovision_db as db;
pub use pgprovision_query as query;
pub use pgprovision_server as server;

pub use app::App;

/// Re-export commonly used types
pub mod prelude {
	pub use crate::app::App;
	pub use pgprovision_conf::{DatabaseSettings, Env, ServerSettings};
	pub use pgprovision_core::{Error, PrivilegeTier};
	pub use pgprovision_db::{PoolConfig, ProvisionOutcome, ProvisionResult, RoleProvisioner};
	pub use pgprovision_server::{Handler, HttpServer, ShutdownCoordinator};
}
