//! # pgprovision-conf
//!
//! Process-wide configuration, read once at startup.
//!
//! - [`settings::Env`]: required environment variable reader
//! - [`settings::DatabaseSettings`]: connection parameters for the target
//!   PostgreSQL server (`PGHOST`, `PGDATABASE`, `PGUSER`, `PGPASSWORD`)
//! - [`settings::ServerSettings`]: listener address and shutdown grace period

pub mod settings;

pub use settings::{DatabaseSettings, Env, EnvError, ServerSettings};
