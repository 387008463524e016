//! Settings module

mod database_config;
mod env;
mod server_config;

pub use database_config::{DEFAULT_POSTGRES_PORT, DatabaseSettings};
pub use env::{Env, EnvError, validate_env_var_name};
pub use server_config::ServerSettings;
