//! Pool bounds and pool errors

mod config;

pub use config::PoolConfig;

/// Errors raised while obtaining a connection
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum PoolError {
	/// No connection became free before the acquire timeout elapsed
	#[error("connection pool exhausted: no connection available within {0:?}")]
	Exhausted(std::time::Duration),

	/// The driver could not establish a connection
	#[error("failed to connect to database: {0}")]
	ConnectionFailed(String),

	/// The pool bounds are inconsistent
	#[error("invalid pool configuration: {0}")]
	Config(String),
}

pub type PoolResult<T> = Result<T, PoolError>;
