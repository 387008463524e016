//! Pool configuration

use std::time::Duration;

/// Bounds of the process-wide connection pool
///
/// The defaults are the deployment constants: at least one connection kept
/// open, at most five, and five seconds to wait for a free one.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
	pub min_connections: u32,
	pub max_connections: u32,
	pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
	fn default() -> Self {
		Self {
			min_connections: 1,
			max_connections: 5,
			acquire_timeout: Duration::from_secs(5),
		}
	}
}

impl PoolConfig {
	/// Create a new pool configuration with default values
	///
	/// # Examples
	///
	/// ```rust
	/// use pgprovision_db::pool::PoolConfig;
	///
	/// let config = PoolConfig::new();
	/// assert_eq!(config.min_connections, 1);
	/// assert_eq!(config.max_connections, 5);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_connections(mut self, max: u32) -> Self {
		self.max_connections = max;
		self
	}

	pub fn with_min_connections(mut self, min: u32) -> Self {
		self.min_connections = min;
		self
	}

	pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
		self.acquire_timeout = timeout;
		self
	}

	pub fn validate(&self) -> Result<(), String> {
		if self.max_connections == 0 {
			return Err("max_connections must be > 0".to_string());
		}
		if self.max_connections < self.min_connections {
			return Err("max_connections must be >= min_connections".to_string());
		}
		Ok(())
	}
}
