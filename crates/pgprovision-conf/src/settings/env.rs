//! Environment variable lookups

use std::env;

/// Reader for required environment variables
///
/// # Examples
///
/// ```
/// use pgprovision_conf::{Env, EnvError};
///
/// let err = Env::new().str("PGPROVISION_UNSET_FOR_DOCTEST").unwrap_err();
/// assert!(matches!(err, EnvError::MissingVariable(_)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Env;

impl Env {
	pub fn new() -> Self {
		Self
	}

	/// Read a variable that must be present
	///
	/// Values that are not valid unicode count as missing.
	pub fn str(&self, key: &str) -> Result<String, EnvError> {
		validate_env_var_name(key)?;
		env::var(key).map_err(|_| EnvError::MissingVariable(key.to_string()))
	}
}

/// Validates an environment variable name.
///
/// Rejects names that are empty, contain control characters, or contain
/// the `=` character.
pub fn validate_env_var_name(name: &str) -> Result<(), EnvError> {
	if name.is_empty() {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not be empty".to_string(),
		});
	}

	if let Some(pos) = name.find(|c: char| c.is_control()) {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: format!(
				"environment variable name contains control character at position {}",
				pos
			),
		});
	}

	if name.contains('=') {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not contain '='".to_string(),
		});
	}

	Ok(())
}

/// Environment variable errors
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	#[error("Invalid environment variable name '{name}': {reason}")]
	InvalidVariableName { name: String, reason: String },
}
