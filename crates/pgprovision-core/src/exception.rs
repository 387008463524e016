//! Error taxonomy
//!
//! Every failure the service reports falls into one of four kinds, each with
//! a fixed HTTP status. Display strings are what clients see, so they carry a
//! rendering of the cause and never a backtrace.

use crate::tier::UnknownTierError;
use crate::validators::{PasswordError, UsernameError};

/// Service error
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Malformed or missing input, detected before any database interaction
	#[error("Validation error: {0}")]
	Validation(String),

	/// The role already exists
	#[error("{0}")]
	Conflict(String),

	/// Failure surfaced by the database driver or the connection pool
	#[error("Database error: {0}")]
	Database(String),

	/// Anything not anticipated, including cleanup failures
	#[error("Unexpected error: {0}")]
	Unexpected(String),
}

impl Error {
	/// HTTP status code for this error kind
	///
	/// # Examples
	///
	/// ```
	/// use pgprovision_core::exception::Error;
	///
	/// assert_eq!(Error::Validation("bad".into()).status_code(), 400);
	/// assert_eq!(Error::Conflict("taken".into()).status_code(), 409);
	/// assert_eq!(Error::Database("down".into()).status_code(), 500);
	/// ```
	pub fn status_code(&self) -> u16 {
		match self {
			Error::Validation(_) => 400,
			Error::Conflict(_) => 409,
			Error::Database(_) | Error::Unexpected(_) => 500,
		}
	}
}

impl From<UsernameError> for Error {
	fn from(err: UsernameError) -> Self {
		Error::Validation(err.to_string())
	}
}

impl From<PasswordError> for Error {
	fn from(err: PasswordError) -> Self {
		Error::Validation(err.to_string())
	}
}

impl From<UnknownTierError> for Error {
	fn from(err: UnknownTierError) -> Self {
		Error::Validation(err.to_string())
	}
}

/// Result type for service operations
pub type Result<T> = std::result::Result<T, Error>;
