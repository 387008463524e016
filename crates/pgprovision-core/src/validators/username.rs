//! Role name validation.
//!
//! Role names are later rendered in identifier position (quoted, never bound),
//! so the accepted alphabet is deliberately narrower than what PostgreSQL
//! allows for quoted identifiers.

/// Shortest accepted role name
pub const MIN_USERNAME_LENGTH: usize = 2;

/// Longest accepted role name (PostgreSQL `NAMEDATALEN - 1`)
pub const MAX_USERNAME_LENGTH: usize = 63;

/// Validation errors for role names
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
	#[error("Username cannot be empty")]
	Empty,

	#[error("Username too short: {0} characters (min {MIN_USERNAME_LENGTH})")]
	TooShort(usize),

	#[error("Username too long: {0} characters (max {MAX_USERNAME_LENGTH})")]
	TooLong(usize),

	#[error("Username must start with a letter or underscore: '{0}'")]
	InvalidFirstCharacter(String),

	#[error("Username contains invalid character: '{0}'")]
	InvalidCharacter(char),
}

/// Checks a role name and reports the first rule it breaks.
///
/// A valid name is 2 to 63 characters long, starts with an ASCII letter or
/// underscore, and continues with ASCII letters, digits or underscores.
///
/// # Examples
///
/// ```
/// use pgprovision_core::validators::{UsernameError, check_username};
///
/// assert!(check_username("app_user").is_ok());
/// assert_eq!(check_username(""), Err(UsernameError::Empty));
/// assert_eq!(check_username("a"), Err(UsernameError::TooShort(1)));
/// assert_eq!(check_username("app-user"), Err(UsernameError::InvalidCharacter('-')));
/// ```
pub fn check_username(name: &str) -> Result<(), UsernameError> {
	if name.is_empty() {
		return Err(UsernameError::Empty);
	}

	let length = name.chars().count();
	if length < MIN_USERNAME_LENGTH {
		return Err(UsernameError::TooShort(length));
	}
	if length > MAX_USERNAME_LENGTH {
		return Err(UsernameError::TooLong(length));
	}

	let mut chars = name.chars();

	// First character
	if let Some(first) = chars.next()
		&& !matches!(first, 'a'..='z' | 'A'..='Z' | '_')
	{
		return Err(UsernameError::InvalidFirstCharacter(name.to_string()));
	}

	// Remaining characters
	for ch in chars {
		if !matches!(ch, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_') {
			return Err(UsernameError::InvalidCharacter(ch));
		}
	}

	Ok(())
}

/// Returns `true` when `name` is acceptable as a role name.
///
/// # Examples
///
/// ```
/// use pgprovision_core::validators::validate_username;
///
/// assert!(validate_username("ab_1"));
/// assert!(!validate_username("1abc"));
/// assert!(!validate_username("a"));
/// ```
pub fn validate_username(name: &str) -> bool {
	check_username(name).is_ok()
}
