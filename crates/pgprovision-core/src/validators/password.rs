//! Password strength validation

/// Shortest accepted password
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Punctuation characters that satisfy the "special character" rule
pub const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Validation errors for passwords
///
/// Messages never include the password itself.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
	#[error("Password cannot be empty")]
	Empty,

	#[error("Password too short: {0} characters (min {MIN_PASSWORD_LENGTH})")]
	TooShort(usize),

	#[error("Password must contain at least one uppercase letter")]
	MissingUppercase,

	#[error("Password must contain at least one lowercase letter")]
	MissingLowercase,

	#[error("Password must contain at least one digit")]
	MissingDigit,

	#[error("Password must contain at least one of {PASSWORD_SPECIAL_CHARACTERS}")]
	MissingSpecialCharacter,
}

/// Checks password strength and reports the first rule it breaks.
///
/// # Examples
///
/// ```
/// use pgprovision_core::validators::{PasswordError, check_password};
///
/// assert!(check_password("Passw0rd!").is_ok());
/// assert_eq!(check_password("short"), Err(PasswordError::TooShort(5)));
/// assert_eq!(check_password("password"), Err(PasswordError::MissingUppercase));
/// ```
pub fn check_password(password: &str) -> Result<(), PasswordError> {
	if password.is_empty() {
		return Err(PasswordError::Empty);
	}

	let length = password.chars().count();
	if length < MIN_PASSWORD_LENGTH {
		return Err(PasswordError::TooShort(length));
	}

	if !password.chars().any(|c| c.is_ascii_uppercase()) {
		return Err(PasswordError::MissingUppercase);
	}
	if !password.chars().any(|c| c.is_ascii_lowercase()) {
		return Err(PasswordError::MissingLowercase);
	}
	if !password.chars().any(|c| c.is_ascii_digit()) {
		return Err(PasswordError::MissingDigit);
	}
	if !password
		.chars()
		.any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c))
	{
		return Err(PasswordError::MissingSpecialCharacter);
	}

	Ok(())
}

/// Returns `true` when `password` meets the strength rules.
///
/// # Examples
///
/// ```
/// use pgprovision_core::validators::validate_password;
///
/// assert!(validate_password("Passw0rd!"));
/// assert!(!validate_password("password"));
/// ```
pub fn validate_password(password: &str) -> bool {
	check_password(password).is_ok()
}
