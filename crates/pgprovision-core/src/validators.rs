//! Input validators for role provisioning requests.
//!
//! Both checks are pure and total: they never perform I/O and never panic on
//! malformed input. The `validate_*` functions return a plain verdict, while
//! the `check_*` functions name the first rule that failed.

mod password;
mod username;

pub use password::{
	MIN_PASSWORD_LENGTH, PASSWORD_SPECIAL_CHARACTERS, PasswordError, check_password,
	validate_password,
};
pub use username::{
	MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH, UsernameError, check_username, validate_username,
};
