//! Identifier types
//!
//! [`Alias`] holds an unquoted identifier (database, schema or role name).
//! Quoting happens in the backend, never at construction time.

use std::fmt;

/// Runtime-determined SQL identifier
///
/// # Examples
///
/// ```
/// use pgprovision_query::types::Alias;
///
/// let schema = Alias::new("public");
/// assert_eq!(schema.as_str(), "public");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alias(String);

impl Alias {
	/// Create a new identifier from its unquoted form
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	/// Unquoted identifier text
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Alias {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Conversion into an identifier
pub trait IntoIden {
	fn into_iden(self) -> Alias;
}

impl IntoIden for Alias {
	fn into_iden(self) -> Alias {
		self
	}
}

impl IntoIden for &str {
	fn into_iden(self) -> Alias {
		Alias::new(self)
	}
}

impl IntoIden for String {
	fn into_iden(self) -> Alias {
		Alias::new(self)
	}
}

impl IntoIden for &String {
	fn into_iden(self) -> Alias {
		Alias::new(self.as_str())
	}
}
