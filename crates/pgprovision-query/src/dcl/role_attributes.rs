//! Role attributes for CREATE ROLE

/// Attributes applied by `CREATE ROLE ... WITH`
///
/// # Examples
///
/// ```
/// use pgprovision_query::dcl::RoleAttribute;
///
/// let attrs = vec![RoleAttribute::Login, RoleAttribute::Password("s3cret".to_string())];
/// assert_eq!(attrs.len(), 2);
/// ```
#[derive(Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoleAttribute {
	/// LOGIN - role may open sessions
	Login,
	/// PASSWORD 'literal'
	Password(String),
}

impl RoleAttribute {
	/// Same attribute with any secret replaced by `***`
	pub fn redacted(&self) -> Self {
		match self {
			RoleAttribute::Password(_) => RoleAttribute::Password("***".to_string()),
			other => other.clone(),
		}
	}
}

// Keeps passwords out of debug logs.
impl std::fmt::Debug for RoleAttribute {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			RoleAttribute::Login => f.write_str("Login"),
			RoleAttribute::Password(_) => f.write_str("Password(\"***\")"),
		}
	}
}
