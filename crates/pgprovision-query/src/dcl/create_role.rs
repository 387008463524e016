//! CREATE ROLE statement builder

use super::RoleAttribute;

/// CREATE ROLE statement builder
///
/// # Examples
///
/// ```
/// use pgprovision_query::dcl::{CreateRoleStatement, RoleAttribute};
///
/// let stmt = CreateRoleStatement::new()
///     .role("app_user")
///     .attribute(RoleAttribute::Login)
///     .attribute(RoleAttribute::Password("Secur3!pass".to_string()));
///
/// assert!(stmt.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreateRoleStatement {
	/// Name of the role to create (unquoted)
	pub role_name: String,
	/// Attributes rendered after WITH
	pub attributes: Vec<RoleAttribute>,
}

impl CreateRoleStatement {
	/// Create a new empty CREATE ROLE statement
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the role name
	pub fn role(mut self, name: impl Into<String>) -> Self {
		self.role_name = name.into();
		self
	}

	/// Add a single attribute
	pub fn attribute(mut self, attr: RoleAttribute) -> Self {
		self.attributes.push(attr);
		self
	}

	/// Replace all attributes
	pub fn attributes(mut self, attrs: Vec<RoleAttribute>) -> Self {
		self.attributes = attrs;
		self
	}

	/// Copy of this statement that is safe to log
	///
	/// # Examples
	///
	/// ```
	/// use pgprovision_query::dcl::{CreateRoleStatement, RoleAttribute};
	///
	/// let stmt = CreateRoleStatement::new()
	///     .role("app_user")
	///     .attribute(RoleAttribute::Login)
	///     .attribute(RoleAttribute::Password("Secur3!pass".to_string()));
	///
	/// assert_eq!(
	///     stmt.redacted().attributes,
	///     vec![RoleAttribute::Login, RoleAttribute::Password("***".to_string())]
	/// );
	/// ```
	pub fn redacted(&self) -> Self {
		Self {
			role_name: self.role_name.clone(),
			attributes: self.attributes.iter().map(RoleAttribute::redacted).collect(),
		}
	}

	/// Validate the CREATE ROLE statement
	///
	/// The role name must be non-empty and at most one PASSWORD may be given.
	pub fn validate(&self) -> Result<(), String> {
		if self.role_name.is_empty() {
			return Err("Role name cannot be empty".to_string());
		}

		let passwords = self
			.attributes
			.iter()
			.filter(|a| matches!(a, RoleAttribute::Password(_)))
			.count();
		if passwords > 1 {
			return Err("PASSWORD may only be specified once".to_string());
		}

		Ok(())
	}
}
