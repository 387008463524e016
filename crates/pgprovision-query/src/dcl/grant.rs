//! GRANT statement builder

use super::{ObjectType, Privilege};
use crate::types::{Alias, IntoIden};

/// GRANT statement builder
///
/// This struct provides a fluent API for building GRANT statements.
///
/// # Examples
///
/// ```
/// use pgprovision_query::dcl::{GrantStatement, Privilege};
///
/// let stmt = GrantStatement::new()
///     .privilege(Privilege::Usage)
///     .privilege(Privilege::Create)
///     .on_schema("public")
///     .to("app_user");
///
/// assert!(stmt.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrantStatement {
	/// List of privileges to grant
	pub privileges: Vec<Privilege>,
	/// Type of object, set by the `on_*` methods
	pub object_type: Option<ObjectType>,
	/// List of object names
	pub objects: Vec<Alias>,
	/// Roles receiving the privileges
	pub grantees: Vec<Alias>,
}

impl GrantStatement {
	/// Create a new empty GRANT statement
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a single privilege to grant
	pub fn privilege(mut self, privilege: Privilege) -> Self {
		self.privileges.push(privilege);
		self
	}

	/// Set all privileges at once
	///
	/// # Examples
	///
	/// ```
	/// use pgprovision_query::dcl::{GrantStatement, Privilege};
	///
	/// let stmt = GrantStatement::new()
	///     .privileges(vec![Privilege::Select, Privilege::Insert])
	///     .on_all_tables_in_schema("public")
	///     .to("app_user");
	/// assert_eq!(stmt.privileges.len(), 2);
	/// ```
	pub fn privileges(mut self, privileges: Vec<Privilege>) -> Self {
		self.privileges = privileges;
		self
	}

	/// Convenience method: Grant on DATABASE objects
	pub fn on_database<T: IntoIden>(mut self, database: T) -> Self {
		self.object_type = Some(ObjectType::Database);
		self.objects.push(database.into_iden());
		self
	}

	/// Convenience method: Grant on SCHEMA objects
	pub fn on_schema<T: IntoIden>(mut self, schema: T) -> Self {
		self.object_type = Some(ObjectType::Schema);
		self.objects.push(schema.into_iden());
		self
	}

	/// Convenience method: Grant on every table currently in a schema
	///
	/// Tables created after the grant are not covered.
	///
	/// # Examples
	///
	/// ```
	/// use pgprovision_query::dcl::{GrantStatement, ObjectType, Privilege};
	///
	/// let stmt = GrantStatement::new()
	///     .privilege(Privilege::Select)
	///     .on_all_tables_in_schema("public")
	///     .to("report_reader");
	/// assert_eq!(stmt.object_type, Some(ObjectType::AllTablesInSchema));
	/// ```
	pub fn on_all_tables_in_schema<T: IntoIden>(mut self, schema: T) -> Self {
		self.object_type = Some(ObjectType::AllTablesInSchema);
		self.objects.push(schema.into_iden());
		self
	}

	/// Grant to a named role
	pub fn to<T: IntoIden>(mut self, role: T) -> Self {
		self.grantees.push(role.into_iden());
		self
	}

	/// Validate the GRANT statement
	///
	/// # Validation Rules
	///
	/// 1. At least one privilege must be specified
	/// 2. At least one object must be specified
	/// 3. At least one grantee must be specified
	/// 4. Privilege must be valid for the object type
	pub fn validate(&self) -> Result<(), String> {
		if self.privileges.is_empty() {
			return Err("At least one privilege must be specified".to_string());
		}

		let object_type = match self.object_type {
			Some(object_type) if !self.objects.is_empty() => object_type,
			_ => return Err("At least one object must be specified".to_string()),
		};

		if self.grantees.is_empty() {
			return Err("At least one grantee must be specified".to_string());
		}

		for privilege in &self.privileges {
			if !privilege.is_valid_for_object(object_type) {
				return Err(format!(
					"Privilege {:?} is not valid for object type {:?}",
					privilege, object_type
				));
			}
		}

		Ok(())
	}
}
