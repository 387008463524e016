//! SQL privilege types for GRANT statements

use super::ObjectType;

/// SQL privilege types for GRANT statements
///
/// # Examples
///
/// ```
/// use pgprovision_query::dcl::Privilege;
///
/// let privilege = Privilege::Select;
/// assert_eq!(privilege.as_sql(), "SELECT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Privilege {
	/// SELECT privilege - Read data from tables
	Select,
	/// INSERT privilege - Insert rows into tables
	Insert,
	/// UPDATE privilege - Modify rows in tables
	Update,
	/// DELETE privilege - Remove rows from tables
	Delete,
	/// CREATE privilege - Create objects inside a schema or database
	Create,
	/// ALL PRIVILEGES - All available privileges
	All,
	/// USAGE privilege - Look up objects in a schema
	Usage,
	/// CONNECT privilege - Connect to database
	Connect,
}

impl Privilege {
	/// Returns the SQL keyword for this privilege
	///
	/// # Examples
	///
	/// ```
	/// use pgprovision_query::dcl::Privilege;
	///
	/// assert_eq!(Privilege::Select.as_sql(), "SELECT");
	/// assert_eq!(Privilege::All.as_sql(), "ALL PRIVILEGES");
	/// ```
	pub fn as_sql(&self) -> &'static str {
		match self {
			Privilege::Select => "SELECT",
			Privilege::Insert => "INSERT",
			Privilege::Update => "UPDATE",
			Privilege::Delete => "DELETE",
			Privilege::Create => "CREATE",
			Privilege::All => "ALL PRIVILEGES",
			Privilege::Usage => "USAGE",
			Privilege::Connect => "CONNECT",
		}
	}

	/// Checks if this privilege is valid for the given object type
	///
	/// Different object types support different privileges. For example,
	/// `SELECT` is valid for tables but not for databases.
	///
	/// # Examples
	///
	/// ```
	/// use pgprovision_query::dcl::{ObjectType, Privilege};
	///
	/// assert!(Privilege::Select.is_valid_for_object(ObjectType::AllTablesInSchema));
	/// assert!(!Privilege::Connect.is_valid_for_object(ObjectType::Schema));
	/// ```
	pub fn is_valid_for_object(&self, object_type: ObjectType) -> bool {
		match (self, object_type) {
			// Table privileges
			(
				Privilege::Select
				| Privilege::Insert
				| Privilege::Update
				| Privilege::Delete
				| Privilege::All,
				ObjectType::AllTablesInSchema,
			) => true,

			// DATABASE privileges
			(Privilege::Create | Privilege::Connect | Privilege::All, ObjectType::Database) => true,

			// SCHEMA privileges
			(Privilege::Create | Privilege::Usage | Privilege::All, ObjectType::Schema) => true,

			// Invalid combinations
			_ => false,
		}
	}
}
