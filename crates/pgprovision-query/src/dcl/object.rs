//! Database object types for DCL statements

/// Database object types for DCL statements
///
/// # Examples
///
/// ```
/// use pgprovision_query::dcl::ObjectType;
///
/// let object_type = ObjectType::Schema;
/// assert_eq!(object_type.as_sql(), "SCHEMA");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ObjectType {
	/// Entire databases
	Database,
	/// Schemas
	Schema,
	/// Every table that exists in a schema at grant time
	AllTablesInSchema,
}

impl ObjectType {
	/// Returns the SQL keyword for this object type
	///
	/// # Examples
	///
	/// ```
	/// use pgprovision_query::dcl::ObjectType;
	///
	/// assert_eq!(ObjectType::Database.as_sql(), "DATABASE");
	/// assert_eq!(ObjectType::AllTablesInSchema.as_sql(), "ALL TABLES IN SCHEMA");
	/// ```
	pub fn as_sql(&self) -> &'static str {
		match self {
			ObjectType::Database => "DATABASE",
			ObjectType::Schema => "SCHEMA",
			ObjectType::AllTablesInSchema => "ALL TABLES IN SCHEMA",
		}
	}
}
