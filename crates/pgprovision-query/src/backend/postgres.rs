//! PostgreSQL query builder backend

use super::{QueryBuilder, SqlWriter};
use crate::dcl::{CreateRoleStatement, GrantStatement, RoleAttribute};

/// PostgreSQL query builder
///
/// - Identifiers: Double quotes (`"role_name"`), embedded quotes doubled
/// - String literals: Single quotes, embedded quotes doubled; an `E''`
///   literal with doubled backslashes when the value contains a backslash
///
/// # Examples
///
/// ```
/// use pgprovision_query::backend::{PostgresQueryBuilder, QueryBuilder};
/// use pgprovision_query::dcl::{CreateRoleStatement, RoleAttribute};
///
/// let stmt = CreateRoleStatement::new()
///     .role("app_user")
///     .attribute(RoleAttribute::Login)
///     .attribute(RoleAttribute::Password("it's".to_string()));
///
/// let sql = PostgresQueryBuilder::new().build_create_role(&stmt);
/// assert_eq!(sql, r#"CREATE ROLE "app_user" WITH LOGIN PASSWORD 'it''s'"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PostgresQueryBuilder;

impl PostgresQueryBuilder {
	/// Create a new PostgreSQL query builder
	pub fn new() -> Self {
		Self
	}

	fn escape_iden(&self, ident: &str) -> String {
		let escaped = ident.replace('"', "\"\"");
		format!("\"{}\"", escaped)
	}

	fn escape_literal(&self, value: &str) -> String {
		let quoted = value.replace('\'', "''");
		if value.contains('\\') {
			format!("E'{}'", quoted.replace('\\', "\\\\"))
		} else {
			format!("'{}'", quoted)
		}
	}
}

impl QueryBuilder for PostgresQueryBuilder {
	fn build_grant(&self, stmt: &GrantStatement) -> String {
		let mut writer = SqlWriter::new();

		writer.push("GRANT");
		writer.push_space();

		writer.push_list(&stmt.privileges, ", ", |w, privilege| {
			w.push(privilege.as_sql());
		});

		writer.push_keyword("ON");
		if let Some(object_type) = stmt.object_type {
			writer.push_space();
			writer.push(object_type.as_sql());
		}
		writer.push_space();

		writer.push_list(&stmt.objects, ", ", |w, obj| {
			w.push_identifier(obj.as_str(), |s| self.escape_iden(s));
		});

		writer.push_keyword("TO");
		writer.push_space();

		writer.push_list(&stmt.grantees, ", ", |w, grantee| {
			w.push_identifier(grantee.as_str(), |s| self.escape_iden(s));
		});

		writer.finish()
	}

	fn build_create_role(&self, stmt: &CreateRoleStatement) -> String {
		let mut writer = SqlWriter::new();

		writer.push("CREATE ROLE");
		writer.push_space();
		writer.push_identifier(&stmt.role_name, |s| self.escape_iden(s));

		if !stmt.attributes.is_empty() {
			writer.push_keyword("WITH");
		}

		for attr in &stmt.attributes {
			writer.push_space();
			match attr {
				RoleAttribute::Login => writer.push("LOGIN"),
				RoleAttribute::Password(pwd) => {
					writer.push("PASSWORD");
					writer.push_space();
					writer.push(&self.escape_literal(pwd));
				}
			}
		}

		writer.finish()
	}

	fn escape_identifier(&self, ident: &str) -> String {
		self.escape_iden(ident)
	}

	fn escape_string(&self, value: &str) -> String {
		self.escape_literal(value)
	}
}
