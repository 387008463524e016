//! Privilege policy
//!
//! Maps a [`PrivilegeTier`] to the GRANT statements that implement it. Every
//! tier targets the `public` schema. Table-level grants only cover tables that
//! exist when they run; tables created afterwards get nothing.

use pgprovision_core::PrivilegeTier;
use pgprovision_query::backend::{PostgresQueryBuilder, QueryBuilder};
use pgprovision_query::dcl::{GrantStatement, Privilege};

/// Schema every tier grants on
pub const DEFAULT_SCHEMA: &str = "public";

/// Typed GRANT statements for a tier, in execution order
pub fn grant_statements(tier: PrivilegeTier, database: &str, username: &str) -> Vec<GrantStatement> {
	let connect = || {
		GrantStatement::new()
			.privilege(Privilege::Connect)
			.on_database(database)
			.to(username)
	};

	match tier {
		PrivilegeTier::ReadOnly => vec![
			connect(),
			GrantStatement::new()
				.privilege(Privilege::Usage)
				.on_schema(DEFAULT_SCHEMA)
				.to(username),
			GrantStatement::new()
				.privilege(Privilege::Select)
				.on_all_tables_in_schema(DEFAULT_SCHEMA)
				.to(username),
		],
		PrivilegeTier::ReadWrite => vec![
			connect(),
			GrantStatement::new()
				.privileges(vec![Privilege::Usage, Privilege::Create])
				.on_schema(DEFAULT_SCHEMA)
				.to(username),
			GrantStatement::new()
				.privileges(vec![
					Privilege::Select,
					Privilege::Insert,
					Privilege::Update,
					Privilege::Delete,
				])
				.on_all_tables_in_schema(DEFAULT_SCHEMA)
				.to(username),
		],
		PrivilegeTier::Full => vec![
			GrantStatement::new()
				.privilege(Privilege::All)
				.on_database(database)
				.to(username),
		],
	}
}

/// Rendered GRANT statements for a tier, in execution order
///
/// # Examples
///
/// ```
/// use pgprovision_core::PrivilegeTier;
/// use pgprovision_db::policy::grants_for;
///
/// let sql = grants_for(PrivilegeTier::Full, "appdb", "owner_1");
/// assert_eq!(sql, vec![r#"GRANT ALL PRIVILEGES ON DATABASE "appdb" TO "owner_1""#]);
/// ```
pub fn grants_for(tier: PrivilegeTier, database: &str, username: &str) -> Vec<String> {
	let builder = PostgresQueryBuilder::new();
	grant_statements(tier, database, username)
		.iter()
		.map(|stmt| builder.build_grant(stmt))
		.collect()
}
