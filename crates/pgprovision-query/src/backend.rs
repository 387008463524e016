//! SQL rendering backends
//!
//! A backend turns a DCL statement into SQL text. DCL statements are utility
//! commands in PostgreSQL and cannot carry bind parameters, so every value is
//! rendered inline through [`QueryBuilder::escape_string`].

mod postgres;
mod sql_writer;

pub use postgres::PostgresQueryBuilder;
pub use sql_writer::SqlWriter;

use crate::dcl::{CreateRoleStatement, GrantStatement};

/// Trait implemented by SQL dialect backends
pub trait QueryBuilder {
	/// Render a GRANT statement
	fn build_grant(&self, stmt: &GrantStatement) -> String;

	/// Render a CREATE ROLE statement
	fn build_create_role(&self, stmt: &CreateRoleStatement) -> String;

	/// Quote an identifier
	fn escape_identifier(&self, ident: &str) -> String;

	/// Render a string literal, quotes included
	fn escape_string(&self, value: &str) -> String;
}
