//! # pgprovision-query
//!
//! Type-safe builders for the Data Control Language statements the
//! provisioner issues, and a PostgreSQL backend that renders them.
//!
//! Identifiers are always double-quoted by the backend; string values (role
//! passwords) only ever reach SQL text through the backend's literal escaper.
//!
//! ## Quick Start
//!
//! ```
//! use pgprovision_query::backend::{PostgresQueryBuilder, QueryBuilder};
//! use pgprovision_query::dcl::{GrantStatement, Privilege};
//!
//! let stmt = GrantStatement::new()
//!     .privilege(Privilege::Connect)
//!     .on_database("analytics")
//!     .to("report_reader");
//!
//! let sql = PostgresQueryBuilder::new().build_grant(&stmt);
//! assert_eq!(sql, r#"GRANT CONNECT ON DATABASE "analytics" TO "report_reader""#);
//! ```

pub mod backend;
pub mod dcl;
pub mod types;

/// Re-export commonly used types
pub mod prelude {
	pub use crate::backend::{PostgresQueryBuilder, QueryBuilder};
	pub use crate::dcl::{CreateRoleStatement, GrantStatement, ObjectType, Privilege, RoleAttribute};
	pub use crate::types::{Alias, IntoIden};
}
