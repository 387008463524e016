//! Data Control Language (DCL) support
//!
//! This module provides type-safe builders for CREATE ROLE and GRANT
//! statements.
//!
//! # Examples
//!
//! ```
//! use pgprovision_query::dcl::{ObjectType, Privilege};
//!
//! // Create privilege
//! let privilege = Privilege::Select;
//! assert_eq!(privilege.as_sql(), "SELECT");
//!
//! // Create object type
//! let object_type = ObjectType::AllTablesInSchema;
//! assert_eq!(object_type.as_sql(), "ALL TABLES IN SCHEMA");
//! ```

mod create_role;
mod grant;
mod object;
mod privilege;
mod role_attributes;

#[cfg(test)]
mod tests;

pub use create_role::CreateRoleStatement;
pub use grant::GrantStatement;
pub use object::ObjectType;
pub use privilege::Privilege;
pub use role_attributes::RoleAttribute;
