//! # pgprovision-test
//!
//! Test support for the pgprovision workspace.
//!
//! - [`fakes`]: a scripted [`ConnectionProvider`](pgprovision_db::ConnectionProvider)
//!   that records every statement, commit, rollback, release and discard
//! - [`fixtures`]: a throwaway PostgreSQL container for live tests

pub mod fakes;
pub mod fixtures;

pub use fakes::{FailureKind, FakeConnection, FakeProvider, Journal, Script, Step};
