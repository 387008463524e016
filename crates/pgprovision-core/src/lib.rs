//! # pgprovision-core
//!
//! Shared building blocks for the pgprovision workspace:
//!
//! - [`validators`]: pure username and password checks run before any
//!   database interaction
//! - [`tier`]: the closed set of privilege tiers a new role can receive
//! - [`exception`]: the error taxonomy and its HTTP status mapping
//!
//! ## Quick Start
//!
//! ```
//! use pgprovision_core::tier::PrivilegeTier;
//! use pgprovision_core::validators::{validate_password, validate_username};
//!
//! assert!(validate_username("report_reader"));
//! assert!(validate_password("Passw0rd!"));
//! assert_eq!("readonly".parse::<PrivilegeTier>().unwrap(), PrivilegeTier::ReadOnly);
//! ```

pub mod exception;
pub mod tier;
pub mod validators;

pub use exception::{Error, Result};
pub use tier::PrivilegeTier;
