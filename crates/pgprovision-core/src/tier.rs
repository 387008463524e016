//! Privilege tiers
//!
//! A tier is the bundle of grants a new role receives at creation time. The
//! set is closed: tiers are defined here and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege bundle assigned to a newly provisioned role
///
/// # Examples
///
/// ```
/// use pgprovision_core::tier::PrivilegeTier;
///
/// let tier: PrivilegeTier = "readwrite".parse().unwrap();
/// assert_eq!(tier, PrivilegeTier::ReadWrite);
/// assert_eq!(tier.as_str(), "readwrite");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivilegeTier {
	/// CONNECT, schema USAGE and SELECT on existing tables
	ReadOnly,
	/// CONNECT, schema USAGE + CREATE and DML on existing tables
	ReadWrite,
	/// ALL PRIVILEGES on the database
	Full,
}

impl PrivilegeTier {
	/// Every tier, in the order they are advertised to clients
	pub const ALL: [PrivilegeTier; 3] = [
		PrivilegeTier::ReadOnly,
		PrivilegeTier::ReadWrite,
		PrivilegeTier::Full,
	];

	/// Wire name of the tier
	pub fn as_str(&self) -> &'static str {
		match self {
			PrivilegeTier::ReadOnly => "readonly",
			PrivilegeTier::ReadWrite => "readwrite",
			PrivilegeTier::Full => "full",
		}
	}

	/// Wire names of every tier
	///
	/// # Examples
	///
	/// ```
	/// use pgprovision_core::tier::PrivilegeTier;
	///
	/// assert_eq!(PrivilegeTier::names(), ["readonly", "readwrite", "full"]);
	/// ```
	pub fn names() -> [&'static str; 3] {
		Self::ALL.map(|tier| tier.as_str())
	}
}

impl fmt::Display for PrivilegeTier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a string names no known tier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown privilege tier '{0}'")]
pub struct UnknownTierError(pub String);

impl FromStr for PrivilegeTier {
	type Err = UnknownTierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|tier| tier.as_str() == s)
			.ok_or_else(|| UnknownTierError(s.to_string()))
	}
}
