// Copyright 2025 Irreducible Inc.

use std::fmt;

/// Identifier for an oracle in an [`super::OracleSet`].
///
/// This is essentially an index. Constituents always have smaller identifiers than the oracles
/// built from them, so the order of identifiers is a topological order of the oracle DAG.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OracleId(usize);

impl OracleId {
	/// Create an Oracle ID from the index this oracle stored in the [`super::OracleSet`].
	///
	/// Largely an escape hatch and discouraged to use.
	pub const fn from_index(index: usize) -> Self {
		Self(index)
	}

	/// Returns the index in the associated [`super::OracleSet`].
	pub const fn index(&self) -> usize {
		self.0
	}
}

impl fmt::Display for OracleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}
