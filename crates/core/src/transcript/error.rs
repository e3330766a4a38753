// Copyright 2024-2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("a {field_bytes} byte field element cannot be squeezed from a {digest_bytes} byte digest")]
	DigestTooShort {
		field_bytes: usize,
		digest_bytes: usize,
	},
	#[error("cannot squeeze {count} values in one round, the index is a single byte")]
	TooManyChallenges { count: usize },
	#[error("query positions need a nonzero domain size")]
	EmptyDomain,
	#[error("Serialization error: {0}")]
	Serialization(#[from] preon_utils::serialization::Error),
}
