// Copyright 2024-2025 Irreducible Inc.

use crate::{merkle_tree, oracle, protocols::fri, transcript};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid parameter set: {0}")]
	InvalidParameters(String),
	#[error("the {digest_bytes} byte digest is shorter than a {field_bytes} byte field element")]
	DigestTooShort {
		field_bytes: usize,
		digest_bytes: usize,
	},
	#[error("constraint {constraint} references column {column}, but there are only {num_columns}")]
	ColumnOutOfRange {
		constraint: usize,
		column: usize,
		num_columns: usize,
	},
	#[error("the constraint system does not fit the parameter set: {0}")]
	InstanceTooLarge(String),
	#[error("expected {expected} {arg}, got {actual}")]
	IncorrectWitnessLength {
		arg: &'static str,
		expected: usize,
		actual: usize,
	},
	#[error("the assignment does not satisfy constraint {constraint}")]
	UnsatisfiedConstraint { constraint: usize },
	#[error("oracle error: {0}")]
	Oracle(#[from] oracle::Error),
	#[error("Merkle tree error: {0}")]
	MerkleTree(#[from] merkle_tree::Error),
	#[error("FRI error: {0}")]
	Fri(#[from] fri::Error),
	#[error("transcript error: {0}")]
	Transcript(#[from] transcript::Error),
	#[error("NTT error: {0}")]
	Ntt(#[from] preon_ntt::Error),
	#[error("math error: {0}")]
	Math(#[from] preon_math::Error),
	#[error("field error: {0}")]
	Field(#[from] preon_field::Error),
	#[error("serialization error: {0}")]
	Serialization(#[from] preon_utils::serialization::Error),
	#[error("verification error: {0}")]
	Verification(#[from] VerificationError),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("expected {expected} {component} in the proof, got {actual}")]
	IncorrectProofShape {
		component: &'static str,
		expected: usize,
		actual: usize,
	},
	#[error("query response {response} of tree {tree} has {actual} values, expected {expected}")]
	IncorrectResponseLength {
		tree: usize,
		response: usize,
		expected: usize,
		actual: usize,
	},
	#[error("leaf {leaf} of tree {tree} is needed by a query but was not opened")]
	MissingOpening { tree: usize, leaf: usize },
	#[error("{remaining} trailing bytes after the proof")]
	TrailingBytes { remaining: usize },
}
