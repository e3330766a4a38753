// Copyright 2024-2025 Irreducible Inc.

use preon_utils::serialization;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Length of the input vector is incorrect, expected {expected}")]
	IncorrectVectorLen { expected: usize },
	#[error("the coset size must be a power of two")]
	InvalidCosetSize,
	#[error("the number of leaves must be a power of two")]
	PowerOfTwoLengthRequired,
	#[error("a Merkle tree needs at least one column")]
	NoColumns,
	#[error("Index exceeds Merkle tree base size: {max}")]
	IndexOutOfRange { max: usize },
	#[error("serialization error: {0}")]
	Serialization(#[from] serialization::Error),
	#[error("verification failure: {0}")]
	Verification(#[from] VerificationError),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("the length of the vector does not match the committed length")]
	IncorrectVectorLength,
	#[error("the shape of the proof is incorrect")]
	IncorrectProofShape,
	#[error("the proof is invalid")]
	InvalidProof,
}
