// Copyright 2024-2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("FRI round {round} does not exist, there are {num_rounds} rounds")]
	InvalidRound { round: usize, num_rounds: usize },
	#[error("expected a coset of {expected} values, got {actual}")]
	IncorrectCosetSize { expected: usize, actual: usize },
	#[error("the final oracle has degree {degree} or more, above the bound {degree_bound}")]
	DegreeTooHigh { degree: usize, degree_bound: usize },
	#[error("NTT error: {0}")]
	Ntt(#[from] preon_ntt::Error),
	#[error("math error: {0}")]
	Math(#[from] preon_math::Error),
	#[error("field error: {0}")]
	Field(#[from] preon_field::Error),
	#[error("verification error: {0}")]
	Verification(#[from] VerificationError),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("incorrect codeword folding in round {round} at index {index}")]
	IncorrectFold { round: usize, index: usize },
	#[error("the final polynomial disagrees with the last fold at index {index}")]
	FinalPolynomialMismatch { index: usize },
	#[error("the query proof has {actual} round openings, expected {expected}")]
	IncorrectQueryProofLength { expected: usize, actual: usize },
}
