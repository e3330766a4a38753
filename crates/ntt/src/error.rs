// Copyright 2024-2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{len} coefficients do not fit a domain of size 2**{log_domain_size}")]
	DomainTooSmall { len: usize, log_domain_size: usize },
	#[error("expected exactly {expected} evaluations, got {actual}")]
	IncorrectEvaluationCount { expected: usize, actual: usize },
	#[error("the domain basis is linearly dependent")]
	DegenerateBasis,
	#[error("math error: {0}")]
	MathError(#[from] preon_math::Error),
}
