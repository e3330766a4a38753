// Copyright 2024-2025 Irreducible Inc.

use std::ops::Range;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("argument {arg} does not have expected length {expected}")]
	IncorrectArgumentLength { arg: String, expected: usize },
	#[error("argument {arg} does not lie in range {range:?}")]
	ArgumentRangeError { arg: String, range: Range<usize> },
	#[error("domain size is larger than the field")]
	DomainSizeTooLarge,
	#[error("the domain basis is linearly dependent")]
	DegenerateBasis,
	#[error("field error: {0}")]
	FieldError(#[from] preon_field::Error),
}
