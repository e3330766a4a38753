// Copyright 2024-2025 Irreducible Inc.

/// Error thrown when a field operation fails.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
	#[error("index {index} is out of range 0..{max}")]
	IndexOutOfRange { index: usize, max: usize },
	#[error("cannot invert zero (batch position {index})")]
	ZeroInversion { index: usize },
}
