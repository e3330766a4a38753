// Copyright 2024-2025 Irreducible Inc.

use crate::oracle::OracleId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("no oracle exists in this OracleSet with id {0}")]
	InvalidOracleId(OracleId),
	#[error("constituent {constituent} must be registered before the oracle built from it")]
	UnregisteredConstituent { constituent: OracleId },
	#[error("oracle {name} takes {expected} constituents, got {actual}")]
	ArityMismatch {
		name: String,
		expected: usize,
		actual: usize,
	},
	#[error("oracle {0} is virtual, its content is computed from its constituents")]
	NotCommitted(OracleId),
	#[error("oracle {0} is committed, its content must be set")]
	NotVirtual(OracleId),
	#[error("oracle {id} is not a {expected} oracle")]
	WrongKind { id: OracleId, expected: &'static str },
	#[error("the content of oracle {0} has already been set")]
	ContentAlreadySet(OracleId),
	#[error("the content of oracle {0} is not available")]
	MissingContent(OracleId),
	#[error("expected {expected} evaluations, got {actual}")]
	IncorrectContentLength { expected: usize, actual: usize },
	#[error("{0} has already been set")]
	AlreadySet(&'static str),
	#[error("{0} has not been set")]
	MissingState(&'static str),
	#[error("expected {expected} {arg}, got {actual}")]
	IncorrectArgumentLength {
		arg: &'static str,
		expected: usize,
		actual: usize,
	},
	#[error("no value was supplied for committed oracle {0}")]
	MissingLeafValue(OracleId),
	#[error("the denominator vanishes at the evaluation point")]
	VanishingDenominator,
	#[error("NTT error: {0}")]
	Ntt(#[from] preon_ntt::Error),
	#[error("math error: {0}")]
	Math(#[from] preon_math::Error),
	#[error("field error: {0}")]
	Field(#[from] preon_field::Error),
}
