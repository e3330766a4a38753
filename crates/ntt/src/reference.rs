// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_math::{evaluate_univariate, AffineSubspace};

/// Quadratic-time evaluation used as the test oracle for the fast transform.
pub fn naive_evaluate<F: BinaryField>(coeffs: &[F], domain: &AffineSubspace<F>) -> Vec<F> {
	domain
		.iter()
		.map(|x| evaluate_univariate(coeffs, x))
		.collect()
}
