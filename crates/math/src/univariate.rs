// Copyright 2024-2025 Irreducible Inc.

use preon_field::Field;

/// Evaluates a polynomial given by its coefficients, lowest degree first, using Horner's rule.
pub fn evaluate_univariate<F: Field>(coeffs: &[F], x: F) -> F {
	coeffs
		.iter()
		.rev()
		.fold(F::ZERO, |acc, &coeff| acc * x + coeff)
}

/// Adds `rhs` into `lhs`, growing `lhs` if `rhs` is longer.
pub fn add_assign_poly<F: Field>(lhs: &mut Vec<F>, rhs: &[F]) {
	if lhs.len() < rhs.len() {
		lhs.resize(rhs.len(), F::ZERO);
	}
	for (l, &r) in lhs.iter_mut().zip(rhs) {
		*l += r;
	}
}

/// Number of coefficients after stripping trailing zeros, i.e. one more than the degree.
pub fn num_nonzero_prefix<F: Field>(coeffs: &[F]) -> usize {
	coeffs
		.iter()
		.rposition(|c| !c.is_zero())
		.map_or(0, |pos| pos + 1)
}
