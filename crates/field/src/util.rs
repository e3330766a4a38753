// Copyright 2024-2025 Irreducible Inc.

use std::iter;

use crate::{Error, Field};

/// Iterate the powers of a given value, beginning with 1 (the 0'th power).
pub fn powers<F: Field>(val: F) -> impl Iterator<Item = F> {
	iter::successors(Some(F::ONE), move |&power| Some(power * val))
}

/// Returns `k / v` for every `v` in `values`, using a single field inversion.
///
/// ## Throws
///
/// * `Error::ZeroInversion` if any of the values is zero
pub fn batch_inverse_and_mul<F: Field>(values: &[F], k: F) -> Result<Vec<F>, Error> {
	if let Some(index) = values.iter().position(|v| v.is_zero()) {
		return Err(Error::ZeroInversion { index });
	}

	// prefix[i] = values[0] * ... * values[i - 1]
	let mut prefix = Vec::with_capacity(values.len());
	let mut acc = F::ONE;
	for &v in values {
		prefix.push(acc);
		acc *= v;
	}

	let mut inv = acc
		.invert()
		.ok_or(Error::ZeroInversion { index: values.len() })?
		* k;
	let mut out = vec![F::ZERO; values.len()];
	for i in (0..values.len()).rev() {
		out[i] = inv * prefix[i];
		inv *= values[i];
	}
	Ok(out)
}
