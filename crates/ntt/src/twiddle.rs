// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_math::{all_subset_sums, AffineSubspace};

use crate::Error;

/// Precomputed data for one level of the Gao–Mateer recursion.
///
/// At level `t` the domain is `S_t + span(B_t)`. Dividing by $b_0 = B_t[0]$ normalizes the first
/// basis element to one, and the map $y = x^2 + x$ sends the normalized domain two-to-one onto the
/// domain of level `t + 1`. The twiddles are the normalized points whose low index bit is clear,
/// $z_j = S_t / b_0 + \sum_{k \ge 1} j_{k-1} B_t[k] / b_0$.
#[derive(Debug, Clone)]
pub struct TwiddleLevel<F> {
	pub b0: F,
	pub b0_inv: F,
	pub twiddles: Vec<F>,
}

/// Computes the twiddles for every level, from the full domain down to dimension one.
///
/// The total size is `|D| - 1` field elements.
pub fn precompute_levels<F: BinaryField>(
	domain: &AffineSubspace<F>,
) -> Result<Vec<TwiddleLevel<F>>, Error> {
	let mut levels = Vec::with_capacity(domain.dim());
	let mut basis = domain.basis().to_vec();
	let mut shift = domain.shift();

	while let Some(&b0) = basis.first() {
		let b0_inv = b0.invert().ok_or(Error::DegenerateBasis)?;
		let normalized = basis[1..].iter().map(|&b| b * b0_inv).collect::<Vec<_>>();
		let normalized_shift = shift * b0_inv;

		let twiddles = all_subset_sums(&normalized, normalized_shift);

		basis = normalized.into_iter().map(|b| b.square() + b).collect();
		shift = normalized_shift.square() + normalized_shift;
		levels.push(TwiddleLevel {
			b0,
			b0_inv,
			twiddles,
		});
	}
	Ok(levels)
}
