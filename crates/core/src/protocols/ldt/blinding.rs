// Copyright 2024-2025 Irreducible Inc.

use std::iter::repeat_with;

use preon_field::BinaryField;
use preon_hash::Hasher;
use preon_ntt::fft;
use rand::RngCore;

use crate::{error::Error, params::PreonParams};

/// Evaluations over the codeword domain of a uniformly random polynomial with the largest degree
/// the low-degree test accepts. Adding it to the combined codeword hides every other oracle from
/// the FRI queries.
pub fn blinding_polynomial<F: BinaryField, H: Hasher<u8>>(
	params: &PreonParams<F, H>,
	mut rng: impl RngCore,
) -> Result<Vec<F>, Error> {
	let coeffs = repeat_with(|| F::random(&mut rng))
		.take(params.degree_bounds().blinding)
		.collect::<Vec<_>>();
	Ok(fft(&coeffs, params.codeword_domain())?)
}
