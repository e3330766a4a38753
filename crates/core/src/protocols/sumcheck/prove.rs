// Copyright 2024-2025 Irreducible Inc.

use std::iter::repeat_with;

use preon_field::BinaryField;
use preon_hash::Hasher;
use preon_math::{add_assign_poly, VanishingPolynomial};
use preon_ntt::{fft, ifft};
use preon_utils::{bail, checked_arithmetics::checked_log_2};
use rand::RngCore;
use tracing::instrument;

use crate::{error::Error, params::PreonParams};

/// Evaluations over the codeword domain of a random polynomial that sums to zero over the
/// summation domain, with the degree bound of the lincheck oracle.
///
/// The polynomial is `Z_H * h' + g` where `g` has no `X^{|H| - 1}` term.
#[instrument(skip_all, level = "debug")]
pub fn masking_polynomial<F: BinaryField, H: Hasher<u8>>(
	params: &PreonParams<F, H>,
	mut rng: impl RngCore,
) -> Result<Vec<F>, Error> {
	let summation_domain = params.summation_domain();
	let summation_size = summation_domain.size();

	let mut g = repeat_with(|| F::random(&mut rng))
		.take(summation_size)
		.collect::<Vec<_>>();
	g[summation_size - 1] = F::ZERO;
	let h_len = params.degree_bounds().multi_lincheck - summation_size;
	let h = repeat_with(|| F::random(&mut rng))
		.take(h_len)
		.collect::<Vec<_>>();

	let mut masking = VanishingPolynomial::new(summation_domain).mul_poly(&h);
	add_assign_poly(&mut masking, &g);
	Ok(fft(&masking, params.codeword_domain())?)
}

/// Evaluations over the codeword domain of `h`, the quotient of the combined sumcheck oracle by
/// `Z_H`.
///
/// The combined oracle is interpolated from its evaluations over the smallest prefix subspace of
/// the codeword domain that determines it.
#[instrument(skip_all, level = "debug")]
pub fn compute_h<F: BinaryField, H: Hasher<u8>>(
	params: &PreonParams<F, H>,
	combined_f: &[F],
) -> Result<Vec<F>, Error> {
	let codeword_domain = params.codeword_domain();
	let interpolation_size = params.sumcheck_interpolation_size();
	if combined_f.len() != codeword_domain.size() || interpolation_size > combined_f.len() {
		bail!(Error::IncorrectWitnessLength {
			arg: "combined sumcheck evaluations",
			expected: codeword_domain.size(),
			actual: combined_f.len(),
		});
	}

	let interpolation_domain = codeword_domain.reduce_dim(checked_log_2(interpolation_size))?;
	let coeffs = ifft(&combined_f[..interpolation_size], &interpolation_domain)?;
	let (mut h, _) = VanishingPolynomial::new(params.summation_domain()).divide(&coeffs);
	h.truncate(params.degree_bounds().sumcheck_h);
	Ok(fft(&h, codeword_domain)?)
}

#[cfg(test)]
mod tests {
	use preon_field::{BinaryField192b, Field};
	use preon_hash::Sha3_384;
	use preon_math::{evaluate_univariate, num_nonzero_prefix};
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;
	use crate::test_utils::small_parameter_set;

	type F = BinaryField192b;

	fn params() -> PreonParams<F, Sha3_384> {
		PreonParams::new(small_parameter_set()).unwrap()
	}

	#[test]
	fn test_masking_polynomial_sums_to_zero() {
		let params = params();
		let masking = masking_polynomial(&params, StdRng::seed_from_u64(0)).unwrap();
		let coeffs = ifft(&masking, params.codeword_domain()).unwrap();
		assert!(num_nonzero_prefix(&coeffs) <= params.degree_bounds().multi_lincheck);
		let sum = params
			.summation_domain()
			.iter()
			.map(|x| evaluate_univariate(&coeffs, x))
			.sum::<F>();
		assert_eq!(sum, F::ZERO);
	}

	#[test]
	fn test_h_is_the_quotient() {
		let params = params();
		let mut rng = StdRng::seed_from_u64(1);
		let bound = params.degree_bounds().multi_lincheck;
		let f_coeffs = (0..bound).map(|_| F::random(&mut rng)).collect::<Vec<_>>();
		let f = fft(&f_coeffs, params.codeword_domain()).unwrap();

		let h = compute_h(&params, &f).unwrap();
		let h_coeffs = ifft(&h, params.codeword_domain()).unwrap();
		let (expected, _) = VanishingPolynomial::new(params.summation_domain()).divide(&f_coeffs);
		assert_eq!(&h_coeffs[..expected.len()], expected.as_slice());
		assert_eq!(num_nonzero_prefix(&h_coeffs), params.degree_bounds().sumcheck_h);
	}
}
