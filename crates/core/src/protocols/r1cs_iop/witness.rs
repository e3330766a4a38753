// Copyright 2024-2025 Irreducible Inc.

//! Prover-side construction of the committed R1CS oracles.

use std::iter::repeat_with;

use preon_field::BinaryField;
use preon_hash::Hasher;
use preon_math::{add_assign_poly, VanishingPolynomial};
use preon_ntt::{fft, ifft};
use rand::RngCore;
use tracing::instrument;

use crate::{error::Error, params::PreonParams};

/// The values `(1, primary inputs, 0, ...)` that `f1v` takes over an input domain of size
/// `input_domain_size`.
pub fn input_values<F: BinaryField>(input_domain_size: usize, primary: &[F]) -> Vec<F> {
	let mut values = Vec::with_capacity(input_domain_size);
	values.push(F::ONE);
	values.extend_from_slice(primary);
	values.resize(input_domain_size, F::ZERO);
	values
}

fn random_poly<F: BinaryField>(len: usize, mut rng: impl RngCore) -> Vec<F> {
	repeat_with(|| F::random(&mut rng)).take(len).collect()
}

/// Evaluations of `fw` over the codeword domain.
///
/// `fw` is chosen so that `f1v + fw * Z_I` equals the auxiliary inputs at their positions in the
/// variable domain. `query_bound` random multiples of `Z_V` mask it.
#[instrument(skip_all, level = "debug")]
pub fn compute_fw<F: BinaryField, H: Hasher<u8>>(
	params: &PreonParams<F, H>,
	primary: &[F],
	auxiliary: &[F],
	mut rng: impl RngCore,
) -> Result<Vec<F>, Error> {
	let input_domain = params.input_domain();
	let variable_domain = params.variable_domain();
	let input_size = input_domain.size();
	if input_size + auxiliary.len() > variable_domain.size() {
		return Err(Error::InstanceTooLarge(format!(
			"{} auxiliary inputs do not fit a variable domain of size {}",
			auxiliary.len(),
			variable_domain.size()
		)));
	}

	let f1v_coeffs = ifft(&input_values(input_size, primary), input_domain)?;
	let f1v = fft(&f1v_coeffs, variable_domain)?;

	let mut fw_evals = vec![F::ZERO; variable_domain.size()];
	for (i, &aux) in auxiliary.iter().enumerate() {
		fw_evals[input_size + i] = aux - f1v[input_size + i];
	}
	let mut full = ifft(&fw_evals, variable_domain)?;
	let mask = random_poly(params.query_bound(), &mut rng);
	add_assign_poly(&mut full, &VanishingPolynomial::new(variable_domain).mul_poly(&mask));

	// `full` vanishes on the input domain, so the division is exact.
	let (fw, remainder) = VanishingPolynomial::new(input_domain).divide(&full);
	debug_assert!(remainder.iter().all(|r| r.is_zero()));
	Ok(fft(&fw, params.codeword_domain())?)
}

/// Evaluations of `fMz` over the codeword domain, from the products `Mz` over the constraint
/// domain.
pub fn compute_fmz<F: BinaryField, H: Hasher<u8>>(
	params: &PreonParams<F, H>,
	mz: &[F],
	mut rng: impl RngCore,
) -> Result<Vec<F>, Error> {
	let constraint_domain = params.constraint_domain();
	if mz.len() > constraint_domain.size() {
		return Err(Error::InstanceTooLarge(format!(
			"{} constraints do not fit a constraint domain of size {}",
			mz.len(),
			constraint_domain.size()
		)));
	}
	let mut evals = mz.to_vec();
	evals.resize(constraint_domain.size(), F::ZERO);

	let mut poly = ifft(&evals, constraint_domain)?;
	let mask = random_poly(params.query_bound(), &mut rng);
	add_assign_poly(&mut poly, &VanishingPolynomial::new(constraint_domain).mul_poly(&mask));
	Ok(fft(&poly, params.codeword_domain())?)
}

#[cfg(test)]
mod tests {
	use preon_field::{BinaryField192b, Field};
	use preon_hash::Sha3_384;
	use preon_math::{evaluate_univariate, num_nonzero_prefix};
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;
	use crate::{
		oracle::VirtualOracle, protocols::r1cs_iop::Fz, test_utils::small_parameter_set,
	};

	type F = BinaryField192b;

	fn params() -> PreonParams<F, Sha3_384> {
		PreonParams::new(small_parameter_set()).unwrap()
	}

	#[test]
	fn test_fz_recovers_the_assignment() {
		let params = params();
		let primary = [F::from_u64(3)];
		let auxiliary = [F::from_u64(4), F::from_u64(5), F::from_u64(6)];
		let fw = compute_fw(&params, &primary, &auxiliary, StdRng::seed_from_u64(0)).unwrap();
		let fw_coeffs = ifft(&fw, params.codeword_domain()).unwrap();
		assert!(num_nonzero_prefix(&fw_coeffs) <= params.degree_bounds().fw);

		let mut fz = Fz::new(params.input_domain().clone(), 1);
		fz.set_primary_input(&primary).unwrap();
		let expected = [F::ONE, primary[0], auxiliary[0], auxiliary[1], auxiliary[2]];
		for (x, expected) in params.variable_domain().iter().zip(expected) {
			let value = fz
				.evaluate_at_point(x, &[evaluate_univariate(&fw_coeffs, x)])
				.unwrap();
			assert_eq!(value, expected);
		}
	}

	#[test]
	fn test_fmz_interpolates_products() {
		let params = params();
		let mz = [F::from_u64(7), F::from_u64(8)];
		let content = compute_fmz(&params, &mz, StdRng::seed_from_u64(1)).unwrap();
		let coeffs = ifft(&content, params.codeword_domain()).unwrap();
		assert!(num_nonzero_prefix(&coeffs) <= params.degree_bounds().f_mz);

		let expected = [mz[0], mz[1], F::ZERO, F::ZERO];
		for (x, expected) in params.constraint_domain().iter().zip(expected) {
			assert_eq!(evaluate_univariate(&coeffs, x), expected);
		}
	}

	#[test]
	fn test_masks_differ_across_runs() {
		let params = params();
		let mz = [F::ONE];
		let a = compute_fmz(&params, &mz, StdRng::seed_from_u64(2)).unwrap();
		let b = compute_fmz(&params, &mz, StdRng::seed_from_u64(3)).unwrap();
		assert_ne!(a, b);
	}
}
