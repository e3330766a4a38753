// Copyright 2024-2025 Irreducible Inc.

use preon_field::{util::batch_inverse_and_mul, BinaryField};

use crate::{all_subset_sums, AffineSubspace, Error, VanishingPolynomial};

/// Evaluations at `x` of the Lagrange basis polynomials of `domain`, in domain order.
///
/// For a point outside the domain this is $Z_D(x) / (Z_D'(x) \cdot (x - d_i))$, where the
/// derivative of a subspace vanishing polynomial is the constant linear coefficient. For a point
/// inside the domain the result is the indicator vector of its position.
pub fn lagrange_coefficients<F: BinaryField>(
	domain: &AffineSubspace<F>,
	vanishing: &VanishingPolynomial<F>,
	x: F,
) -> Result<Vec<F>, Error> {
	// differences[i] = x - d_i
	let differences = all_subset_sums(domain.basis(), x + domain.shift());
	if let Some(position) = differences.iter().position(|d| d.is_zero()) {
		let mut indicator = vec![F::ZERO; differences.len()];
		indicator[position] = F::ONE;
		return Ok(indicator);
	}

	let eps_inv = vanishing
		.linear_coefficient()
		.invert()
		.ok_or(Error::DegenerateBasis)?;
	let k = vanishing.evaluate(x) * eps_inv;
	Ok(batch_inverse_and_mul(&differences, k)?)
}

/// Evaluates at `x` the unique polynomial of degree below `|domain|` taking `values` on `domain`.
pub fn interpolate_at<F: BinaryField>(
	domain: &AffineSubspace<F>,
	vanishing: &VanishingPolynomial<F>,
	values: &[F],
	x: F,
) -> Result<F, Error> {
	if values.len() != domain.size() {
		return Err(Error::IncorrectArgumentLength {
			arg: "values".to_string(),
			expected: domain.size(),
		});
	}
	let coeffs = lagrange_coefficients(domain, vanishing, x)?;
	Ok(coeffs.iter().zip(values).map(|(&c, &v)| c * v).sum())
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use preon_field::{BinaryField256b, Field};
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;
	use crate::evaluate_univariate;

	type F = BinaryField256b;

	#[test]
	fn test_interpolation_recovers_polynomial() {
		let mut rng = StdRng::seed_from_u64(0);
		let domain = AffineSubspace::<F>::with_dim(3, F::from_u64(1 << 4)).unwrap();
		let vanishing = VanishingPolynomial::new(&domain);
		let poly = (0..8).map(|_| F::random(&mut rng)).collect::<Vec<_>>();
		let values = domain
			.iter()
			.map(|d| evaluate_univariate(&poly, d))
			.collect::<Vec<_>>();

		let x = F::random(&mut rng);
		assert_eq!(
			interpolate_at(&domain, &vanishing, &values, x).unwrap(),
			evaluate_univariate(&poly, x)
		);
	}

	#[test]
	fn test_coefficients_sum_to_one() {
		let mut rng = StdRng::seed_from_u64(1);
		let domain = AffineSubspace::<F>::with_dim(4, F::ZERO).unwrap();
		let vanishing = VanishingPolynomial::new(&domain);
		let coeffs = lagrange_coefficients(&domain, &vanishing, F::random(&mut rng)).unwrap();
		assert_eq!(coeffs.into_iter().sum::<F>(), F::ONE);
	}

	#[test]
	fn test_point_in_domain() {
		let domain = AffineSubspace::<F>::with_dim(2, F::from_u64(4)).unwrap();
		let vanishing = VanishingPolynomial::new(&domain);
		let coeffs = lagrange_coefficients(&domain, &vanishing, F::from_u64(6)).unwrap();
		assert_eq!(coeffs, vec![F::ZERO, F::ZERO, F::ONE, F::ZERO]);
	}

	#[test]
	fn test_wrong_value_count() {
		let domain = AffineSubspace::<F>::with_dim(2, F::ZERO).unwrap();
		let vanishing = VanishingPolynomial::new(&domain);
		assert_matches!(
			interpolate_at(&domain, &vanishing, &[F::ONE], F::ONE),
			Err(Error::IncorrectArgumentLength { .. })
		);
	}
}
