// Copyright 2024-2025 Irreducible Inc.

use preon_field::{util::batch_inverse_and_mul, BinaryField};
use preon_hash::Hasher;
use preon_math::{all_subset_sums, AffineSubspace, VanishingPolynomial};
use preon_utils::bail;

use super::Error;
use crate::params::PreonParams;

/// The domain of one FRI round together with its localizer.
#[derive(Debug, Clone, Copy)]
pub struct FoldingDomain<'a, F: BinaryField> {
	domain: &'a AffineSubspace<F>,
	localizer: &'a AffineSubspace<F>,
	localizer_polynomial: &'a VanishingPolynomial<F>,
	/// Inverse of the coefficient of `X` in the localizer polynomial.
	eps_inv: F,
}

impl<'a, F: BinaryField> FoldingDomain<'a, F> {
	pub fn new(
		domain: &'a AffineSubspace<F>,
		localizer: &'a AffineSubspace<F>,
		localizer_polynomial: &'a VanishingPolynomial<F>,
	) -> Result<Self, Error> {
		if localizer.dim() > domain.dim() {
			bail!(Error::IncorrectCosetSize {
				expected: domain.size(),
				actual: localizer.size(),
			});
		}
		let eps_inv = localizer_polynomial
			.linear_coefficient()
			.invert()
			.ok_or(preon_math::Error::DegenerateBasis)?;
		Ok(Self {
			domain,
			localizer,
			localizer_polynomial,
			eps_inv,
		})
	}

	pub fn for_round<H: Hasher<u8>>(
		params: &'a PreonParams<F, H>,
		round: usize,
	) -> Result<Self, Error> {
		let num_rounds = params.num_reductions();
		if round >= num_rounds {
			bail!(Error::InvalidRound { round, num_rounds });
		}
		Self::new(
			&params.fri_domains()[round],
			&params.fri_localizer_domains()[round],
			&params.fri_localizer_polynomials()[round],
		)
	}

	/// The folding domains of every round, in order.
	pub fn all_rounds<H: Hasher<u8>>(params: &'a PreonParams<F, H>) -> Result<Vec<Self>, Error> {
		(0..params.num_reductions())
			.map(|round| Self::for_round(params, round))
			.collect()
	}

	pub fn domain(&self) -> &'a AffineSubspace<F> {
		self.domain
	}

	pub fn log_coset_size(&self) -> usize {
		self.localizer.dim()
	}

	pub fn coset_size(&self) -> usize {
		self.localizer.size()
	}

	/// Evaluates at `challenge` the interpolant of `values` over coset `coset_index`.
	///
	/// The coset consists of the domain elements `coset_index * coset_size + t` for
	/// `t < coset_size`, which are `s + localizer[t]` for the first element `s`. Its vanishing
	/// polynomial is `q(X) - q(s)`, whose derivative is the same constant as that of `q`.
	pub fn fold_coset(&self, coset_index: usize, values: &[F], challenge: F) -> Result<F, Error> {
		if values.len() != self.coset_size() {
			bail!(Error::IncorrectCosetSize {
				expected: self.coset_size(),
				actual: values.len(),
			});
		}
		let coset_start = self.domain.get(coset_index << self.log_coset_size());
		// differences[t] = challenge - (s + localizer[t])
		let differences = all_subset_sums(self.localizer.basis(), challenge + coset_start);
		if let Some(t) = differences.iter().position(|d| d.is_zero()) {
			return Ok(values[t]);
		}

		let coset_vanishing = self.localizer_polynomial.evaluate(challenge)
			- self.localizer_polynomial.evaluate(coset_start);
		let lagrange = batch_inverse_and_mul(&differences, coset_vanishing * self.eps_inv)?;
		Ok(lagrange
			.iter()
			.zip(values)
			.map(|(&coeff, &value)| coeff * value)
			.sum())
	}
}
