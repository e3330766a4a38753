// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_math::{AffineSubspace, VanishingPolynomial};
use preon_utils::bail;
use rayon::prelude::*;

use crate::oracle::{Error, VirtualOracle};

/// `g = f - eps^{-1} * claimed_sum * X^{|H| - 1} - Z_H * h`.
///
/// `eps` is the coefficient of `X` in `Z_H`. For a subspace `H` it equals the sum of
/// `x^{|H| - 1}` over `H`, so subtracting the scaled monomial removes exactly the part of `g`
/// that carries the sum.
#[derive(Debug, Clone)]
pub struct SumcheckG<F: BinaryField> {
	summation_vanishing: VanishingPolynomial<F>,
	eps_inv: F,
	claimed_sum: Option<F>,
}

impl<F: BinaryField> SumcheckG<F> {
	pub fn new(summation_domain: &AffineSubspace<F>) -> Result<Self, Error> {
		let summation_vanishing = VanishingPolynomial::new(summation_domain);
		let eps_inv = summation_vanishing
			.linear_coefficient()
			.invert()
			.ok_or(preon_math::Error::DegenerateBasis)?;
		Ok(Self {
			summation_vanishing,
			eps_inv,
			claimed_sum: None,
		})
	}

	pub fn set_claimed_sum(&mut self, claimed_sum: F) -> Result<(), Error> {
		if self.claimed_sum.is_some() {
			bail!(Error::AlreadySet("the claimed sum"));
		}
		self.claimed_sum = Some(claimed_sum);
		Ok(())
	}

	/// The coefficient of `X^{|H| - 1}` removed from `f`.
	fn sum_coefficient(&self) -> Result<F, Error> {
		let claimed_sum = self
			.claimed_sum
			.ok_or(Error::MissingState("the claimed sum"))?;
		Ok(self.eps_inv * claimed_sum)
	}

	fn sum_exponent(&self) -> u64 {
		self.summation_vanishing.degree() as u64 - 1
	}
}

impl<F: BinaryField> VirtualOracle<F> for SumcheckG<F> {
	fn arity(&self) -> usize {
		2
	}

	fn evaluate_content(
		&self,
		codeword_domain: &AffineSubspace<F>,
		constituents: &[&[F]],
	) -> Result<Vec<F>, Error> {
		let [f, h] = constituents else {
			bail!(Error::IncorrectArgumentLength {
				arg: "constituents",
				expected: 2,
				actual: constituents.len(),
			});
		};
		let sum_coefficient = self.sum_coefficient()?;
		let exponent = self.sum_exponent();
		let vanishing = self
			.summation_vanishing
			.evaluate_over_domain(codeword_domain);

		Ok((codeword_domain.elements(), vanishing, *f, *h)
			.into_par_iter()
			.map(|(x, z_h, &f, &h)| f - sum_coefficient * x.pow(exponent) - z_h * h)
			.collect())
	}

	fn evaluate_at_point(&self, point: F, constituents: &[F]) -> Result<F, Error> {
		let &[f, h] = constituents else {
			bail!(Error::IncorrectArgumentLength {
				arg: "constituents",
				expected: 2,
				actual: constituents.len(),
			});
		};
		let sum_coefficient = self.sum_coefficient()?;
		Ok(f - sum_coefficient * point.pow(self.sum_exponent())
			- self.summation_vanishing.evaluate(point) * h)
	}
}
