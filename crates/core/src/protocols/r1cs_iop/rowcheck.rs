// Copyright 2024-2025 Irreducible Inc.

use preon_field::{util::batch_inverse_and_mul, BinaryField};
use preon_math::{AffineSubspace, VanishingPolynomial};
use preon_utils::bail;
use rayon::prelude::*;

use crate::oracle::{Error, VirtualOracle};

/// `(fAz * fBz - fCz) / Z_C`, which has low degree only if every constraint holds.
#[derive(Debug, Clone)]
pub struct Rowcheck<F: BinaryField> {
	constraint_vanishing: VanishingPolynomial<F>,
}

impl<F: BinaryField> Rowcheck<F> {
	pub fn new(constraint_domain: &AffineSubspace<F>) -> Self {
		Self {
			constraint_vanishing: VanishingPolynomial::new(constraint_domain),
		}
	}

	/// The inverse of `Z_C` at every element of `codeword_domain`.
	fn inverse_denominators(&self, codeword_domain: &AffineSubspace<F>) -> Result<Vec<F>, Error> {
		let vanishing = &self.constraint_vanishing;
		let constant = vanishing.constant_coefficient();
		let kernel_dim = codeword_domain
			.basis()
			.iter()
			.take_while(|&&b| (vanishing.evaluate(b) - constant).is_zero())
			.count();
		let image = vanishing.image_subspace(codeword_domain);

		if image.dim() + kernel_dim == codeword_domain.dim() {
			// Z_C is constant on each coset of the kernel, so one inversion per coset suffices.
			let coset_inverses = batch_inverse_and_mul(&image.elements(), F::ONE)
				.map_err(|_| Error::VanishingDenominator)?;
			Ok((0..codeword_domain.size())
				.into_par_iter()
				.map(|position| coset_inverses[position >> kernel_dim])
				.collect())
		} else {
			batch_inverse_and_mul(&vanishing.evaluate_over_domain(codeword_domain), F::ONE)
				.map_err(|_| Error::VanishingDenominator)
		}
	}
}

impl<F: BinaryField> VirtualOracle<F> for Rowcheck<F> {
	fn arity(&self) -> usize {
		3
	}

	fn evaluate_content(
		&self,
		codeword_domain: &AffineSubspace<F>,
		constituents: &[&[F]],
	) -> Result<Vec<F>, Error> {
		let [f_az, f_bz, f_cz] = constituents else {
			bail!(Error::IncorrectArgumentLength {
				arg: "constituents",
				expected: 3,
				actual: constituents.len(),
			});
		};
		let inverses = self.inverse_denominators(codeword_domain)?;
		Ok((inverses, *f_az, *f_bz, *f_cz)
			.into_par_iter()
			.map(|(inverse, &a, &b, &c)| (a * b - c) * inverse)
			.collect())
	}

	fn evaluate_at_point(&self, point: F, constituents: &[F]) -> Result<F, Error> {
		let &[a, b, c] = constituents else {
			bail!(Error::IncorrectArgumentLength {
				arg: "constituents",
				expected: 3,
				actual: constituents.len(),
			});
		};
		let inverse = self
			.constraint_vanishing
			.evaluate(point)
			.invert()
			.ok_or(Error::VanishingDenominator)?;
		Ok((a * b - c) * inverse)
	}
}
