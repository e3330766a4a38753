// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_math::{interpolate_at, AffineSubspace, VanishingPolynomial};
use preon_ntt::{fft, ifft};
use preon_utils::bail;
use rayon::prelude::*;

use super::input_values;
use crate::oracle::{Error, VirtualOracle};

/// The extension of the variable vector `z`, `fz = f1v + fw * Z_I`.
///
/// `f1v` interpolates `(1, public inputs, 0, ...)` over the input domain `I`, so `fz` agrees
/// with the public part of `z` on `I` and with `fw` shifted by `f1v` elsewhere.
#[derive(Debug, Clone)]
pub struct Fz<F: BinaryField> {
	input_domain: AffineSubspace<F>,
	input_vanishing: VanishingPolynomial<F>,
	num_public_inputs: usize,
	input_values: Option<Vec<F>>,
}

impl<F: BinaryField> Fz<F> {
	pub fn new(input_domain: AffineSubspace<F>, num_public_inputs: usize) -> Self {
		let input_vanishing = VanishingPolynomial::new(&input_domain);
		Self {
			input_domain,
			input_vanishing,
			num_public_inputs,
			input_values: None,
		}
	}

	pub fn set_primary_input(&mut self, primary: &[F]) -> Result<(), Error> {
		if self.input_values.is_some() {
			bail!(Error::AlreadySet("the primary input"));
		}
		if primary.len() != self.num_public_inputs || primary.len() >= self.input_domain.size() {
			bail!(Error::IncorrectArgumentLength {
				arg: "public inputs",
				expected: self.num_public_inputs,
				actual: primary.len(),
			});
		}
		self.input_values = Some(input_values(self.input_domain.size(), primary));
		Ok(())
	}

	fn input_values(&self) -> Result<&[F], Error> {
		self.input_values
			.as_deref()
			.ok_or(Error::MissingState("the primary input"))
	}
}

impl<F: BinaryField> VirtualOracle<F> for Fz<F> {
	fn arity(&self) -> usize {
		1
	}

	fn evaluate_content(
		&self,
		codeword_domain: &AffineSubspace<F>,
		constituents: &[&[F]],
	) -> Result<Vec<F>, Error> {
		let [fw] = constituents else {
			bail!(Error::IncorrectArgumentLength {
				arg: "constituents",
				expected: 1,
				actual: constituents.len(),
			});
		};
		let f1v_coeffs = ifft(self.input_values()?, &self.input_domain)?;
		let f1v = fft(&f1v_coeffs, codeword_domain)?;
		let vanishing = self.input_vanishing.evaluate_over_domain(codeword_domain);

		Ok((f1v, vanishing, *fw)
			.into_par_iter()
			.map(|(f1v, z_i, &fw)| f1v + fw * z_i)
			.collect())
	}

	fn evaluate_at_point(&self, point: F, constituents: &[F]) -> Result<F, Error> {
		let &[fw] = constituents else {
			bail!(Error::IncorrectArgumentLength {
				arg: "constituents",
				expected: 1,
				actual: constituents.len(),
			});
		};
		let f1v = interpolate_at(
			&self.input_domain,
			&self.input_vanishing,
			self.input_values()?,
			point,
		)?;
		Ok(f1v + fw * self.input_vanishing.evaluate(point))
	}
}
