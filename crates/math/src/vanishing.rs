// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;

use crate::{all_subset_sums, AffineSubspace, Error};

/// The vanishing polynomial of an affine subspace, stored in linearized form.
///
/// For `H = shift + span(b_0, ..., b_{k-1})` this is
///
/// $$Z_H(X) = \sum_{i=0}^{k} a_i X^{2^i} + c,$$
///
/// where the linear part $L(X) = \sum a_i X^{2^i}$ vanishes on `span(b)` and `c = L(shift)`.
/// `Z_H` is monic of degree `|H|`. Because `L` is additive, evaluating `Z_H` over a whole affine
/// subspace takes one evaluation per basis element followed by subset sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanishingPolynomial<F: BinaryField> {
	/// `linearized_coeffs[i]` multiplies `X^{2^i}`.
	linearized_coeffs: Vec<F>,
	constant: F,
}

impl<F: BinaryField> VanishingPolynomial<F> {
	pub fn new(domain: &AffineSubspace<F>) -> Self {
		let mut coeffs = vec![F::ONE];
		for &b in domain.basis() {
			// P <- P^2 + P(b) * P. Squaring shifts each term to the next power of two.
			let c = eval_linearized(&coeffs, b);
			let mut next = Vec::with_capacity(coeffs.len() + 1);
			next.push(c * coeffs[0]);
			for i in 1..coeffs.len() {
				next.push(coeffs[i - 1].square() + c * coeffs[i]);
			}
			next.push(coeffs[coeffs.len() - 1].square());
			coeffs = next;
		}
		let constant = eval_linearized(&coeffs, domain.shift());
		Self {
			linearized_coeffs: coeffs,
			constant,
		}
	}

	/// Degree of the polynomial, which equals the size of the subspace.
	pub fn degree(&self) -> usize {
		1 << (self.linearized_coeffs.len() - 1)
	}

	/// Coefficient of `X`, the derivative of `Z_H`.
	pub fn linear_coefficient(&self) -> F {
		self.linearized_coeffs[0]
	}

	pub fn constant_coefficient(&self) -> F {
		self.constant
	}

	pub fn evaluate(&self, x: F) -> F {
		eval_linearized(&self.linearized_coeffs, x) + self.constant
	}

	/// Evaluates the polynomial at every element of `domain`, in domain order.
	pub fn evaluate_over_domain(&self, domain: &AffineSubspace<F>) -> Vec<F> {
		let image_basis = domain
			.basis()
			.iter()
			.map(|&b| eval_linearized(&self.linearized_coeffs, b))
			.collect::<Vec<_>>();
		all_subset_sums(&image_basis, self.evaluate(domain.shift()))
	}

	/// Image of `domain` under the polynomial, as an affine subspace.
	///
	/// Basis elements in the kernel are dropped and duplicates are removed, so the result lists
	/// each distinct value of `Z_H` on `domain` exactly once, in order of first appearance.
	pub fn image_subspace(&self, domain: &AffineSubspace<F>) -> AffineSubspace<F> {
		let mut basis: Vec<F> = Vec::new();
		for &b in domain.basis() {
			let image = eval_linearized(&self.linearized_coeffs, b);
			if !image.is_zero() && !basis.contains(&image) {
				basis.push(image);
			}
		}
		AffineSubspace::new_unchecked(basis, self.evaluate(domain.shift()))
	}

	/// Dense coefficients, lowest degree first, of length `degree + 1`.
	pub fn to_dense(&self) -> Vec<F> {
		let mut dense = vec![F::ZERO; self.degree() + 1];
		dense[0] = self.constant;
		for (i, &coeff) in self.linearized_coeffs.iter().enumerate() {
			dense[1 << i] += coeff;
		}
		dense
	}

	/// Multiplies a dense polynomial by `Z_H`.
	pub fn mul_poly(&self, poly: &[F]) -> Vec<F> {
		if poly.is_empty() {
			return Vec::new();
		}
		let mut result = vec![F::ZERO; poly.len() + self.degree()];
		for (j, &p) in poly.iter().enumerate() {
			if p.is_zero() {
				continue;
			}
			result[j] += p * self.constant;
			for (i, &coeff) in self.linearized_coeffs.iter().enumerate() {
				result[j + (1 << i)] += p * coeff;
			}
		}
		result
	}

	/// Divides a dense polynomial by `Z_H`, returning `(quotient, remainder)`.
	///
	/// The remainder has exactly `degree()` coefficients and the quotient has
	/// `max(poly.len() - degree(), 0)` coefficients.
	pub fn divide(&self, poly: &[F]) -> (Vec<F>, Vec<F>) {
		let n = self.degree();
		let mut remainder = poly.to_vec();
		if remainder.len() <= n {
			remainder.resize(n, F::ZERO);
			return (Vec::new(), remainder);
		}

		let mut quotient = vec![F::ZERO; poly.len() - n];
		for d in (n..poly.len()).rev() {
			let q = remainder[d];
			if q.is_zero() {
				continue;
			}
			quotient[d - n] = q;
			remainder[d] = F::ZERO;
			let base = d - n;
			remainder[base] += q * self.constant;
			// The leading linearized term cancels remainder[d]; the rest land strictly below d.
			for (i, &coeff) in self.linearized_coeffs[..self.linearized_coeffs.len() - 1]
				.iter()
				.enumerate()
			{
				remainder[base + (1 << i)] += q * coeff;
			}
		}
		remainder.truncate(n);
		(quotient, remainder)
	}
}

fn eval_linearized<F: BinaryField>(coeffs: &[F], x: F) -> F {
	let mut power = x;
	let mut acc = F::ZERO;
	for &coeff in coeffs {
		acc += coeff * power;
		power = power.square();
	}
	acc
}

/// Checks that `domain` has a linearly independent basis by testing that its vanishing
/// polynomial has a nonzero derivative.
pub fn ensure_independent_basis<F: BinaryField>(domain: &AffineSubspace<F>) -> Result<(), Error> {
	if VanishingPolynomial::new(domain).linear_coefficient().is_zero() {
		return Err(Error::DegenerateBasis);
	}
	Ok(())
}
