// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_math::AffineSubspace;

use super::{error::Error, gao_mateer::GaoMateerNTT};

/// The binary field additive NTT over a fixed affine subspace.
///
/// In the forward direction, the transform maps the monomial coefficients of a polynomial of
/// degree below `|D|` to its evaluations at the elements of the domain `D`, in subspace order.
/// The inverse transformation interpolates.
pub trait AdditiveNTT<F: BinaryField> {
	/// The evaluation domain.
	fn domain(&self) -> &AffineSubspace<F>;

	/// Evaluates a polynomial over the domain.
	///
	/// ## Throws
	///
	/// * `Error::DomainTooSmall` if there are more coefficients than domain elements. Fewer
	///   coefficients are zero-extended.
	fn forward_transform(&self, coeffs: &[F]) -> Result<Vec<F>, Error>;

	/// Interpolates evaluations over the domain into monomial coefficients.
	///
	/// ## Throws
	///
	/// * `Error::IncorrectEvaluationCount` unless there is exactly one value per domain element.
	fn inverse_transform(&self, evals: &[F]) -> Result<Vec<F>, Error>;
}

/// One-shot forward transform, see [`AdditiveNTT::forward_transform`].
pub fn fft<F: BinaryField>(coeffs: &[F], domain: &AffineSubspace<F>) -> Result<Vec<F>, Error> {
	GaoMateerNTT::new(domain.clone())?.forward_transform(coeffs)
}

/// One-shot inverse transform, see [`AdditiveNTT::inverse_transform`].
pub fn ifft<F: BinaryField>(evals: &[F], domain: &AffineSubspace<F>) -> Result<Vec<F>, Error> {
	GaoMateerNTT::new(domain.clone())?.inverse_transform(evals)
}
