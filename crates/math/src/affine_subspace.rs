// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_utils::bail;

use super::error::Error;

/// An affine $\mathbb{F}_2$-subspace `shift + span(basis)` of a binary field.
///
/// The basis elements are ordered, which implies an ordering on the subspace elements: element
/// `i` is `shift` plus the sum of the basis elements selected by the set bits of `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffineSubspace<F: BinaryField> {
	basis: Vec<F>,
	shift: F,
}

impl<F: BinaryField> AffineSubspace<F> {
	/// Creates a new subspace from a vector of ordered basis elements and a shift.
	///
	/// This constructor does not check that the basis elements are linearly independent.
	pub const fn new_unchecked(basis: Vec<F>, shift: F) -> Self {
		Self { basis, shift }
	}

	/// Creates a subspace spanned by the first `dim` standard basis elements `1, X, X^2, ...`.
	///
	/// ## Throws
	///
	/// * `Error::DomainSizeTooLarge` if `dim` exceeds the field degree.
	pub fn with_dim(dim: usize, shift: F) -> Result<Self, Error> {
		let basis = (0..dim)
			.map(|i| F::basis(i).map_err(|_| Error::DomainSizeTooLarge))
			.collect::<Result<_, _>>()?;
		Ok(Self { basis, shift })
	}

	/// Creates a new subspace using a prefix of the ordered basis elements and the same shift.
	///
	/// ## Throws
	///
	/// * `Error::DomainSizeTooLarge` if `dim` is greater than this subspace's dimension.
	pub fn reduce_dim(&self, dim: usize) -> Result<Self, Error> {
		if dim > self.dim() {
			bail!(Error::DomainSizeTooLarge);
		}
		Ok(Self {
			basis: self.basis[..dim].to_vec(),
			shift: self.shift,
		})
	}

	/// Returns the dimension of the subspace.
	pub fn dim(&self) -> usize {
		self.basis.len()
	}

	/// Number of elements, `2^dim`.
	pub fn size(&self) -> usize {
		1 << self.basis.len()
	}

	/// Returns the slice of ordered basis elements.
	pub fn basis(&self) -> &[F] {
		&self.basis
	}

	pub fn shift(&self) -> F {
		self.shift
	}

	pub fn get(&self, index: usize) -> F {
		self.basis
			.iter()
			.take(usize::BITS as usize)
			.enumerate()
			.fold(self.shift, |acc, (i, basis_i)| {
				if (index >> i) & 1 != 0 {
					acc + *basis_i
				} else {
					acc
				}
			})
	}

	pub fn get_checked(&self, index: usize) -> Result<F, Error> {
		if index >= self.size() {
			return Err(Error::ArgumentRangeError {
				arg: "index".to_string(),
				range: 0..self.size(),
			});
		}
		Ok(self.get(index))
	}

	/// Returns an iterator over all elements of the subspace in order.
	pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
		(0..self.size()).map(|i| self.get(i))
	}

	/// All elements in order, computed with one addition per element.
	pub fn elements(&self) -> Vec<F> {
		all_subset_sums(&self.basis, self.shift)
	}

	/// `x^exponent` for every element `x`, in order.
	///
	/// Squaring is $\mathbb{F}_2$-linear, so squaring the basis and the shift squares every
	/// element in place. Each set bit of `exponent` costs one subset-sum pass and one
	/// multiplication per element.
	pub fn pow_elements(&self, exponent: u64) -> Vec<F> {
		let mut result = vec![F::ONE; self.size()];
		let mut basis = self.basis.clone();
		let mut shift = self.shift;
		let mut remaining = exponent;
		while remaining != 0 {
			if remaining & 1 == 1 {
				for (acc, x) in result.iter_mut().zip(all_subset_sums(&basis, shift)) {
					*acc *= x;
				}
			}
			remaining >>= 1;
			if remaining != 0 {
				for b in basis.iter_mut() {
					*b = b.square();
				}
				shift = shift.square();
			}
		}
		result
	}
}

/// Returns `shift + sum(basis[j] for set bits j of i)` for every `i < 2^basis.len()`.
pub fn all_subset_sums<F: BinaryField>(basis: &[F], shift: F) -> Vec<F> {
	let mut result = Vec::with_capacity(1 << basis.len());
	result.push(shift);
	for &b in basis {
		let len = result.len();
		for j in 0..len {
			let value = result[j] + b;
			result.push(value);
		}
	}
	result
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use preon_field::{BinaryField192b, BinaryField64b, Field};

	use super::*;

	#[test]
	fn test_standard_subspace_iterates_integers() {
		let subspace = AffineSubspace::<BinaryField64b>::with_dim(8, BinaryField64b::ZERO).unwrap();
		for i in 0..=255 {
			assert_eq!(subspace.get(i), BinaryField64b::new(i as u64));
		}
	}

	#[test]
	fn test_shifted_subspace() {
		let shift = BinaryField192b::from_u64(1 << 6);
		let subspace = AffineSubspace::with_dim(6, shift).unwrap();
		assert_eq!(subspace.get(0), shift);
		assert_eq!(subspace.get(63), BinaryField192b::from_u64(127));
		assert_eq!(subspace.elements(), subspace.iter().collect::<Vec<_>>());
	}

	#[test]
	fn test_pow_elements() {
		let shift = BinaryField192b::from_u64(1 << 9);
		let subspace = AffineSubspace::with_dim(5, shift).unwrap();
		for exponent in [0, 1, 2, 7, 64, 1000] {
			let expected = subspace.iter().map(|x| x.pow(exponent)).collect::<Vec<_>>();
			assert_eq!(subspace.pow_elements(exponent), expected);
		}
	}

	#[test]
	fn test_subspace_range_error() {
		let subspace = AffineSubspace::<BinaryField64b>::with_dim(3, BinaryField64b::ZERO).unwrap();
		assert_matches!(subspace.get_checked(8), Err(Error::ArgumentRangeError { .. }));
		assert_matches!(subspace.reduce_dim(4), Err(Error::DomainSizeTooLarge));
		assert_eq!(subspace.reduce_dim(2).unwrap().size(), 4);
	}

	#[test]
	fn test_with_dim_too_large() {
		assert_matches!(
			AffineSubspace::<BinaryField64b>::with_dim(65, BinaryField64b::ZERO),
			Err(Error::DomainSizeTooLarge)
		);
	}
}
