// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{Debug, Display},
	hash::Hash,
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use preon_utils::{DeserializeBytes, SerializeBytes};
use rand::RngCore;

use crate::Error;

/// This trait is based on `ff::Field` with the functionality the IOP does not use removed.
pub trait Field:
	Sized
	+ Eq
	+ Copy
	+ Clone
	+ Default
	+ Send
	+ Sync
	+ Debug
	+ Display
	+ Hash
	+ 'static
	+ Neg<Output = Self>
	+ Add<Output = Self>
	+ Sub<Output = Self>
	+ Mul<Output = Self>
	+ Sum
	+ Product
	+ AddAssign
	+ SubAssign
	+ MulAssign
	+ SerializeBytes
	+ DeserializeBytes
{
	/// The zero element of the field, the additive identity.
	const ZERO: Self;

	/// The one element of the field, the multiplicative identity.
	const ONE: Self;

	/// Size of the canonical byte encoding.
	const N_BYTES: usize;

	/// Returns an element chosen uniformly at random using a user-provided RNG.
	fn random(rng: impl RngCore) -> Self;

	/// Returns true iff this element is zero.
	fn is_zero(&self) -> bool {
		*self == Self::ZERO
	}

	#[must_use]
	fn square(&self) -> Self {
		*self * *self
	}

	/// Computes the multiplicative inverse of this element,
	/// failing if the element is zero.
	fn invert(&self) -> Option<Self>;

	/// Exponentiates `self` by `exp`.
	fn pow(&self, exp: u64) -> Self {
		let mut res = Self::ONE;
		for i in (0..64).rev() {
			res = res.square();
			if (exp >> i) & 1 == 1 {
				res *= *self;
			}
		}
		res
	}

	/// Appends the canonical little-endian encoding to `out`.
	fn write_bytes(&self, out: &mut Vec<u8>);
}

/// A field of characteristic two, presented in a polynomial basis over GF(2).
pub trait BinaryField: Field + From<crate::BinaryField64b> {
	/// Extension degree over GF(2).
	const DEGREE: usize;

	/// Embeds an integer, read as a polynomial over GF(2), into the base limb.
	fn from_u64(value: u64) -> Self {
		Self::from(crate::BinaryField64b::new(value))
	}

	/// The `i`-th element of the GF(2) basis, i.e. the polynomial `X^i`.
	fn basis(i: usize) -> Result<Self, Error>;
}

/// Inverts by raising to `2^n - 2`, using `n - 1` squarings and multiplications.
pub(crate) fn invert_by_frobenius<F: Field>(value: F, n_bits: usize) -> Option<F> {
	if value.is_zero() {
		return None;
	}
	let mut acc = F::ONE;
	let mut sq = value;
	for _ in 1..n_bits {
		sq = sq.square();
		acc *= sq;
	}
	Some(acc)
}
