// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{Debug, Display, Formatter},
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use bytes::{Buf, BufMut};
use preon_utils::{serialization::Error as SerializationError, DeserializeBytes, SerializeBytes};
use rand::RngCore;

use crate::{field::invert_by_frobenius, BinaryField, Error, Field};

/// Low terms of the reduction polynomial `X^64 + X^4 + X^3 + X + 1`.
const REDUCTION_TERMS: u64 = 0x1b;

/// GF(2^64) as GF(2)[X] / (X^64 + X^4 + X^3 + X + 1). Bit `i` of the value is the coefficient
/// of `X^i`.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct BinaryField64b(u64);

impl BinaryField64b {
	pub const fn new(value: u64) -> Self {
		Self(value)
	}

	pub const fn val(self) -> u64 {
		self.0
	}

	/// Multiplication by `X`.
	#[inline]
	pub const fn mul_x(self) -> Self {
		Self((self.0 << 1) ^ ((self.0 >> 63) * REDUCTION_TERMS))
	}
}

/// Carry-less product of two 64-bit polynomials.
#[inline]
fn clmul(a: u64, b: u64) -> u128 {
	let a = a as u128;
	let mut result = 0u128;
	for i in 0..64 {
		let mask = 0u128.wrapping_sub(((b >> i) & 1) as u128);
		result ^= (a << i) & mask;
	}
	result
}

/// Reduces a 128-bit product modulo `X^64 + X^4 + X^3 + X + 1`.
#[inline]
fn reduce(product: u128) -> u64 {
	let lo = product as u64;
	let hi = (product >> 64) as u64;
	// Fold the bits that X^64 * hi pushes past degree 63 back into hi first.
	let t = hi ^ (hi >> 63) ^ (hi >> 61) ^ (hi >> 60);
	lo ^ t ^ (t << 1) ^ (t << 3) ^ (t << 4)
}

impl Neg for BinaryField64b {
	type Output = Self;

	fn neg(self) -> Self {
		self
	}
}

impl Add for BinaryField64b {
	type Output = Self;

	#[allow(clippy::suspicious_arithmetic_impl)]
	fn add(self, rhs: Self) -> Self {
		Self(self.0 ^ rhs.0)
	}
}

impl Sub for BinaryField64b {
	type Output = Self;

	#[allow(clippy::suspicious_arithmetic_impl)]
	fn sub(self, rhs: Self) -> Self {
		Self(self.0 ^ rhs.0)
	}
}

impl Mul for BinaryField64b {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		Self(reduce(clmul(self.0, rhs.0)))
	}
}

impl AddAssign for BinaryField64b {
	fn add_assign(&mut self, rhs: Self) {
		*self = *self + rhs;
	}
}

impl SubAssign for BinaryField64b {
	fn sub_assign(&mut self, rhs: Self) {
		*self = *self - rhs;
	}
}

impl MulAssign for BinaryField64b {
	fn mul_assign(&mut self, rhs: Self) {
		*self = *self * rhs;
	}
}

impl Sum for BinaryField64b {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ZERO, |acc, x| acc + x)
	}
}

impl Product for BinaryField64b {
	fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ONE, |acc, x| acc * x)
	}
}

impl Display for BinaryField64b {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "0x{:016x}", self.0)
	}
}

impl Debug for BinaryField64b {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "BinaryField64b({})", self)
	}
}

impl SerializeBytes for BinaryField64b {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), SerializationError> {
		self.0.serialize(write_buf)
	}
}

impl DeserializeBytes for BinaryField64b {
	fn deserialize(read_buf: impl Buf) -> Result<Self, SerializationError> {
		u64::deserialize(read_buf).map(Self)
	}
}

impl Field for BinaryField64b {
	const ZERO: Self = Self(0);
	const ONE: Self = Self(1);
	const N_BYTES: usize = 8;

	fn random(mut rng: impl RngCore) -> Self {
		Self(rng.next_u64())
	}

	fn invert(&self) -> Option<Self> {
		invert_by_frobenius(*self, 64)
	}

	fn write_bytes(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.0.to_le_bytes());
	}
}

impl BinaryField for BinaryField64b {
	const DEGREE: usize = 64;

	fn basis(i: usize) -> Result<Self, Error> {
		if i >= Self::DEGREE {
			return Err(Error::IndexOutOfRange {
				index: i,
				max: Self::DEGREE,
			});
		}
		Ok(Self(1 << i))
	}
}
