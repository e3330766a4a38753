// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{Debug, Display, Formatter},
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use bytes::{Buf, BufMut};
use preon_utils::{serialization::Error as SerializationError, DeserializeBytes, SerializeBytes};
use rand::RngCore;

use crate::{field::invert_by_frobenius, BinaryField, BinaryField64b, Error, Field};

/// Defines an extension of [`BinaryField64b`] of the given degree.
///
/// The modulus is `Y^degree + sum(c_i * Y^i)`, given as the list of `(i, c_i)` with `c_i` a
/// [`BinaryField64b`] value. Coefficient `0` of an element embeds the base field.
macro_rules! binary_extension_field {
	($(#[$meta:meta])* $name:ident, $degree:literal, [$(($idx:literal, $coeff:literal)),+ $(,)?]) => {
		$(#[$meta])*
		#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
		pub struct $name([BinaryField64b; $degree]);

		impl $name {
			pub const fn new(coeffs: [BinaryField64b; $degree]) -> Self {
				Self(coeffs)
			}

			pub const fn from_limbs(limbs: [u64; $degree]) -> Self {
				let mut coeffs = [BinaryField64b::new(0); $degree];
				let mut i = 0;
				while i < $degree {
					coeffs[i] = BinaryField64b::new(limbs[i]);
					i += 1;
				}
				Self(coeffs)
			}

			pub fn coeffs(&self) -> &[BinaryField64b; $degree] {
				&self.0
			}
		}

		impl From<BinaryField64b> for $name {
			fn from(value: BinaryField64b) -> Self {
				let mut coeffs = [BinaryField64b::ZERO; $degree];
				coeffs[0] = value;
				Self(coeffs)
			}
		}

		impl Neg for $name {
			type Output = Self;

			fn neg(self) -> Self {
				self
			}
		}

		impl Add for $name {
			type Output = Self;

			fn add(mut self, rhs: Self) -> Self {
				self += rhs;
				self
			}
		}

		impl Sub for $name {
			type Output = Self;

			#[allow(clippy::suspicious_arithmetic_impl)]
			fn sub(self, rhs: Self) -> Self {
				self + rhs
			}
		}

		impl Mul for $name {
			type Output = Self;

			fn mul(self, rhs: Self) -> Self {
				let mut wide = [BinaryField64b::ZERO; 2 * $degree - 1];
				for (i, &a) in self.0.iter().enumerate() {
					for (j, &b) in rhs.0.iter().enumerate() {
						wide[i + j] += a * b;
					}
				}
				for d in ($degree..2 * $degree - 1).rev() {
					let top = wide[d];
					$(
						wide[d - $degree + $idx] += top * BinaryField64b::new($coeff);
					)+
				}
				let mut coeffs = [BinaryField64b::ZERO; $degree];
				coeffs.copy_from_slice(&wide[..$degree]);
				Self(coeffs)
			}
		}

		impl AddAssign for $name {
			fn add_assign(&mut self, rhs: Self) {
				for (a, b) in self.0.iter_mut().zip(rhs.0) {
					*a += b;
				}
			}
		}

		impl SubAssign for $name {
			fn sub_assign(&mut self, rhs: Self) {
				*self += rhs;
			}
		}

		impl MulAssign for $name {
			fn mul_assign(&mut self, rhs: Self) {
				*self = *self * rhs;
			}
		}

		impl Sum for $name {
			fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
				iter.fold(Self::ZERO, |acc, x| acc + x)
			}
		}

		impl Product for $name {
			fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
				iter.fold(Self::ONE, |acc, x| acc * x)
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				write!(f, "0x")?;
				for limb in self.0.iter().rev() {
					write!(f, "{:016x}", limb.val())?;
				}
				Ok(())
			}
		}

		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				write!(f, "{}({})", stringify!($name), self)
			}
		}

		impl SerializeBytes for $name {
			fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
				for limb in &self.0 {
					limb.serialize(&mut write_buf)?;
				}
				Ok(())
			}
		}

		impl DeserializeBytes for $name {
			fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
				let mut coeffs = [BinaryField64b::ZERO; $degree];
				for limb in coeffs.iter_mut() {
					*limb = BinaryField64b::deserialize(&mut read_buf)?;
				}
				Ok(Self(coeffs))
			}
		}

		impl Field for $name {
			const ZERO: Self = Self([BinaryField64b::new(0); $degree]);
			const ONE: Self = Self::from_limbs({
				let mut limbs = [0u64; $degree];
				limbs[0] = 1;
				limbs
			});
			const N_BYTES: usize = 8 * $degree;

			fn random(mut rng: impl RngCore) -> Self {
				let mut coeffs = [BinaryField64b::ZERO; $degree];
				for limb in coeffs.iter_mut() {
					*limb = BinaryField64b::random(&mut rng);
				}
				Self(coeffs)
			}

			fn invert(&self) -> Option<Self> {
				invert_by_frobenius(*self, Self::DEGREE)
			}

			fn write_bytes(&self, out: &mut Vec<u8>) {
				for limb in &self.0 {
					limb.write_bytes(out);
				}
			}
		}

		impl BinaryField for $name {
			const DEGREE: usize = 64 * $degree;

			fn basis(i: usize) -> Result<Self, Error> {
				if i >= Self::DEGREE {
					return Err(Error::IndexOutOfRange {
						index: i,
						max: Self::DEGREE,
					});
				}
				let mut limbs = [0u64; $degree];
				limbs[i / 64] = 1 << (i % 64);
				Ok(Self::from_limbs(limbs))
			}
		}
	};
}

binary_extension_field!(
	/// GF(2^192) as GF(2^64)[Y] / (Y^3 + Y + 1).
	BinaryField192b,
	3,
	[(0, 1), (1, 1)]
);

binary_extension_field!(
	/// GF(2^256) as GF(2^64)[Y] / (Y^4 + Y^3 + Y^2 + X*Y + X), where `X` generates GF(2^64).
	BinaryField256b,
	4,
	[(0, 2), (1, 2), (2, 1), (3, 1)]
);

binary_extension_field!(
	/// GF(2^320) as GF(2^64)[Y] / (Y^5 + Y^2 + 1).
	BinaryField320b,
	5,
	[(0, 1), (2, 1)]
);
