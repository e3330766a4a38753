// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{Debug, Formatter},
	mem,
};

use generic_array::{
	typenum::{U32, U48, U64},
	GenericArray,
};
use tiny_keccak::{Hasher as _, Sha3};

use crate::Hasher;

macro_rules! sha3_hasher {
	($(#[$meta:meta])* $name:ident, $ctor:ident, $size:ty) => {
		$(#[$meta])*
		#[derive(Clone)]
		pub struct $name(Sha3);

		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				f.write_str(stringify!($name))
			}
		}

		impl Default for $name {
			fn default() -> Self {
				<Self as Hasher<u8>>::new()
			}
		}

		impl Hasher<u8> for $name {
			type Digest = GenericArray<u8, $size>;

			fn new() -> Self {
				Self(Sha3::$ctor())
			}

			fn update(&mut self, data: impl AsRef<[u8]>) {
				self.0.update(data.as_ref());
			}

			fn chain_update(mut self, data: impl AsRef<[u8]>) -> Self {
				Hasher::update(&mut self, data);
				self
			}

			fn finalize(self) -> Self::Digest {
				let mut out = Self::Digest::default();
				Hasher::finalize_into(self, &mut out);
				out
			}

			fn finalize_into(self, out: &mut Self::Digest) {
				self.0.finalize(out.as_mut_slice());
			}

			fn finalize_reset(&mut self) -> Self::Digest {
				Hasher::finalize(mem::take(self))
			}

			fn finalize_into_reset(&mut self, out: &mut Self::Digest) {
				Hasher::finalize_into(mem::take(self), out);
			}

			fn reset(&mut self) {
				*self = Self::default();
			}
		}
	};
}

sha3_hasher!(
	/// SHA3-256, used by the test parameter sets.
	Sha3_256,
	v256,
	U32
);

sha3_hasher!(
	/// SHA3-384, the hash of the 128-bit security level.
	Sha3_384,
	v384,
	U48
);

sha3_hasher!(
	/// SHA3-512, the hash of the 192 and 256-bit security levels.
	Sha3_512,
	v512,
	U64
);
