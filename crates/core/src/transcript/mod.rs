// Copyright 2024-2025 Irreducible Inc.

//! The Fiat-Shamir transcript.
//!
//! The state is a single digest. Absorbing hashes new data into it and squeezing derives values
//! from `H(state || round_tag || index)` without changing it. The round schedule of the protocol
//! lives in [`schedule`].

mod error;
pub mod schedule;

pub use error::Error;
use preon_field::Field;
use preon_hash::{hash_concat, Hasher};
use preon_utils::{bail, DeserializeBytes};

#[derive(Debug, Clone)]
pub struct Transcript<H: Hasher<u8>> {
	state: H::Digest,
}

impl<H: Hasher<u8>> Transcript<H> {
	/// Starts a transcript bound to `message`.
	pub fn new(message: &[u8]) -> Self {
		Self {
			state: hash_concat::<H>(&[message]),
		}
	}

	pub fn state(&self) -> &H::Digest {
		&self.state
	}

	/// Sets the state to `H(state || parts...)`.
	pub fn absorb(&mut self, parts: &[&[u8]]) {
		let mut hasher = H::new();
		hasher.update(self.state.as_ref());
		for part in parts {
			hasher.update(part);
		}
		self.state = hasher.finalize();
	}

	/// Sets the state to `H(parts...)`.
	///
	/// The previous state is not hashed in, so `parts` must include something derived from it.
	pub fn reseed(&mut self, parts: &[&[u8]]) {
		self.state = hash_concat::<H>(parts);
	}

	/// Derives `count` field elements, element `i` being the prefix of `H(state || tag || i)`
	/// for `i = 1..=count`.
	pub fn squeeze<F: Field>(&self, count: usize, tag: u8) -> Result<Vec<F>, Error> {
		let digest_bytes = H::digest_size();
		if F::N_BYTES > digest_bytes {
			bail!(Error::DigestTooShort {
				field_bytes: F::N_BYTES,
				digest_bytes,
			});
		}
		if count > u8::MAX as usize {
			bail!(Error::TooManyChallenges { count });
		}

		(1..=count as u8)
			.map(|index| {
				let digest = hash_concat::<H>(&[self.state.as_ref(), &[tag], &[index]]);
				Ok(F::deserialize(&digest.as_ref()[..F::N_BYTES])?)
			})
			.collect()
	}

	/// Derives `count` positions in `0..modulus` from `H(state || tag || q)` with `q` a
	/// little-endian `u32`, for `q = 1..=count`.
	pub fn squeeze_positions(&self, count: usize, tag: u8, modulus: usize) -> Result<Vec<usize>, Error> {
		if modulus == 0 {
			bail!(Error::EmptyDomain);
		}
		(1..=count as u32)
			.map(|query| {
				let digest =
					hash_concat::<H>(&[self.state.as_ref(), &[tag], &query.to_le_bytes()]);
				let value = u64::deserialize(&digest.as_ref()[..8])?;
				Ok((value % modulus as u64) as usize)
			})
			.collect()
	}
}

/// Canonical byte encoding of a sequence of field elements, as absorbed into the transcript.
pub fn field_bytes<F: Field>(values: &[F]) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(values.len() * F::N_BYTES);
	for value in values {
		value.write_bytes(&mut bytes);
	}
	bytes
}
