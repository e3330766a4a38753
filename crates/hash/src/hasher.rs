// Copyright 2024-2025 Irreducible Inc.

use std::fmt::Debug;

use preon_utils::{DeserializeBytes, SerializeBytes};

/// Trait representing cryptographic hash functions which is generic over the input type.
///
/// This interface is largely based on the `digest::Digest` trait. The digest is a fixed-size
/// byte array, because Merkle nodes, transcript states and squeezed challenges are all read
/// back as raw bytes.
pub trait Hasher<T>: Clone + Send + Sync + 'static {
	/// The hash function output type.
	type Digest: Clone
		+ Debug
		+ Default
		+ Eq
		+ AsRef<[u8]>
		+ AsMut<[u8]>
		+ Send
		+ Sync
		+ SerializeBytes
		+ DeserializeBytes;

	fn new() -> Self;
	fn update(&mut self, data: impl AsRef<[T]>);
	fn chain_update(self, data: impl AsRef<[T]>) -> Self;
	fn finalize(self) -> Self::Digest;
	fn finalize_into(self, out: &mut Self::Digest);

	fn finalize_reset(&mut self) -> Self::Digest;
	fn finalize_into_reset(&mut self, out: &mut Self::Digest);
	fn reset(&mut self);

	/// Number of bytes in a digest.
	fn digest_size() -> usize {
		Self::Digest::default().as_ref().len()
	}
}

pub fn hash<T, H: Hasher<T>>(data: impl AsRef<[T]>) -> H::Digest {
	H::new().chain_update(data).finalize()
}

/// Hashes the concatenation of several byte strings without copying them together.
pub fn hash_concat<H: Hasher<u8>>(parts: &[&[u8]]) -> H::Digest {
	let mut hasher = H::new();
	for part in parts {
		hasher.update(part);
	}
	hasher.finalize()
}
