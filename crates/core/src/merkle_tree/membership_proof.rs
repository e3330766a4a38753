// Copyright 2024-2025 Irreducible Inc.

use bytes::{Buf, BufMut};
use preon_field::Field;
use preon_hash::Hasher;
use preon_utils::{
	bail,
	checked_arithmetics::log2_ceil_usize,
	serialization::{self, deserialize_bytes, deserialize_len},
	DeserializeBytes, SerializeBytes,
};

use super::{
	binary_merkle_tree::{hash_leaf, hash_pair},
	errors::{Error, VerificationError},
};

pub const MEMBERSHIP_PROOF_VERSION: u8 = 1;

/// Version byte followed by five `u64` header fields.
const HEADER_BYTESIZE: usize = 1 + 5 * 8;

/// An opening of several leaves of one tree against its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipProof<D> {
	/// Sibling digests in the order the verifier consumes them, leaf layer first.
	pub siblings: Vec<D>,
	/// The salt of every opened leaf, in position order.
	pub randomness: Vec<Vec<u8>>,
	/// Serialized size of one leaf's values.
	pub leaf_bytesize: usize,
	pub num_leaves: usize,
}

/// Public shape of a committed tree, fixed by the protocol parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeShape {
	pub num_leaves: usize,
	/// Field elements per leaf, i.e. the number of columns times the coset size.
	pub values_per_leaf: usize,
	pub zk_bytesize: usize,
	/// Upper bound on the number of leaves opened at once.
	pub max_openings: usize,
}

impl TreeShape {
	pub fn leaf_bytesize<F: Field>(&self) -> usize {
		self.values_per_leaf * F::N_BYTES
	}

	/// Upper bound on the sibling count of any minimal proof for this tree.
	pub fn max_siblings(&self) -> usize {
		let depth = log2_ceil_usize(self.num_leaves);
		(self.max_openings * depth).min(self.num_leaves.saturating_sub(1))
	}
}

impl<D: AsRef<[u8]>> MembershipProof<D> {
	/// Length of the serialized blob, header included.
	pub fn serialized_len(&self) -> usize {
		HEADER_BYTESIZE
			+ self
				.siblings
				.iter()
				.map(|digest| digest.as_ref().len())
				.sum::<usize>()
			+ self.randomness.iter().map(Vec::len).sum::<usize>()
	}
}

impl<D: AsRef<[u8]> + SerializeBytes> SerializeBytes for MembershipProof<D> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), serialization::Error> {
		MEMBERSHIP_PROOF_VERSION.serialize(&mut write_buf)?;
		(self.serialized_len() as u64).serialize(&mut write_buf)?;
		(self.siblings.len() as u64).serialize(&mut write_buf)?;
		(self.randomness.len() as u64).serialize(&mut write_buf)?;
		(self.leaf_bytesize as u64).serialize(&mut write_buf)?;
		(self.num_leaves as u64).serialize(&mut write_buf)?;
		for sibling in &self.siblings {
			sibling.serialize(&mut write_buf)?;
		}
		for salt in &self.randomness {
			if write_buf.remaining_mut() < salt.len() {
				return Err(serialization::Error::WriteBufferFull);
			}
			write_buf.put_slice(salt);
		}
		Ok(())
	}
}

impl<D: AsRef<[u8]> + Default + DeserializeBytes> MembershipProof<D> {
	/// Reads a blob written by [`SerializeBytes::serialize`], rejecting any header that does not
	/// match `shape` before reading the body.
	pub fn deserialize(
		mut read_buf: impl Buf,
		shape: &TreeShape,
		leaf_bytesize: usize,
	) -> Result<Self, Error> {
		let version = u8::deserialize(&mut read_buf)?;
		if version != MEMBERSHIP_PROOF_VERSION {
			return Err(serialization::Error::UnsupportedVersion(version).into());
		}
		let total_len = u64::deserialize(&mut read_buf)?;
		let num_siblings = deserialize_len(&mut read_buf, shape.max_siblings())?;
		let num_randomness = deserialize_len(&mut read_buf, shape.max_openings)?;
		let encoded_leaf_bytesize = u64::deserialize(&mut read_buf)?;
		let num_leaves = u64::deserialize(&mut read_buf)?;
		if encoded_leaf_bytesize != leaf_bytesize as u64 || num_leaves != shape.num_leaves as u64 {
			bail!(VerificationError::IncorrectProofShape);
		}

		let digest_size = D::default().as_ref().len();
		let expected_len =
			HEADER_BYTESIZE + num_siblings * digest_size + num_randomness * shape.zk_bytesize;
		if total_len != expected_len as u64 {
			bail!(VerificationError::IncorrectProofShape);
		}

		let siblings = (0..num_siblings)
			.map(|_| D::deserialize(&mut read_buf))
			.collect::<Result<Vec<_>, _>>()?;
		let randomness = (0..num_randomness)
			.map(|_| deserialize_bytes(&mut read_buf, shape.zk_bytesize))
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self {
			siblings,
			randomness,
			leaf_bytesize,
			num_leaves: shape.num_leaves,
		})
	}
}

/// Checks that `leaves` are the committed values at `positions` under `root`.
///
/// `leaves[i]` holds the oracle-major values of leaf `positions[i]`. The pairs may come in any
/// order and may repeat a position, as long as every copy carries the same values. The salts in
/// the proof follow the sorted distinct positions, and every sibling in the proof must be
/// consumed exactly once.
pub fn validate_membership_proof<F: Field, H: Hasher<u8>>(
	root: &H::Digest,
	proof: &MembershipProof<H::Digest>,
	shape: &TreeShape,
	positions: &[usize],
	leaves: &[Vec<F>],
) -> Result<(), Error> {
	if leaves.len() != positions.len()
		|| leaves
			.iter()
			.any(|leaf| leaf.len() != shape.values_per_leaf)
	{
		bail!(VerificationError::IncorrectVectorLength);
	}

	let mut opened = positions.iter().copied().zip(leaves).collect::<Vec<_>>();
	opened.sort_by_key(|&(position, _)| position);
	if opened
		.windows(2)
		.any(|pair| pair[0].0 == pair[1].0 && pair[0].1 != pair[1].1)
	{
		bail!(VerificationError::InvalidProof);
	}
	opened.dedup_by_key(|&mut (position, _)| position);

	if opened
		.last()
		.is_some_and(|&(last, _)| last >= shape.num_leaves)
	{
		bail!(Error::IndexOutOfRange {
			max: shape.num_leaves - 1,
		});
	}
	if proof.num_leaves != shape.num_leaves
		|| proof.leaf_bytesize != shape.leaf_bytesize::<F>()
		|| proof.randomness.len() != opened.len()
		|| proof
			.randomness
			.iter()
			.any(|salt| salt.len() != shape.zk_bytesize)
	{
		bail!(VerificationError::IncorrectProofShape);
	}

	let mut nodes = opened
		.iter()
		.zip(&proof.randomness)
		.map(|(&(position, leaf), salt)| (position, hash_leaf::<F, H>(leaf, salt)))
		.collect::<Vec<_>>();
	let mut siblings = proof.siblings.iter();
	let mut layer_len = shape.num_leaves;

	while layer_len > 1 {
		let mut parents = Vec::with_capacity(nodes.len());
		let mut i = 0;
		while i < nodes.len() {
			let (node, ref digest) = nodes[i];
			let parent = if node & 1 == 1 {
				let left = siblings.next().ok_or(VerificationError::InvalidProof)?;
				hash_pair::<H>(left, digest)
			} else if nodes.get(i + 1).is_some_and(|(next, _)| *next == node | 1) {
				i += 1;
				hash_pair::<H>(digest, &nodes[i].1)
			} else {
				let right = siblings.next().ok_or(VerificationError::InvalidProof)?;
				hash_pair::<H>(digest, right)
			};
			parents.push((node >> 1, parent));
			i += 1;
		}
		nodes = parents;
		layer_len >>= 1;
	}

	if siblings.next().is_some() {
		bail!(VerificationError::InvalidProof);
	}
	match nodes.as_slice() {
		[(0, computed_root)] if computed_root == root => Ok(()),
		_ => Err(VerificationError::InvalidProof.into()),
	}
}
