// Copyright 2024-2025 Irreducible Inc.

use preon_field::Field;
use preon_hash::{hash_concat, Hasher};
use preon_utils::{bail, checked_arithmetics::checked_log_2};
use rand::RngCore;
use rayon::prelude::*;
use tracing::instrument;

use super::{errors::Error, membership_proof::MembershipProof};

/// Collects the columns that go into one Merkle tree.
///
/// Every column holds the evaluations of one oracle over the same domain. Leaf `l` covers
/// positions `l * coset_size .. (l + 1) * coset_size` of each column. The builder is consumed by
/// [`Self::commit`], so a tree can only be built once from a given set of columns.
#[derive(Debug)]
pub struct MerkleTreeBuilder<'a, F> {
	columns: Vec<&'a [F]>,
	coset_size: usize,
	zk_bytesize: usize,
}

impl<'a, F: Field> MerkleTreeBuilder<'a, F> {
	pub fn new(coset_size: usize, zk_bytesize: usize) -> Result<Self, Error> {
		if !coset_size.is_power_of_two() {
			bail!(Error::InvalidCosetSize);
		}
		Ok(Self {
			columns: Vec::new(),
			coset_size,
			zk_bytesize,
		})
	}

	pub fn add_column(&mut self, column: &'a [F]) -> Result<(), Error> {
		let expected = self.columns.first().map_or(column.len(), |first| first.len());
		if column.len() != expected || column.is_empty() {
			bail!(Error::IncorrectVectorLen { expected });
		}
		if column.len() % self.coset_size != 0 {
			bail!(Error::IncorrectVectorLen {
				expected: self.coset_size,
			});
		}
		self.columns.push(column);
		Ok(())
	}

	/// Hashes every leaf with fresh randomness from `rng` and builds the tree.
	#[instrument("MerkleTreeBuilder::commit", skip_all, level = "debug")]
	pub fn commit<H: Hasher<u8>>(
		self,
		mut rng: impl RngCore,
	) -> Result<BinaryMerkleTree<H::Digest>, Error> {
		let Some(first) = self.columns.first() else {
			bail!(Error::NoColumns);
		};
		let num_leaves = first.len() / self.coset_size;
		if !num_leaves.is_power_of_two() {
			bail!(Error::PowerOfTwoLengthRequired);
		}
		let log_len = checked_log_2(num_leaves);

		let leaf_randomness = (0..num_leaves)
			.map(|_| {
				let mut salt = vec![0u8; self.zk_bytesize];
				rng.fill_bytes(&mut salt);
				salt
			})
			.collect::<Vec<_>>();

		let leaves = (0..num_leaves)
			.into_par_iter()
			.map(|index| {
				let values = leaf_values(&self.columns, self.coset_size, index);
				hash_leaf::<F, H>(&values, &leaf_randomness[index])
			})
			.collect::<Vec<_>>();

		let mut inner_nodes = Vec::with_capacity(2 * num_leaves - 1);
		inner_nodes.extend(leaves);
		let mut layer_start = 0;
		for depth in 0..log_len {
			let layer_len = num_leaves >> depth;
			let next = compress_layer::<H>(&inner_nodes[layer_start..layer_start + layer_len]);
			layer_start += layer_len;
			inner_nodes.extend(next);
		}

		Ok(BinaryMerkleTree {
			log_len,
			inner_nodes,
			leaf_randomness,
			leaf_bytesize: self.columns.len() * self.coset_size * F::N_BYTES,
		})
	}
}

/// A committed binary Merkle tree over salted leaves.
#[derive(Debug, Clone)]
pub struct BinaryMerkleTree<D> {
	/// Base-2 logarithm of the number of leaves
	pub log_len: usize,
	/// The nodes, arranged as a flattened array of layers from the leaves up, with the root at the
	/// end
	pub inner_nodes: Vec<D>,
	leaf_randomness: Vec<Vec<u8>>,
	leaf_bytesize: usize,
}

impl<D: Clone> BinaryMerkleTree<D> {
	pub fn root(&self) -> &D {
		&self.inner_nodes[self.inner_nodes.len() - 1]
	}

	pub fn num_leaves(&self) -> usize {
		1 << self.log_len
	}

	/// Layer `depth` counted from the leaves, so depth 0 is the leaf layer.
	fn layer(&self, depth: usize) -> &[D] {
		let start = (1 << (self.log_len + 1)) - (1 << (self.log_len + 1 - depth));
		&self.inner_nodes[start..start + (1 << (self.log_len - depth))]
	}

	/// Creates one proof for the set of leaf indices in `positions`.
	///
	/// Order and repetitions in `positions` do not matter. The salts in the proof follow the
	/// sorted distinct positions. Siblings that can be recomputed from other opened nodes are
	/// omitted.
	pub fn membership_proof(&self, positions: &[usize]) -> Result<MembershipProof<D>, Error> {
		let positions = sorted_distinct(positions);
		if let Some(&last) = positions.last() {
			if last >= self.num_leaves() {
				bail!(Error::IndexOutOfRange {
					max: self.num_leaves() - 1,
				});
			}
		}

		let mut siblings = Vec::new();
		let mut current = positions.clone();
		for depth in 0..self.log_len {
			let layer = self.layer(depth);
			let mut parents = Vec::with_capacity(current.len());
			let mut i = 0;
			while i < current.len() {
				let node = current[i];
				if node & 1 == 1 {
					siblings.push(layer[node ^ 1].clone());
				} else if current.get(i + 1) == Some(&(node | 1)) {
					i += 1;
				} else {
					siblings.push(layer[node | 1].clone());
				}
				parents.push(node >> 1);
				i += 1;
			}
			current = parents;
		}

		Ok(MembershipProof {
			siblings,
			randomness: positions
				.iter()
				.map(|&index| self.leaf_randomness[index].clone())
				.collect(),
			leaf_bytesize: self.leaf_bytesize,
			num_leaves: self.num_leaves(),
		})
	}
}

/// The values of leaf `index`, oracle-major.
pub fn leaf_values<F: Copy>(columns: &[&[F]], coset_size: usize, index: usize) -> Vec<F> {
	columns
		.iter()
		.flat_map(|column| column[index * coset_size..(index + 1) * coset_size].iter().copied())
		.collect()
}

pub(super) fn hash_leaf<F: Field, H: Hasher<u8>>(values: &[F], randomness: &[u8]) -> H::Digest {
	let mut bytes = Vec::with_capacity(values.len() * F::N_BYTES);
	for value in values {
		value.write_bytes(&mut bytes);
	}
	hash_concat::<H>(&[&bytes[..], randomness])
}

pub(super) fn hash_pair<H: Hasher<u8>>(left: &H::Digest, right: &H::Digest) -> H::Digest {
	hash_concat::<H>(&[left.as_ref(), right.as_ref()])
}

fn sorted_distinct(positions: &[usize]) -> Vec<usize> {
	let mut positions = positions.to_vec();
	positions.sort_unstable();
	positions.dedup();
	positions
}

#[tracing::instrument("MerkleTree::compress_layer", skip_all, level = "debug")]
fn compress_layer<H: Hasher<u8>>(prev_layer: &[H::Digest]) -> Vec<H::Digest> {
	prev_layer
		.par_chunks_exact(2)
		.map(|pair| hash_pair::<H>(&pair[0], &pair[1]))
		.collect()
}
