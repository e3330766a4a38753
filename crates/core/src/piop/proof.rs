// Copyright 2024-2025 Irreducible Inc.

use bytes::{Buf, BufMut};
use preon_field::BinaryField;
use preon_hash::Hasher;
use preon_utils::{
	bail,
	serialization::{self, deserialize_len, serialize_len},
	DeserializeBytes, SerializeBytes,
};

use crate::{
	error::{Error, VerificationError},
	merkle_tree::MembershipProof,
	params::PreonParams,
};

/// A non-interactive Preon proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof<F, D> {
	/// Coefficients of the final FRI polynomial.
	pub prover_messages: Vec<F>,
	/// One Merkle root per tree.
	pub roots: Vec<D>,
	/// `query_responses[t][k]` holds the values of leaf `k` of tree `t`, counting only the opened
	/// leaves in increasing order.
	pub query_responses: Vec<Vec<Vec<F>>>,
	pub membership_proofs: Vec<MembershipProof<D>>,
}

impl<F, D> SerializeBytes for Proof<F, D>
where
	F: SerializeBytes,
	D: AsRef<[u8]> + SerializeBytes,
{
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), serialization::Error> {
		serialize_len(self.prover_messages.len(), &mut write_buf)?;
		for value in &self.prover_messages {
			value.serialize(&mut write_buf)?;
		}

		serialize_len(self.roots.len(), &mut write_buf)?;
		for root in &self.roots {
			root.serialize(&mut write_buf)?;
		}

		serialize_len(self.query_responses.len(), &mut write_buf)?;
		for responses in &self.query_responses {
			serialize_len(responses.len(), &mut write_buf)?;
			for response in responses {
				serialize_len(response.len(), &mut write_buf)?;
				for value in response {
					value.serialize(&mut write_buf)?;
				}
			}
		}

		serialize_len(self.membership_proofs.len(), &mut write_buf)?;
		for proof in &self.membership_proofs {
			proof.serialize(&mut write_buf)?;
		}
		Ok(())
	}
}

fn expect_count(component: &'static str, expected: usize, actual: usize) -> Result<(), Error> {
	if expected != actual {
		bail!(VerificationError::IncorrectProofShape {
			component,
			expected,
			actual,
		});
	}
	Ok(())
}

impl<F: BinaryField, D> Proof<F, D>
where
	D: AsRef<[u8]> + Default + SerializeBytes + DeserializeBytes,
{
	pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
		let mut bytes = Vec::new();
		self.serialize(&mut bytes)?;
		Ok(bytes)
	}

	/// Decodes a proof, rejecting trailing bytes.
	pub fn from_bytes<H: Hasher<u8, Digest = D>>(
		mut bytes: &[u8],
		params: &PreonParams<F, H>,
	) -> Result<Self, Error> {
		let proof = Self::deserialize(&mut bytes, params)?;
		if bytes.has_remaining() {
			bail!(VerificationError::TrailingBytes {
				remaining: bytes.remaining(),
			});
		}
		Ok(proof)
	}

	/// Reads a proof for `params`.
	///
	/// Every count is checked against the value the parameters fix before anything is allocated
	/// for it.
	pub fn deserialize<H: Hasher<u8, Digest = D>>(
		mut read_buf: impl Buf,
		params: &PreonParams<F, H>,
	) -> Result<Self, Error> {
		let final_degree_bound = params.final_degree_bound();
		let num_messages = deserialize_len(&mut read_buf, final_degree_bound)?;
		expect_count("prover messages", final_degree_bound, num_messages)?;
		let prover_messages = (0..num_messages)
			.map(|_| F::deserialize(&mut read_buf))
			.collect::<Result<Vec<_>, _>>()?;

		let num_trees = params.num_trees();
		let num_roots = deserialize_len(&mut read_buf, num_trees)?;
		expect_count("Merkle roots", num_trees, num_roots)?;
		let roots = (0..num_roots)
			.map(|_| D::deserialize(&mut read_buf))
			.collect::<Result<Vec<_>, _>>()?;

		let shapes = params.tree_shapes();
		let num_response_sets = deserialize_len(&mut read_buf, num_trees)?;
		expect_count("query response sets", num_trees, num_response_sets)?;
		let query_responses = shapes
			.iter()
			.map(|shape| -> Result<Vec<Vec<F>>, Error> {
				let num_responses = deserialize_len(&mut read_buf, shape.max_openings)?;
				(0..num_responses)
					.map(|_| -> Result<Vec<F>, Error> {
						let len = deserialize_len(&mut read_buf, shape.values_per_leaf)?;
						expect_count("values in a query response", shape.values_per_leaf, len)?;
						Ok((0..len)
							.map(|_| F::deserialize(&mut read_buf))
							.collect::<Result<Vec<_>, _>>()?)
					})
					.collect()
			})
			.collect::<Result<Vec<_>, _>>()?;

		let num_membership_proofs = deserialize_len(&mut read_buf, num_trees)?;
		expect_count("membership proofs", num_trees, num_membership_proofs)?;
		let membership_proofs = shapes
			.iter()
			.map(|shape| {
				MembershipProof::deserialize(&mut read_buf, shape, shape.leaf_bytesize::<F>())
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self {
			prover_messages,
			roots,
			query_responses,
			membership_proofs,
		})
	}
}
