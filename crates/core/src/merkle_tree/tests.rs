// Copyright 2024-2025 Irreducible Inc.

use std::iter::repeat_with;

use assert_matches::assert_matches;
use preon_field::{BinaryField192b, Field};
use preon_hash::{Hasher, Sha3_256};
use preon_utils::SerializeBytes;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use super::*;

type F = BinaryField192b;
type H = Sha3_256;
type Digest = <H as Hasher<u8>>::Digest;

const ZK_BYTESIZE: usize = 16;

fn random_column(len: usize, rng: &mut StdRng) -> Vec<F> {
	repeat_with(|| F::random(&mut *rng)).take(len).collect()
}

fn commit(columns: &[Vec<F>], coset_size: usize, seed: u64) -> BinaryMerkleTree<Digest> {
	let mut builder = MerkleTreeBuilder::new(coset_size, ZK_BYTESIZE).unwrap();
	for column in columns {
		builder.add_column(column).unwrap();
	}
	builder.commit::<H>(StdRng::seed_from_u64(seed)).unwrap()
}

fn shape(columns: &[Vec<F>], coset_size: usize, max_openings: usize) -> TreeShape {
	TreeShape {
		num_leaves: columns[0].len() / coset_size,
		values_per_leaf: columns.len() * coset_size,
		zk_bytesize: ZK_BYTESIZE,
		max_openings,
	}
}

fn open(columns: &[Vec<F>], coset_size: usize, positions: &[usize]) -> Vec<Vec<F>> {
	let columns = columns.iter().map(Vec::as_slice).collect::<Vec<_>>();
	positions
		.iter()
		.map(|&position| leaf_values(&columns, coset_size, position))
		.collect()
}

#[test]
fn test_root_is_deterministic_for_fixed_rng() {
	let mut rng = StdRng::seed_from_u64(0);
	let columns = vec![random_column(32, &mut rng), random_column(32, &mut rng)];

	let tree_a = commit(&columns, 2, 7);
	let tree_b = commit(&columns, 2, 7);
	let tree_c = commit(&columns, 2, 8);
	assert_eq!(tree_a.root(), tree_b.root());
	assert_ne!(tree_a.root(), tree_c.root());
	assert_eq!(tree_a.num_leaves(), 16);
	assert_eq!(tree_a.inner_nodes.len(), 31);
}

#[test]
fn test_open_and_validate() {
	let mut rng = StdRng::seed_from_u64(0);
	let columns = vec![
		random_column(64, &mut rng),
		random_column(64, &mut rng),
		random_column(64, &mut rng),
	];
	let tree = commit(&columns, 4, 1);
	let shape = shape(&columns, 4, 8);

	for positions in [vec![0], vec![15], vec![0, 1], vec![2, 5, 6, 7, 12], (0..16).collect()] {
		let proof = tree.membership_proof(&positions).unwrap();
		let leaves = open(&columns, 4, &positions);
		validate_membership_proof::<F, H>(tree.root(), &proof, &shape, &positions, &leaves)
			.unwrap();
	}
}

#[test]
fn test_single_leaf_tree() {
	let mut rng = StdRng::seed_from_u64(2);
	let columns = vec![random_column(4, &mut rng)];
	let tree = commit(&columns, 4, 0);
	let proof = tree.membership_proof(&[0]).unwrap();
	assert!(proof.siblings.is_empty());
	validate_membership_proof::<F, H>(
		tree.root(),
		&proof,
		&shape(&columns, 4, 1),
		&[0],
		&open(&columns, 4, &[0]),
	)
	.unwrap();
}

#[test]
fn test_multiproof_is_minimal() {
	let mut rng = StdRng::seed_from_u64(3);
	let columns = vec![random_column(16, &mut rng)];
	let tree = commit(&columns, 1, 0);

	// A single leaf of a depth 4 tree needs one sibling per layer.
	assert_eq!(tree.membership_proof(&[5]).unwrap().siblings.len(), 4);
	// Opening both children of a node saves the sibling at that layer.
	assert_eq!(tree.membership_proof(&[4, 5]).unwrap().siblings.len(), 3);
	// Opening every leaf needs no siblings at all.
	let all = (0..16).collect::<Vec<_>>();
	assert!(tree.membership_proof(&all).unwrap().siblings.is_empty());
	// Leaves 0 and 3 need both of their siblings, after which their parents form a pair.
	assert_eq!(tree.membership_proof(&[0, 3]).unwrap().siblings.len(), 4);
}

#[test]
fn test_positions_form_a_set() {
	let mut rng = StdRng::seed_from_u64(9);
	let columns = vec![random_column(16, &mut rng)];
	let tree = commit(&columns, 1, 2);
	let shape = shape(&columns, 1, 4);

	let sorted = tree.membership_proof(&[1, 3]).unwrap();
	let shuffled = tree.membership_proof(&[3, 1, 1]).unwrap();
	assert_eq!(shuffled, sorted);
	assert_eq!(shuffled.randomness.len(), 2);

	let positions = [3, 1, 1];
	let leaves = open(&columns, 1, &positions);
	validate_membership_proof::<F, H>(tree.root(), &shuffled, &shape, &positions, &leaves).unwrap();
	let sorted_leaves = open(&columns, 1, &[1, 3]);
	validate_membership_proof::<F, H>(tree.root(), &sorted, &shape, &[1, 3], &sorted_leaves)
		.unwrap();

	// Two copies of one position must agree.
	let mut conflicting = leaves;
	conflicting[2][0] += F::ONE;
	assert_matches!(
		validate_membership_proof::<F, H>(tree.root(), &shuffled, &shape, &positions, &conflicting),
		Err(Error::Verification(VerificationError::InvalidProof))
	);
}

#[test]
fn test_tampered_proofs_are_rejected() {
	let mut rng = StdRng::seed_from_u64(4);
	let columns = vec![random_column(32, &mut rng), random_column(32, &mut rng)];
	let tree = commit(&columns, 2, 5);
	let shape = shape(&columns, 2, 4);
	let positions = [3, 9, 10];
	let leaves = open(&columns, 2, &positions);
	let proof = tree.membership_proof(&positions).unwrap();

	let mut bad_leaves = leaves.clone();
	bad_leaves[1][2] += F::ONE;
	assert_matches!(
		validate_membership_proof::<F, H>(tree.root(), &proof, &shape, &positions, &bad_leaves),
		Err(Error::Verification(VerificationError::InvalidProof))
	);

	let mut bad_sibling = proof.clone();
	bad_sibling.siblings[0][0] ^= 1;
	assert_matches!(
		validate_membership_proof::<F, H>(tree.root(), &bad_sibling, &shape, &positions, &leaves),
		Err(Error::Verification(VerificationError::InvalidProof))
	);

	let mut bad_salt = proof.clone();
	bad_salt.randomness[2][0] ^= 1;
	assert_matches!(
		validate_membership_proof::<F, H>(tree.root(), &bad_salt, &shape, &positions, &leaves),
		Err(Error::Verification(VerificationError::InvalidProof))
	);

	let mut extra_sibling = proof.clone();
	extra_sibling.siblings.push(tree.root().clone());
	assert_matches!(
		validate_membership_proof::<F, H>(tree.root(), &extra_sibling, &shape, &positions, &leaves),
		Err(Error::Verification(VerificationError::InvalidProof))
	);

	assert_matches!(
		validate_membership_proof::<F, H>(tree.root(), &proof, &shape, &[3, 9, 11], &leaves),
		Err(Error::Verification(VerificationError::InvalidProof))
	);
	assert_matches!(
		validate_membership_proof::<F, H>(tree.root(), &proof, &shape, &[9, 3, 10], &leaves),
		Err(Error::Verification(VerificationError::InvalidProof))
	);
	assert_matches!(
		validate_membership_proof::<F, H>(tree.root(), &proof, &shape, &positions, &leaves[..2]),
		Err(Error::Verification(VerificationError::IncorrectVectorLength))
	);
}

#[test]
fn test_blob_roundtrip_and_header() {
	let mut rng = StdRng::seed_from_u64(6);
	let columns = vec![random_column(16, &mut rng)];
	let tree = commit(&columns, 2, 0);
	let shape = shape(&columns, 2, 2);
	let proof = tree.membership_proof(&[1, 6]).unwrap();

	let mut bytes = Vec::new();
	proof.serialize(&mut bytes).unwrap();
	assert_eq!(bytes.len(), proof.serialized_len());
	assert_eq!(bytes[0], MEMBERSHIP_PROOF_VERSION);
	assert_eq!(u64::from_le_bytes(bytes[1..9].try_into().unwrap()), bytes.len() as u64);

	let leaf_bytesize = shape.leaf_bytesize::<F>();
	let decoded = MembershipProof::deserialize(bytes.as_slice(), &shape, leaf_bytesize).unwrap();
	assert_eq!(decoded, proof);

	let mut wrong_version = bytes.clone();
	wrong_version[0] = 2;
	assert_matches!(
		MembershipProof::<Digest>::deserialize(
			wrong_version.as_slice(),
			&shape,
			leaf_bytesize
		),
		Err(Error::Serialization(_))
	);

	let mut wrong_len = bytes.clone();
	wrong_len[1] ^= 1;
	assert_matches!(
		MembershipProof::<Digest>::deserialize(
			wrong_len.as_slice(),
			&shape,
			leaf_bytesize
		),
		Err(Error::Verification(VerificationError::IncorrectProofShape))
	);
}

#[test]
fn test_builder_rejects_bad_input() {
	let column = vec![F::ONE; 12];
	let short = vec![F::ONE; 8];
	assert_matches!(MerkleTreeBuilder::<F>::new(3, ZK_BYTESIZE), Err(Error::InvalidCosetSize));

	let mut builder = MerkleTreeBuilder::new(4, ZK_BYTESIZE).unwrap();
	builder.add_column(&column).unwrap();
	assert_matches!(builder.add_column(&short), Err(Error::IncorrectVectorLen { expected: 12 }));
	assert_matches!(
		builder.commit::<H>(StdRng::seed_from_u64(0)),
		Err(Error::PowerOfTwoLengthRequired)
	);

	let builder = MerkleTreeBuilder::<F>::new(4, ZK_BYTESIZE).unwrap();
	assert_matches!(builder.commit::<H>(StdRng::seed_from_u64(0)), Err(Error::NoColumns));
}

proptest! {
	#[test]
	fn test_any_position_subset_validates(mask in 1u16..=u16::MAX, seed in 0u64..1000) {
		let mut rng = StdRng::seed_from_u64(seed);
		let columns = vec![random_column(32, &mut rng)];
		let tree = commit(&columns, 2, seed);
		let positions = (0..16).filter(|bit| mask >> bit & 1 == 1).collect::<Vec<_>>();

		let proof = tree.membership_proof(&positions).unwrap();
		prop_assert!(proof.siblings.len() <= 15);
		let leaves = open(&columns, 2, &positions);
		let shape = shape(&columns, 2, 16);
		prop_assert!(
			validate_membership_proof::<F, H>(tree.root(), &proof, &shape, &positions, &leaves)
				.is_ok()
		);
	}
}
