// Copyright 2024-2025 Irreducible Inc.

use assert_matches::assert_matches;
use preon_core::{
	prove, verify, verify_detailed, ConstraintSystem, Error, ParameterSet, Preon128, Preon192,
	Preon256, PreonParams, PreonVariant, Proof, VerificationError,
};
use preon_field::{BinaryField, BinaryField192b, BinaryField256b, BinaryField320b, Field};
use preon_hash::{Hasher, Sha3_384, Sha3_512};
use rand::{rngs::StdRng, SeedableRng};

const MESSAGE: &[u8] = b"integration test";

fn small_parameter_set() -> ParameterSet {
	ParameterSet {
		hash_zk_bytesize: 16,
		query_bound: 2,
		log_input_domain_size: 1,
		log_variable_domain_size: 3,
		log_constraint_domain_size: 2,
		log_summation_domain_size: 3,
		log_codeword_domain_size: 6,
		fri_localization_parameters: vec![1, 1, 1, 1],
		fri_query_repetitions: 4,
		max_ldt_tested_degree_bound: 32,
		fri_final_polynomial_degree_bound: 2,
	}
}

/// A parameter set with mixed localization parameters and more queries.
fn wide_parameter_set() -> ParameterSet {
	ParameterSet {
		hash_zk_bytesize: 32,
		query_bound: 4,
		log_input_domain_size: 2,
		log_variable_domain_size: 4,
		log_constraint_domain_size: 4,
		log_summation_domain_size: 4,
		log_codeword_domain_size: 8,
		fri_localization_parameters: vec![2, 1, 2],
		fri_query_repetitions: 12,
		max_ldt_tested_degree_bound: 64,
		fri_final_polynomial_degree_bound: 4,
	}
}

/// Four constraints `z_i * z_i = z_i` with diagonal `A = B = C`, the first variable public.
fn diagonal_system<F: BinaryField>() -> (ConstraintSystem<F>, Vec<F>, Vec<F>) {
	let mut cs = ConstraintSystem::new(1, 4).unwrap();
	for column in 1..=4 {
		cs.add_constraint(vec![(column, F::ONE)], vec![(column, F::ONE)], vec![(column, F::ONE)])
			.unwrap();
	}
	(cs, vec![F::ONE], vec![F::ONE, F::ZERO, F::ONE])
}

/// `x^3 + x + 5 = out` with `out` public. The variables are `out, x, x^2, x^3`.
fn cubic_system<F: BinaryField>(x: F) -> (ConstraintSystem<F>, Vec<F>, Vec<F>) {
	let mut cs = ConstraintSystem::new(1, 4).unwrap();
	cs.add_constraint(vec![(2, F::ONE)], vec![(2, F::ONE)], vec![(3, F::ONE)])
		.unwrap();
	cs.add_constraint(vec![(3, F::ONE)], vec![(2, F::ONE)], vec![(4, F::ONE)])
		.unwrap();
	cs.add_constraint(
		vec![(4, F::ONE), (2, F::ONE), (0, F::from_u64(5))],
		vec![(0, F::ONE)],
		vec![(1, F::ONE)],
	)
	.unwrap();

	let x2 = x.square();
	let x3 = x2 * x;
	let out = x3 + x + F::from_u64(5);
	(cs, vec![out], vec![x, x2, x3])
}

fn assert_complete<F: BinaryField, H: Hasher<u8>>(parameter_set: ParameterSet) {
	let params = PreonParams::<F, H>::new(parameter_set).unwrap();
	let (cs, primary, auxiliary) = diagonal_system::<F>();
	let proof = prove(&params, &cs, &primary, &auxiliary, MESSAGE, StdRng::seed_from_u64(0)).unwrap();
	verify_detailed(&params, &cs, &primary, MESSAGE, &proof).unwrap();

	let bytes = proof.to_bytes().unwrap();
	let decoded = Proof::from_bytes(&bytes, &params).unwrap();
	assert!(verify(&params, &cs, &primary, MESSAGE, &decoded));
}

fn assert_preset_complete<V: PreonVariant>() {
	preon_utils::rayon::adjust_thread_pool()
		.as_ref()
		.expect("failed to initialize the thread pool");
	let params = V::params().unwrap();
	let (cs, primary, auxiliary) = diagonal_system::<V::Field>();
	let proof = prove(&params, &cs, &primary, &auxiliary, MESSAGE, StdRng::seed_from_u64(0)).unwrap();
	verify_detailed(&params, &cs, &primary, MESSAGE, &proof).unwrap();

	let bytes = proof.to_bytes().unwrap();
	let decoded = Proof::from_bytes(&bytes, &params).unwrap();
	assert_eq!(decoded, proof);
	assert!(verify(&params, &cs, &primary, MESSAGE, &decoded));
}

#[test]
fn test_completeness_192b_sha3_384() {
	preon_utils::tracing::init_tracing();
	assert_complete::<BinaryField192b, Sha3_384>(small_parameter_set());
}

#[test]
fn test_completeness_256b_sha3_512() {
	assert_complete::<BinaryField256b, Sha3_512>(small_parameter_set());
}

#[test]
fn test_completeness_320b_sha3_512() {
	assert_complete::<BinaryField320b, Sha3_512>(small_parameter_set());
}

#[test]
fn test_completeness_mixed_localization() {
	assert_complete::<BinaryField192b, Sha3_384>(wide_parameter_set());
}

#[test]
fn test_cubic_circuit() {
	type F = BinaryField256b;
	let params = PreonParams::<F, Sha3_512>::new(small_parameter_set()).unwrap();
	let mut rng = StdRng::seed_from_u64(11);
	let (cs, primary, auxiliary) = cubic_system(F::random(&mut rng));
	assert!(cs.is_satisfied(&primary, &auxiliary));

	let proof = prove(&params, &cs, &primary, &auxiliary, MESSAGE, &mut rng).unwrap();
	assert!(verify(&params, &cs, &primary, MESSAGE, &proof));
	assert!(!verify(&params, &cs, &[primary[0] + F::ONE], MESSAGE, &proof));
}

#[test]
fn test_instance_too_large() {
	type F = BinaryField192b;
	let params = PreonParams::<F, Sha3_384>::new(small_parameter_set()).unwrap();
	let mut cs = ConstraintSystem::<F>::new(2, 4).unwrap();
	cs.add_constraint(vec![(1, F::ONE)], vec![(1, F::ONE)], vec![(1, F::ONE)])
		.unwrap();
	assert_matches!(
		prove(
			&params,
			&cs,
			&[F::ONE, F::ONE],
			&[F::ZERO, F::ZERO],
			MESSAGE,
			StdRng::seed_from_u64(0)
		),
		Err(Error::InstanceTooLarge(_))
	);
}

#[test]
fn test_single_byte_corruptions_are_rejected() {
	type F = BinaryField192b;
	let params = PreonParams::<F, Sha3_384>::new(small_parameter_set()).unwrap();
	let (cs, primary, auxiliary) = diagonal_system::<F>();
	let proof = prove(&params, &cs, &primary, &auxiliary, MESSAGE, StdRng::seed_from_u64(5)).unwrap();
	let bytes = proof.to_bytes().unwrap();

	let final_polynomial_offset = 8;
	let roots_offset = final_polynomial_offset + proof.prover_messages.len() * F::N_BYTES + 8;
	let digest_size = <Sha3_384 as Hasher<u8>>::digest_size();
	let responses_offset = roots_offset + proof.roots.len() * digest_size + 8 + 8 + 8;
	for offset in [
		final_polynomial_offset,
		final_polynomial_offset + F::N_BYTES + 3,
		roots_offset,
		roots_offset + digest_size + 1,
		responses_offset,
		bytes.len() - 1,
	] {
		let mut corrupted = bytes.clone();
		corrupted[offset] ^= 0x01;
		let accepted = Proof::from_bytes(&corrupted, &params)
			.map(|proof| verify(&params, &cs, &primary, MESSAGE, &proof))
			.unwrap_or(false);
		assert!(!accepted, "corruption at byte {offset} was accepted");
	}
}

#[test]
fn test_wrong_tree_count_is_rejected() {
	type F = BinaryField192b;
	let params = PreonParams::<F, Sha3_384>::new(small_parameter_set()).unwrap();
	let (cs, primary, auxiliary) = diagonal_system::<F>();
	let mut proof =
		prove(&params, &cs, &primary, &auxiliary, MESSAGE, StdRng::seed_from_u64(6)).unwrap();
	proof.roots.push(proof.roots[0].clone());
	assert_matches!(
		verify_detailed(&params, &cs, &primary, MESSAGE, &proof),
		Err(Error::Verification(VerificationError::IncorrectProofShape {
			component: "Merkle roots",
			expected: 5,
			actual: 6,
		}))
	);
	assert!(Proof::from_bytes(&proof.to_bytes().unwrap(), &params).is_err());
}

#[test]
#[ignore = "proves over a 2^19 codeword domain"]
fn test_preon128_completeness() {
	assert_preset_complete::<Preon128>();
}

#[test]
#[ignore = "proves over a 2^20 codeword domain"]
fn test_preon192_completeness() {
	assert_preset_complete::<Preon192>();
}

#[test]
#[ignore = "proves over a 2^21 codeword domain"]
fn test_preon256_completeness() {
	assert_preset_complete::<Preon256>();
}
