// Copyright 2024-2025 Irreducible Inc.

use criterion::{criterion_group, criterion_main, Criterion};
use preon_core::{prove, verify, ConstraintSystem, ParameterSet, PreonParams};
use preon_field::{BinaryField, BinaryField192b, Field};
use preon_hash::Sha3_384;
use rand::{rngs::StdRng, SeedableRng};

type F = BinaryField192b;

const LOG_CONSTRAINTS: usize = 10;

fn parameter_set() -> ParameterSet {
	ParameterSet {
		hash_zk_bytesize: 32,
		query_bound: 16,
		log_input_domain_size: 2,
		log_variable_domain_size: LOG_CONSTRAINTS,
		log_constraint_domain_size: LOG_CONSTRAINTS,
		log_summation_domain_size: LOG_CONSTRAINTS,
		log_codeword_domain_size: LOG_CONSTRAINTS + 5,
		fri_localization_parameters: vec![1; LOG_CONSTRAINTS + 2],
		fri_query_repetitions: 64,
		max_ldt_tested_degree_bound: 1 << (LOG_CONSTRAINTS + 2),
		fri_final_polynomial_degree_bound: 1,
	}
}

/// A chain of squarings `z_{i+1} = z_i * z_i` starting from the public input.
fn squaring_chain(num_constraints: usize) -> (ConstraintSystem<F>, Vec<F>, Vec<F>) {
	let mut cs = ConstraintSystem::new(1, num_constraints + 1).unwrap();
	let mut values = vec![F::from_u64(3)];
	for i in 1..=num_constraints {
		cs.add_constraint(vec![(i, F::ONE)], vec![(i, F::ONE)], vec![(i + 1, F::ONE)])
			.unwrap();
		values.push(values[i - 1].square());
	}
	let auxiliary = values.split_off(1);
	(cs, values, auxiliary)
}

fn bench_prove_verify(c: &mut Criterion) {
	preon_utils::rayon::adjust_thread_pool()
		.as_ref()
		.expect("failed to init thread pool");

	let params = PreonParams::<F, Sha3_384>::new(parameter_set()).unwrap();
	// The constant and the public input share the input domain with two padding slots.
	let num_constraints = (1 << LOG_CONSTRAINTS) - 4;
	let (cs, primary, auxiliary) = squaring_chain(num_constraints);

	let mut group = c.benchmark_group("slow/preon");
	group.sample_size(10);
	group.bench_function(format!("prove/{num_constraints} constraints"), |b| {
		b.iter(|| {
			prove(&params, &cs, &primary, &auxiliary, b"bench", StdRng::seed_from_u64(0)).unwrap()
		});
	});

	let proof =
		prove(&params, &cs, &primary, &auxiliary, b"bench", StdRng::seed_from_u64(0)).unwrap();
	group.bench_function(format!("verify/{num_constraints} constraints"), |b| {
		b.iter(|| assert!(verify(&params, &cs, &primary, b"bench", &proof)));
	});
	group.finish()
}

criterion_main!(preon);
criterion_group!(preon, bench_prove_verify);
