// Copyright 2024-2025 Irreducible Inc.

//! Small instances shared by the unit tests.

use preon_field::BinaryField;

use crate::{params::ParameterSet, r1cs::ConstraintSystem};

/// A parameter set small enough that a full proof takes milliseconds.
pub(crate) fn small_parameter_set() -> ParameterSet {
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

/// `z_i * z_i = z_i` for each of the four variables, with the first one public.
///
/// Returns the system together with a satisfying `(primary, auxiliary)` split.
pub(crate) fn boolean_system<F: BinaryField>() -> (ConstraintSystem<F>, Vec<F>, Vec<F>) {
	let mut cs = ConstraintSystem::new(1, 4).expect("one public input fits four variables");
	for column in 1..=4 {
		cs.add_constraint(vec![(column, F::ONE)], vec![(column, F::ONE)], vec![(column, F::ONE)])
			.expect("columns are in range");
	}
	(cs, vec![F::ONE], vec![F::ZERO, F::ONE, F::ONE])
}
