// Copyright 2024-2025 Irreducible Inc.

use std::collections::HashMap;

use preon_field::BinaryField;
use preon_hash::Hasher;
use preon_utils::bail;
use rayon::prelude::*;
use tracing::instrument;

use super::{oracles::PreonOracles, proof::Proof};
use crate::{
	error::{Error, VerificationError},
	merkle_tree::validate_membership_proof,
	oracle::OracleId,
	params::PreonParams,
	protocols::fri::{self, FoldingDomain},
	r1cs::ConstraintSystem,
	transcript::{schedule, Transcript},
};

/// The challenges the verifier recomputes from the transcript.
#[derive(Debug)]
struct ReplayedChallenges<F> {
	lincheck: schedule::LincheckChallenges<F>,
	ldt_coefficients: Vec<F>,
	folding: Vec<F>,
	positions: Vec<usize>,
}

fn check_proof_shape<F: BinaryField, H: Hasher<u8>>(
	params: &PreonParams<F, H>,
	proof: &Proof<F, H::Digest>,
) -> Result<(), Error> {
	let num_trees = params.num_trees();
	let counts = [
		("prover messages", params.final_degree_bound(), proof.prover_messages.len()),
		("Merkle roots", num_trees, proof.roots.len()),
		("query response sets", num_trees, proof.query_responses.len()),
		("membership proofs", num_trees, proof.membership_proofs.len()),
	];
	for (component, expected, actual) in counts {
		if expected != actual {
			bail!(VerificationError::IncorrectProofShape {
				component,
				expected,
				actual,
			});
		}
	}
	Ok(())
}

fn replay_transcript<F: BinaryField, H: Hasher<u8>>(
	params: &PreonParams<F, H>,
	proof: &Proof<F, H::Digest>,
	message: &[u8],
	num_ldt_coefficients: usize,
) -> Result<ReplayedChallenges<F>, Error> {
	let mut transcript = Transcript::<H>::new(message);
	let lincheck = schedule::commit_witness::<F, H>(&mut transcript, &proof.roots[0])?;
	let (ldt_coefficients, first_challenge) = schedule::commit_sumcheck::<F, H>(
		&mut transcript,
		lincheck,
		&proof.roots[1],
		num_ldt_coefficients,
	)?;

	let num_reductions = params.num_reductions();
	let mut folding = vec![first_challenge];
	for round in 1..num_reductions {
		let challenge = schedule::commit_fri_round(
			&mut transcript,
			round,
			folding[round - 1],
			&proof.roots[round + 1],
		)?;
		folding.push(challenge);
	}
	let positions = schedule::sample_queries(
		&mut transcript,
		num_reductions,
		folding[num_reductions - 1],
		&proof.prover_messages,
		params.num_queries(),
		params.codeword_domain().size(),
	)?;
	Ok(ReplayedChallenges {
		lincheck,
		ldt_coefficients,
		folding,
		positions,
	})
}

/// Checks every tree's openings against its root. Returns the opened leaves of each tree.
#[instrument(skip_all, level = "debug")]
fn validate_openings<F: BinaryField, H: Hasher<u8>>(
	params: &PreonParams<F, H>,
	proof: &Proof<F, H::Digest>,
	positions: &[usize],
) -> Result<Vec<Vec<usize>>, Error> {
	(0..params.num_trees())
		.into_par_iter()
		.map(|tree| -> Result<Vec<usize>, Error> {
			let shape = params.tree_shape(tree);
			let leaves = params.opened_leaves(tree, positions);
			let responses = &proof.query_responses[tree];
			if responses.len() != leaves.len() {
				bail!(VerificationError::IncorrectProofShape {
					component: "query responses",
					expected: leaves.len(),
					actual: responses.len(),
				});
			}
			if let Some((response, values)) = responses
				.iter()
				.enumerate()
				.find(|(_, values)| values.len() != shape.values_per_leaf)
			{
				bail!(VerificationError::IncorrectResponseLength {
					tree,
					response,
					expected: shape.values_per_leaf,
					actual: values.len(),
				});
			}
			validate_membership_proof::<F, H>(
				&proof.roots[tree],
				&proof.membership_proofs[tree],
				&shape,
				&leaves,
				responses,
			)?;
			Ok(leaves)
		})
		.collect()
}

/// The opened values of leaf `leaf` of tree `tree`.
fn opened_leaf<'a, F>(
	proof_responses: &'a [Vec<Vec<F>>],
	opened_leaves: &[Vec<usize>],
	tree: usize,
	leaf: usize,
) -> Result<&'a [F], Error> {
	let index = opened_leaves[tree]
		.binary_search(&leaf)
		.map_err(|_| VerificationError::MissingOpening { tree, leaf })?;
	Ok(&proof_responses[tree][index])
}

/// Checks the FRI folding chain of the query at codeword position `position`, recomputing the
/// combined oracle on the first coset from the committed oracles.
fn verify_position<F: BinaryField, H: Hasher<u8>>(
	params: &PreonParams<F, H>,
	oracles: &PreonOracles<F>,
	foldings: &[FoldingDomain<F>],
	proof: &Proof<F, H::Digest>,
	opened_leaves: &[Vec<usize>],
	folding_challenges: &[F],
	position: usize,
) -> Result<(), Error> {
	let log_coset_size = params.localization_parameter(0);
	let coset_size = 1 << log_coset_size;
	let leaf = position >> log_coset_size;
	let witness_values = opened_leaf(&proof.query_responses, opened_leaves, 0, leaf)?;
	let h_values = opened_leaf(&proof.query_responses, opened_leaves, 1, leaf)?;

	let witness_oracles = oracles.witness_tree_oracles();
	let first_coset = (0..coset_size)
		.map(|offset| {
			let mut committed = witness_oracles
				.iter()
				.enumerate()
				.map(|(column, &id)| (id, witness_values[column * coset_size + offset]))
				.collect::<HashMap<OracleId, F>>();
			committed.insert(oracles.h, h_values[offset]);
			oracles.set.evaluate_at_position(
				oracles.combined_ldt,
				(leaf << log_coset_size) + offset,
				&committed,
			)
		})
		.collect::<Result<Vec<_>, _>>()?;

	let mut cosets = vec![first_coset.as_slice()];
	for tree in 2..params.num_trees() {
		let leaf = params.leaf_index(tree, position);
		cosets.push(opened_leaf(&proof.query_responses, opened_leaves, tree, leaf)?);
	}

	fri::verify_query(
		foldings,
		&params.fri_domains()[params.num_reductions()],
		folding_challenges,
		position,
		&cosets,
		&proof.prover_messages,
	)?;
	Ok(())
}

/// Verifies `proof` for the statement that some auxiliary input completes `primary` to a
/// satisfying assignment of `constraint_system`, and returns the reason for any rejection.
#[instrument("piop::verify", skip_all, level = "debug")]
pub fn verify_detailed<F, H>(
	params: &PreonParams<F, H>,
	constraint_system: &ConstraintSystem<F>,
	primary: &[F],
	message: &[u8],
	proof: &Proof<F, H::Digest>,
) -> Result<(), Error>
where
	F: BinaryField,
	H: Hasher<u8>,
{
	constraint_system.check_fits(params)?;
	check_proof_shape(params, proof)?;

	let mut oracles = PreonOracles::new(params, constraint_system)?;
	oracles.set_primary_input(primary)?;
	let challenges = replay_transcript(params, proof, message, oracles.num_ldt_coefficients()?)?;
	oracles.set_lincheck_challenges(challenges.lincheck, constraint_system)?;
	oracles.set_zero_claimed_sum()?;
	oracles.set_ldt_coefficients(&challenges.ldt_coefficients)?;

	let opened_leaves = validate_openings(params, proof, &challenges.positions)?;

	let foldings = FoldingDomain::all_rounds(params)?;
	challenges.positions.par_iter().try_for_each(|&position| {
		verify_position(
			params,
			&oracles,
			&foldings,
			proof,
			&opened_leaves,
			&challenges.folding,
			position,
		)
	})
}

/// Verifies `proof`, returning whether it is accepted.
pub fn verify<F, H>(
	params: &PreonParams<F, H>,
	constraint_system: &ConstraintSystem<F>,
	primary: &[F],
	message: &[u8],
	proof: &Proof<F, H::Digest>,
) -> bool
where
	F: BinaryField,
	H: Hasher<u8>,
{
	match verify_detailed(params, constraint_system, primary, message, proof) {
		Ok(()) => true,
		Err(err) => {
			tracing::debug!(%err, "rejected proof");
			false
		}
	}
}
