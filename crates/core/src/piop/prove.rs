// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_hash::Hasher;
use rand::RngCore;
use tracing::instrument;

use super::{
	logging::{FriFoldRoundData, QueryOpeningData},
	oracles::PreonOracles,
	proof::Proof,
};
use crate::{
	error::Error,
	merkle_tree::{leaf_values, BinaryMerkleTree, MerkleTreeBuilder},
	params::PreonParams,
	protocols::{
		fri::{self, FoldingDomain},
		ldt::blinding_polynomial,
		r1cs_iop::{compute_fmz, compute_fw},
		sumcheck::{compute_h, masking_polynomial},
	},
	r1cs::ConstraintSystem,
	transcript::{schedule, Transcript},
};

fn commit_columns<F: BinaryField, H: Hasher<u8>>(
	columns: &[&[F]],
	log_coset_size: usize,
	zk_bytesize: usize,
	rng: impl RngCore,
) -> Result<BinaryMerkleTree<H::Digest>, Error> {
	let mut builder = MerkleTreeBuilder::new(1 << log_coset_size, zk_bytesize)?;
	for &column in columns {
		builder.add_column(column)?;
	}
	Ok(builder.commit::<H>(rng)?)
}

/// Proves that `(primary, auxiliary)` satisfies `constraint_system`, binding the proof to
/// `message`.
///
/// All zero-knowledge randomness is drawn from `rng`: the masks of the witness oracles, the
/// masking and blinding polynomials and the Merkle leaf salts.
///
/// ## Throws
///
/// * `Error::InstanceTooLarge` if the system does not fit the domains of `params`.
/// * `Error::UnsatisfiedConstraint` if the assignment violates a constraint.
#[instrument("piop::prove", skip_all, level = "debug")]
pub fn prove<F, H>(
	params: &PreonParams<F, H>,
	constraint_system: &ConstraintSystem<F>,
	primary: &[F],
	auxiliary: &[F],
	message: &[u8],
	mut rng: impl RngCore,
) -> Result<Proof<F, H::Digest>, Error>
where
	F: BinaryField,
	H: Hasher<u8>,
{
	constraint_system.check_fits(params)?;
	constraint_system.check_satisfied(primary, auxiliary)?;

	let mut transcript = Transcript::<H>::new(message);
	let mut oracles = PreonOracles::new(params, constraint_system)?;
	oracles.set_primary_input(primary)?;

	let witness_span = tracing::debug_span!("[step] Commit Witness", phase = "prove").entered();
	let z = constraint_system.assignment(primary, auxiliary)?;
	let [az, bz, cz] = constraint_system.matrix_vector_products(&z);
	let witness_contents = [
		compute_fw(params, primary, auxiliary, &mut rng)?,
		compute_fmz(params, &az, &mut rng)?,
		compute_fmz(params, &bz, &mut rng)?,
		compute_fmz(params, &cz, &mut rng)?,
		masking_polynomial(params, &mut rng)?,
		blinding_polynomial(params, &mut rng)?,
	];
	for (id, content) in oracles
		.witness_tree_oracles()
		.into_iter()
		.zip(witness_contents)
	{
		oracles.set.set_content(id, content)?;
	}
	let witness_tree = {
		let columns = oracles
			.witness_tree_oracles()
			.iter()
			.map(|&id| oracles.set.content(id))
			.collect::<Result<Vec<_>, _>>()?;
		commit_columns::<F, H>(
			&columns,
			params.localization_parameter(0),
			params.hash_zk_bytesize(),
			&mut rng,
		)?
	};
	let lincheck_challenges =
		schedule::commit_witness::<F, H>(&mut transcript, witness_tree.root())?;
	drop(witness_span);

	let sumcheck_span = tracing::debug_span!("[step] Sumcheck", phase = "prove").entered();
	oracles.set_lincheck_challenges(lincheck_challenges, constraint_system)?;
	for id in [
		oracles.fz,
		oracles.rowcheck,
		oracles.multi_lincheck,
		oracles.combined_f,
	] {
		oracles.set.evaluate_content(id)?;
	}
	let h = compute_h(params, oracles.set.content(oracles.combined_f)?)?;
	oracles.set.set_content(oracles.h, h)?;
	oracles.set_zero_claimed_sum()?;
	oracles.set.evaluate_content(oracles.sumcheck_g)?;
	let sumcheck_tree = commit_columns::<F, H>(
		&[oracles.set.content(oracles.h)?],
		params.localization_parameter(0),
		params.hash_zk_bytesize(),
		&mut rng,
	)?;
	let (ldt_coefficients, first_challenge) = schedule::commit_sumcheck::<F, H>(
		&mut transcript,
		lincheck_challenges,
		sumcheck_tree.root(),
		oracles.num_ldt_coefficients()?,
	)?;
	oracles.set_ldt_coefficients(&ldt_coefficients)?;
	oracles.set.evaluate_content(oracles.combined_ldt)?;
	drop(sumcheck_span);

	let num_reductions = params.num_reductions();
	let foldings = FoldingDomain::all_rounds(params)?;
	let mut trees = vec![witness_tree, sumcheck_tree];
	// folded[i] is the codeword of FRI round i + 1.
	let mut folded = Vec::<Vec<F>>::with_capacity(num_reductions);
	let mut challenges = vec![first_challenge];
	for (round, folding) in foldings.iter().enumerate() {
		let codeword = match folded.last() {
			Some(codeword) => codeword.as_slice(),
			None => oracles.set.content(oracles.combined_ldt)?,
		};
		let dimensions_data =
			FriFoldRoundData::new(round, folding.log_coset_size(), codeword.len());
		let _span = tracing::debug_span!(
			"[step] FRI Fold Round",
			phase = "prove",
			round = round,
			?dimensions_data,
		)
		.entered();

		let next = fri::fold_codeword(folding, codeword, challenges[round])?;
		if round + 1 < num_reductions {
			let tree = commit_columns::<F, H>(
				&[next.as_slice()],
				params.localization_parameter(round + 1),
				params.hash_zk_bytesize(),
				&mut rng,
			)?;
			let challenge =
				schedule::commit_fri_round(&mut transcript, round + 1, challenges[round], tree.root())?;
			trees.push(tree);
			challenges.push(challenge);
		}
		folded.push(next);
	}

	let prover_messages = fri::final_polynomial(
		&params.fri_domains()[num_reductions],
		&folded[num_reductions - 1],
		params.final_degree_bound(),
	)?;
	let positions = schedule::sample_queries(
		&mut transcript,
		num_reductions,
		challenges[num_reductions - 1],
		&prover_messages,
		params.num_queries(),
		params.codeword_domain().size(),
	)?;

	let mut tree_columns = vec![
		oracles
			.witness_tree_oracles()
			.iter()
			.map(|&id| oracles.set.content(id))
			.collect::<Result<Vec<_>, _>>()?,
		vec![oracles.set.content(oracles.h)?],
	];
	tree_columns.extend(
		folded[..num_reductions - 1]
			.iter()
			.map(|codeword| vec![codeword.as_slice()]),
	);

	let openings = trees
		.iter()
		.zip(&tree_columns)
		.enumerate()
		.map(|(tree_index, (tree, columns))| -> Result<_, Error> {
			let leaves = params.opened_leaves(tree_index, &positions);
			let round = PreonParams::<F, H>::tree_domain_index(tree_index);
			let coset_size = 1 << params.localization_parameter(round);
			let responses = leaves
				.iter()
				.map(|&leaf| leaf_values(columns, coset_size, leaf))
				.collect::<Vec<_>>();
			Ok((responses, tree.membership_proof(&leaves)?))
		})
		.collect::<Result<Vec<_>, Error>>()?;
	let opening_data = QueryOpeningData::new(
		positions.len(),
		openings
			.iter()
			.map(|(responses, _)| responses.len())
			.collect(),
	);
	tracing::debug!(?opening_data, "opened query positions");

	let (query_responses, membership_proofs) = openings.into_iter().unzip();
	Ok(Proof {
		prover_messages,
		roots: trees.iter().map(|tree| tree.root().clone()).collect(),
		query_responses,
		membership_proofs,
	})
}
