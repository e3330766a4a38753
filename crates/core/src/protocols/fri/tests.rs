// Copyright 2024-2025 Irreducible Inc.

use assert_matches::assert_matches;
use preon_field::{BinaryField192b, Field};
use preon_hash::Sha3_384;
use preon_ntt::fft;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::*;
use crate::{params::PreonParams, test_utils::small_parameter_set};

type F = BinaryField192b;
type Params = PreonParams<F, Sha3_384>;

fn params() -> Params {
	PreonParams::new(small_parameter_set()).unwrap()
}

/// Runs every folding round, returning the codeword of each round and the challenges.
fn fold_all(params: &Params, codeword: Vec<F>, rng: &mut StdRng) -> (Vec<Vec<F>>, Vec<F>) {
	let foldings = FoldingDomain::all_rounds(params).unwrap();
	let mut codewords = vec![codeword];
	let mut challenges = Vec::new();
	for folding in &foldings {
		let challenge = F::random(&mut *rng);
		let folded = fold_codeword(folding, &codewords[codewords.len() - 1], challenge).unwrap();
		codewords.push(folded);
		challenges.push(challenge);
	}
	(codewords, challenges)
}

fn query_cosets(params: &Params, codewords: &[Vec<F>], position: usize) -> Vec<Vec<F>> {
	let mut index = position;
	(0..params.num_reductions())
		.map(|round| {
			let log_coset_size = params.localization_parameter(round);
			let start = (index >> log_coset_size) << log_coset_size;
			index >>= log_coset_size;
			codewords[round][start..start + (1 << log_coset_size)].to_vec()
		})
		.collect()
}

fn low_degree_codeword(params: &Params, rng: &mut StdRng) -> Vec<F> {
	let coeffs = (0..params.max_ldt_tested_degree_bound())
		.map(|_| F::random(&mut *rng))
		.collect::<Vec<_>>();
	fft(&coeffs, params.codeword_domain()).unwrap()
}

#[test]
fn test_folding_reaches_the_final_degree_bound() {
	let mut rng = StdRng::seed_from_u64(0);
	let params = params();
	let codeword = low_degree_codeword(&params, &mut rng);
	let (codewords, _) = fold_all(&params, codeword, &mut rng);

	let final_domain = &params.fri_domains()[params.num_reductions()];
	let last = &codewords[params.num_reductions()];
	assert_eq!(last.len(), final_domain.size());
	let final_poly = final_polynomial(final_domain, last, params.final_degree_bound()).unwrap();
	assert_eq!(final_poly.len(), params.final_degree_bound());
}

#[test]
fn test_fold_is_deterministic() {
	let mut rng = StdRng::seed_from_u64(6);
	let params = params();
	let codeword = low_degree_codeword(&params, &mut rng);
	let challenge = F::random(&mut rng);
	let folding = FoldingDomain::for_round(&params, 0).unwrap();

	let first = fold_codeword(&folding, &codeword, challenge).unwrap();
	let second = fold_codeword(&folding, &codeword, challenge).unwrap();
	assert_eq!(first, second);
	assert_ne!(first, fold_codeword(&folding, &codeword, challenge + F::ONE).unwrap());
}

#[test]
fn test_fold_at_a_coset_point_reads_the_value() {
	let mut rng = StdRng::seed_from_u64(1);
	let params = params();
	let folding = FoldingDomain::for_round(&params, 0).unwrap();
	let values = [F::random(&mut rng), F::random(&mut rng)];
	let challenge = params.codeword_domain().get(5);
	assert_eq!(folding.fold_coset(2, &values, challenge).unwrap(), values[1]);
	let challenge = params.codeword_domain().get(4);
	assert_eq!(folding.fold_coset(2, &values, challenge).unwrap(), values[0]);
}

#[test]
fn test_fold_of_a_line_is_its_value() {
	// A polynomial of degree below the coset size folds to its evaluation at the challenge.
	let mut rng = StdRng::seed_from_u64(2);
	let params = params();
	let folding = FoldingDomain::for_round(&params, 0).unwrap();
	let line = [F::random(&mut rng), F::random(&mut rng)];
	let codeword = fft(&line, params.codeword_domain()).unwrap();
	let challenge = F::random(&mut rng);
	let expected = line[0] + line[1] * challenge;
	for coset_index in 0..codeword.len() / 2 {
		let coset = &codeword[2 * coset_index..2 * coset_index + 2];
		assert_eq!(folding.fold_coset(coset_index, coset, challenge).unwrap(), expected);
	}
}

#[test]
fn test_honest_queries_verify() {
	let mut rng = StdRng::seed_from_u64(3);
	let params = params();
	let codeword = low_degree_codeword(&params, &mut rng);
	let (codewords, challenges) = fold_all(&params, codeword, &mut rng);
	let final_domain = &params.fri_domains()[params.num_reductions()];
	let final_poly = final_polynomial(
		final_domain,
		&codewords[params.num_reductions()],
		params.final_degree_bound(),
	)
	.unwrap();

	let foldings = FoldingDomain::all_rounds(&params).unwrap();
	for _ in 0..8 {
		let position = rng.gen_range(0..params.codeword_domain().size());
		let cosets = query_cosets(&params, &codewords, position);
		let cosets = cosets.iter().map(Vec::as_slice).collect::<Vec<_>>();
		verify_query(&foldings, final_domain, &challenges, position, &cosets, &final_poly).unwrap();
	}
}

#[test]
fn test_tampered_query_is_rejected() {
	let mut rng = StdRng::seed_from_u64(4);
	let params = params();
	let codeword = low_degree_codeword(&params, &mut rng);
	let (codewords, challenges) = fold_all(&params, codeword, &mut rng);
	let final_domain = &params.fri_domains()[params.num_reductions()];
	let final_poly = final_polynomial(
		final_domain,
		&codewords[params.num_reductions()],
		params.final_degree_bound(),
	)
	.unwrap();
	let foldings = FoldingDomain::all_rounds(&params).unwrap();

	let position = 37;
	let mut cosets = query_cosets(&params, &codewords, position);
	cosets[0][1] += F::ONE;
	let slices = cosets.iter().map(Vec::as_slice).collect::<Vec<_>>();
	assert_matches!(
		verify_query(&foldings, final_domain, &challenges, position, &slices, &final_poly),
		Err(Error::Verification(VerificationError::IncorrectFold { round: 0, .. }))
	);

	let cosets = query_cosets(&params, &codewords, position);
	let slices = cosets.iter().map(Vec::as_slice).collect::<Vec<_>>();
	let mut wrong_final = final_poly.clone();
	wrong_final[0] += F::ONE;
	assert_matches!(
		verify_query(&foldings, final_domain, &challenges, position, &slices, &wrong_final),
		Err(Error::Verification(VerificationError::FinalPolynomialMismatch { .. }))
	);

	assert_matches!(
		verify_query(&foldings, final_domain, &challenges, position, &slices[1..], &final_poly),
		Err(Error::Verification(VerificationError::IncorrectQueryProofLength { .. }))
	);
}

#[test]
fn test_high_degree_codeword_is_rejected() {
	let mut rng = StdRng::seed_from_u64(5);
	let params = params();
	let codeword = (0..params.codeword_domain().size())
		.map(|_| F::random(&mut rng))
		.collect::<Vec<_>>();
	let (codewords, _) = fold_all(&params, codeword, &mut rng);
	let final_domain = &params.fri_domains()[params.num_reductions()];
	assert_matches!(
		final_polynomial(
			final_domain,
			&codewords[params.num_reductions()],
			params.final_degree_bound()
		),
		Err(Error::DegreeTooHigh { degree_bound: 2, .. })
	);
}

#[test]
fn test_invalid_arguments() {
	let params = params();
	assert_matches!(
		FoldingDomain::for_round(&params, params.num_reductions()),
		Err(Error::InvalidRound { .. })
	);
	let folding = FoldingDomain::for_round(&params, 1).unwrap();
	assert_matches!(
		folding.fold_coset(0, &[F::ONE; 3], F::ONE),
		Err(Error::IncorrectCosetSize { expected: 2, actual: 3 })
	);
	assert_matches!(
		fold_codeword(&folding, &[F::ONE; 64], F::ONE),
		Err(Error::IncorrectCosetSize { expected: 32, .. })
	);
}
