// Copyright 2024-2025 Irreducible Inc.

//! The round structure shared by the prover and the verifier.
//!
//! | Round | Absorbed                          | Squeezed (tag)                        |
//! |-------|-----------------------------------|---------------------------------------|
//! | 0     | `state, root_0`                   | `alpha, r_Mz` (1)                     |
//! | 1     | `alpha, r_Mz, root_1`             | LDT coefficients (2), `x_0` (3)       |
//! | i + 1 | `x_{i-1}, root_{i+1}`             | `x_i` (i + 3)                         |
//! | final | `x_{R-1}, final polynomial`       | query positions (R + 3)               |

use preon_field::Field;
use preon_hash::Hasher;

use super::{field_bytes, Error, Transcript};

pub const LINCHECK_CHALLENGE_TAG: u8 = 1;
pub const LDT_COEFFICIENT_TAG: u8 = 2;
pub const FIRST_FOLDING_TAG: u8 = 3;

/// Number of random linear combinations mixed into each R1CS row check.
pub const NUM_LINCHECK_MATRICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LincheckChallenges<F> {
	pub alpha: F,
	pub r_mz: [F; NUM_LINCHECK_MATRICES],
}

impl<F: Field> LincheckChallenges<F> {
	fn to_bytes(self) -> Vec<u8> {
		let mut values = vec![self.alpha];
		values.extend(self.r_mz);
		field_bytes(&values)
	}
}

/// Absorbs the first commitment and derives the lincheck challenges.
pub fn commit_witness<F: Field, H: Hasher<u8>>(
	transcript: &mut Transcript<H>,
	root: &H::Digest,
) -> Result<LincheckChallenges<F>, Error> {
	transcript.absorb(&[root.as_ref()]);
	let values =
		transcript.squeeze::<F>(1 + NUM_LINCHECK_MATRICES, LINCHECK_CHALLENGE_TAG)?;
	Ok(LincheckChallenges {
		alpha: values[0],
		r_mz: [values[1], values[2], values[3]],
	})
}

/// Absorbs the sumcheck commitment and derives the LDT combination coefficients followed by the
/// first folding challenge.
pub fn commit_sumcheck<F: Field, H: Hasher<u8>>(
	transcript: &mut Transcript<H>,
	challenges: LincheckChallenges<F>,
	root: &H::Digest,
	num_ldt_coefficients: usize,
) -> Result<(Vec<F>, F), Error> {
	transcript.reseed(&[&challenges.to_bytes(), root.as_ref()]);
	let coefficients = transcript.squeeze::<F>(num_ldt_coefficients, LDT_COEFFICIENT_TAG)?;
	let x0 = transcript.squeeze::<F>(1, FIRST_FOLDING_TAG)?[0];
	Ok((coefficients, x0))
}

/// Absorbs the commitment to the `round`-th folded oracle, `round >= 1`, and derives the next
/// folding challenge.
pub fn commit_fri_round<F: Field, H: Hasher<u8>>(
	transcript: &mut Transcript<H>,
	round: usize,
	previous_challenge: F,
	root: &H::Digest,
) -> Result<F, Error> {
	transcript.reseed(&[&field_bytes(&[previous_challenge]), root.as_ref()]);
	Ok(transcript.squeeze::<F>(1, round_tag(round))?[0])
}

/// Absorbs the final polynomial and derives the query positions in the codeword domain.
pub fn sample_queries<F: Field, H: Hasher<u8>>(
	transcript: &mut Transcript<H>,
	num_reductions: usize,
	last_challenge: F,
	final_polynomial: &[F],
	num_queries: usize,
	codeword_size: usize,
) -> Result<Vec<usize>, Error> {
	transcript.reseed(&[&field_bytes(&[last_challenge]), &field_bytes(final_polynomial)]);
	transcript.squeeze_positions(num_queries, round_tag(num_reductions), codeword_size)
}

/// Tag of the challenge squeezed after committing FRI round `round`.
///
/// Parameter validation bounds the number of reductions so the tag fits a byte.
pub fn round_tag(round: usize) -> u8 {
	(round + FIRST_FOLDING_TAG as usize) as u8
}
