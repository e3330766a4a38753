// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_math::{num_nonzero_prefix, AffineSubspace};
use preon_ntt::ifft;
use preon_utils::bail;
use rayon::prelude::*;
use tracing::instrument;

use super::{Error, FoldingDomain};

/// Folds every coset of `codeword` at `challenge`, giving the codeword of the next round.
#[instrument(skip_all, name = "fri::fold_codeword", level = "debug")]
pub fn fold_codeword<F: BinaryField>(
	folding_domain: &FoldingDomain<F>,
	codeword: &[F],
	challenge: F,
) -> Result<Vec<F>, Error> {
	if codeword.len() != folding_domain.domain().size() {
		bail!(Error::IncorrectCosetSize {
			expected: folding_domain.domain().size(),
			actual: codeword.len(),
		});
	}
	codeword
		.par_chunks_exact(folding_domain.coset_size())
		.enumerate()
		.map(|(coset_index, coset)| folding_domain.fold_coset(coset_index, coset, challenge))
		.collect()
}

/// The coefficients of the last folded codeword, truncated to `degree_bound`.
///
/// ## Throws
///
/// * `Error::DegreeTooHigh` if a coefficient past the bound is nonzero, in which case the
///   verifier would reject anyway.
pub fn final_polynomial<F: BinaryField>(
	domain: &AffineSubspace<F>,
	codeword: &[F],
	degree_bound: usize,
) -> Result<Vec<F>, Error> {
	let mut coeffs = ifft(codeword, domain)?;
	let degree = num_nonzero_prefix(&coeffs);
	if degree > degree_bound {
		bail!(Error::DegreeTooHigh {
			degree: degree - 1,
			degree_bound,
		});
	}
	coeffs.resize(degree_bound, F::ZERO);
	Ok(coeffs)
}
