// Copyright 2024-2025 Irreducible Inc.

use itertools::izip;
use preon_field::BinaryField;
use preon_math::{evaluate_univariate, AffineSubspace};
use preon_utils::bail;
use tracing::instrument;

use super::{Error, FoldingDomain, VerificationError};

/// Checks the folding chain of one query.
///
/// `cosets[i]` holds the values of the round `i` codeword on the coset of `foldings[i]` that
/// contains the query, and `challenges[i]` is the round `i` folding challenge. Each fold must
/// match the corresponding entry of the next coset, and the last fold must match the final
/// polynomial evaluated over `final_domain`.
#[instrument(skip_all, name = "fri::verify_query", level = "debug")]
pub fn verify_query<F: BinaryField>(
	foldings: &[FoldingDomain<F>],
	final_domain: &AffineSubspace<F>,
	challenges: &[F],
	position: usize,
	cosets: &[&[F]],
	final_polynomial: &[F],
) -> Result<(), Error> {
	if cosets.len() != foldings.len() {
		bail!(VerificationError::IncorrectQueryProofLength {
			expected: foldings.len(),
			actual: cosets.len(),
		});
	}
	if challenges.len() != foldings.len() {
		bail!(VerificationError::IncorrectQueryProofLength {
			expected: foldings.len(),
			actual: challenges.len(),
		});
	}

	let mut index = position;
	for (round, (folding, &coset, &challenge)) in izip!(foldings, cosets, challenges).enumerate() {
		let coset_index = index >> folding.log_coset_size();
		let folded = folding.fold_coset(coset_index, coset, challenge)?;
		match foldings.get(round + 1) {
			Some(next) => {
				let offset = coset_index & (next.coset_size() - 1);
				if cosets[round + 1].get(offset) != Some(&folded) {
					bail!(VerificationError::IncorrectFold {
						round,
						index: coset_index,
					});
				}
			}
			None => {
				let point = final_domain.get_checked(coset_index)?;
				if evaluate_univariate(final_polynomial, point) != folded {
					bail!(VerificationError::FinalPolynomialMismatch { index: coset_index });
				}
			}
		}
		index = coset_index;
	}
	Ok(())
}
