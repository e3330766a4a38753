// Copyright 2024-2025 Irreducible Inc.

use preon_field::{util::powers, BinaryField};
use preon_math::{evaluate_univariate, AffineSubspace};
use preon_ntt::{fft, ifft};
use preon_utils::bail;
use rayon::prelude::*;

use crate::{
	oracle::{Error, VirtualOracle},
	r1cs::{ConstraintSystem, Matrix},
	transcript::schedule::{LincheckChallenges, NUM_LINCHECK_MATRICES},
};

/// Batched lincheck for `Az`, `Bz` and `Cz`:
///
/// $$\left(\sum_m r_m f_{Mz,m}(X)\right) p_\alpha(X) - f_z(X) p_{\alpha,ABC}(X)$$
///
/// where over the summation domain `p_alpha` takes the values `alpha^i` at the constraint rows
/// and `p_alpha_ABC` takes `sum_m r_m sum_i alpha^i M_m[i][j]` at the position of variable `j`.
/// The polynomial sums to zero over the summation domain when each `fMz` agrees with `M z`.
#[derive(Debug, Clone)]
pub struct MultiLincheck<F: BinaryField> {
	summation_domain: AffineSubspace<F>,
	constraint_domain_size: usize,
	input_domain_size: usize,
	state: Option<LincheckState<F>>,
}

#[derive(Debug, Clone)]
struct LincheckState<F> {
	r_mz: [F; NUM_LINCHECK_MATRICES],
	/// Coefficients of `p_alpha`.
	p_alpha: Vec<F>,
	/// Coefficients of `p_alpha_ABC`.
	p_alpha_abc: Vec<F>,
}

impl<F: BinaryField> MultiLincheck<F> {
	pub fn new(
		summation_domain: AffineSubspace<F>,
		constraint_domain_size: usize,
		input_domain_size: usize,
	) -> Self {
		Self {
			summation_domain,
			constraint_domain_size,
			input_domain_size,
			state: None,
		}
	}

	/// Fixes the lincheck challenges and interpolates the two selector polynomials.
	pub fn set_challenge(
		&mut self,
		challenges: LincheckChallenges<F>,
		constraint_system: &ConstraintSystem<F>,
	) -> Result<(), Error> {
		if self.state.is_some() {
			bail!(Error::AlreadySet("the lincheck challenge"));
		}
		let summation_size = self.summation_domain.size();
		let num_rows = self.constraint_domain_size.min(summation_size);
		if constraint_system.num_constraints() > num_rows {
			bail!(Error::IncorrectArgumentLength {
				arg: "constraints",
				expected: num_rows,
				actual: constraint_system.num_constraints(),
			});
		}

		let alpha_powers = powers(challenges.alpha)
			.take(num_rows)
			.collect::<Vec<_>>();
		let mut p_alpha_evals = alpha_powers.clone();
		p_alpha_evals.resize(summation_size, F::ZERO);

		let mut p_alpha_abc_evals = vec![F::ZERO; summation_size];
		for (constraint, &alpha_power) in constraint_system.constraints().iter().zip(&alpha_powers) {
			for (matrix, &r) in Matrix::ALL.into_iter().zip(&challenges.r_mz) {
				let scale = r * alpha_power;
				for &(column, coeff) in constraint.row(matrix) {
					let index =
						constraint_system.variable_domain_index(column, self.input_domain_size);
					let Some(eval) = p_alpha_abc_evals.get_mut(index) else {
						bail!(Error::IncorrectArgumentLength {
							arg: "summation domain positions",
							expected: summation_size,
							actual: index + 1,
						});
					};
					*eval += scale * coeff;
				}
			}
		}

		self.state = Some(LincheckState {
			r_mz: challenges.r_mz,
			p_alpha: ifft(&p_alpha_evals, &self.summation_domain)?,
			p_alpha_abc: ifft(&p_alpha_abc_evals, &self.summation_domain)?,
		});
		Ok(())
	}

	fn state(&self) -> Result<&LincheckState<F>, Error> {
		self.state
			.as_ref()
			.ok_or(Error::MissingState("the lincheck challenge"))
	}
}

impl<F: BinaryField> VirtualOracle<F> for MultiLincheck<F> {
	fn arity(&self) -> usize {
		1 + NUM_LINCHECK_MATRICES
	}

	fn evaluate_content(
		&self,
		codeword_domain: &AffineSubspace<F>,
		constituents: &[&[F]],
	) -> Result<Vec<F>, Error> {
		let [fz, f_az, f_bz, f_cz] = constituents else {
			bail!(Error::IncorrectArgumentLength {
				arg: "constituents",
				expected: self.arity(),
				actual: constituents.len(),
			});
		};
		let state = self.state()?;
		let p_alpha = fft(&state.p_alpha, codeword_domain)?;
		let p_alpha_abc = fft(&state.p_alpha_abc, codeword_domain)?;
		let [r_a, r_b, r_c] = state.r_mz;

		Ok((p_alpha, p_alpha_abc, *fz, *f_az, *f_bz, *f_cz)
			.into_par_iter()
			.map(|(p_alpha, p_alpha_abc, &fz, &a, &b, &c)| {
				(r_a * a + r_b * b + r_c * c) * p_alpha - fz * p_alpha_abc
			})
			.collect())
	}

	fn evaluate_at_point(&self, point: F, constituents: &[F]) -> Result<F, Error> {
		let &[fz, a, b, c] = constituents else {
			bail!(Error::IncorrectArgumentLength {
				arg: "constituents",
				expected: self.arity(),
				actual: constituents.len(),
			});
		};
		let state = self.state()?;
		let [r_a, r_b, r_c] = state.r_mz;
		Ok((r_a * a + r_b * b + r_c * c) * evaluate_univariate(&state.p_alpha, point)
			- fz * evaluate_univariate(&state.p_alpha_abc, point))
	}
}
