// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_hash::Hasher;

use crate::{
	oracle::{Error, OracleId, OracleSet},
	params::{PreonParams, NUM_WITNESS_TREE_ORACLES},
	protocols::{
		ldt::{CombinedLdt, LinearCombination},
		r1cs_iop::{Fz, MultiLincheck, Rowcheck},
		sumcheck::SumcheckG,
	},
	r1cs::ConstraintSystem,
	transcript::schedule::LincheckChallenges,
};

/// The oracle DAG of one Preon proof.
///
/// Prover and verifier build the same DAG. The prover fills in the committed oracles and
/// evaluates the virtual ones over the whole codeword domain, while the verifier only evaluates
/// them at queried positions.
#[derive(Debug)]
pub struct PreonOracles<F: BinaryField> {
	pub set: OracleSet<F>,
	pub fw: OracleId,
	pub f_az: OracleId,
	pub f_bz: OracleId,
	pub f_cz: OracleId,
	pub masking: OracleId,
	pub blinding: OracleId,
	pub h: OracleId,
	pub fz: OracleId,
	pub rowcheck: OracleId,
	pub multi_lincheck: OracleId,
	pub combined_f: OracleId,
	pub sumcheck_g: OracleId,
	pub combined_ldt: OracleId,
}

impl<F: BinaryField> PreonOracles<F> {
	pub fn new<H: Hasher<u8>>(
		params: &PreonParams<F, H>,
		constraint_system: &ConstraintSystem<F>,
	) -> Result<Self, Error> {
		let bounds = params.degree_bounds();
		let mut set = OracleSet::new(params.codeword_domain().clone());

		let fw = set.add_committed("fw", bounds.fw);
		let f_az = set.add_committed("fAz", bounds.f_mz);
		let f_bz = set.add_committed("fBz", bounds.f_mz);
		let f_cz = set.add_committed("fCz", bounds.f_mz);
		let masking = set.add_committed("masking", bounds.multi_lincheck);
		let blinding = set.add_committed("blinding", bounds.blinding);
		let h = set.add_committed("h", bounds.sumcheck_h);

		let fz = set.add_virtual(
			"fz",
			bounds.fz,
			Fz::new(params.input_domain().clone(), constraint_system.num_public_inputs()),
			&[fw],
		)?;
		let rowcheck = set.add_virtual(
			"rowcheck",
			bounds.rowcheck,
			Rowcheck::new(params.constraint_domain()),
			&[f_az, f_bz, f_cz],
		)?;
		let multi_lincheck = set.add_virtual(
			"multi_lincheck",
			bounds.multi_lincheck,
			MultiLincheck::new(
				params.summation_domain().clone(),
				params.constraint_domain().size(),
				params.input_domain().size(),
			),
			&[fz, f_az, f_bz, f_cz],
		)?;

		let mut masked_sum = LinearCombination::new(2);
		masked_sum.set_coefficients(vec![F::ONE, F::ONE])?;
		let combined_f = set.add_virtual(
			"combined_f",
			bounds.multi_lincheck,
			masked_sum,
			&[masking, multi_lincheck],
		)?;
		let sumcheck_g = set.add_virtual(
			"sumcheck_g",
			bounds.sumcheck_g,
			SumcheckG::new(params.summation_domain())?,
			&[combined_f, h],
		)?;

		let tested = [masking, h, sumcheck_g, fw, f_az, f_bz, f_cz, rowcheck, blinding];
		let tested_bounds = tested
			.iter()
			.map(|&id| set.get(id).map(|oracle| oracle.degree_bound()))
			.collect::<Result<Vec<_>, _>>()?;
		let combined_ldt = set.add_virtual(
			"combined_ldt",
			params.max_ldt_tested_degree_bound(),
			CombinedLdt::new(tested_bounds),
			&tested,
		)?;

		Ok(Self {
			set,
			fw,
			f_az,
			f_bz,
			f_cz,
			masking,
			blinding,
			h,
			fz,
			rowcheck,
			multi_lincheck,
			combined_f,
			sumcheck_g,
			combined_ldt,
		})
	}

	/// The oracles of the first Merkle tree, in column order.
	pub fn witness_tree_oracles(&self) -> [OracleId; NUM_WITNESS_TREE_ORACLES] {
		[
			self.fw,
			self.f_az,
			self.f_bz,
			self.f_cz,
			self.masking,
			self.blinding,
		]
	}

	pub fn set_primary_input(&mut self, primary: &[F]) -> Result<(), Error> {
		self.set
			.virtual_oracle_mut::<Fz<F>>(self.fz)?
			.set_primary_input(primary)
	}

	pub fn set_lincheck_challenges(
		&mut self,
		challenges: LincheckChallenges<F>,
		constraint_system: &ConstraintSystem<F>,
	) -> Result<(), Error> {
		self.set
			.virtual_oracle_mut::<MultiLincheck<F>>(self.multi_lincheck)?
			.set_challenge(challenges, constraint_system)
	}

	/// Both the masking polynomial and the lincheck oracle of a satisfying witness sum to zero
	/// over the summation domain.
	pub fn set_zero_claimed_sum(&mut self) -> Result<(), Error> {
		self.set
			.virtual_oracle_mut::<SumcheckG<F>>(self.sumcheck_g)?
			.set_claimed_sum(F::ZERO)
	}

	pub fn num_ldt_coefficients(&self) -> Result<usize, Error> {
		Ok(self
			.set
			.virtual_oracle::<CombinedLdt<F>>(self.combined_ldt)?
			.num_random_coefficients())
	}

	pub fn set_ldt_coefficients(&mut self, coefficients: &[F]) -> Result<(), Error> {
		self.set
			.virtual_oracle_mut::<CombinedLdt<F>>(self.combined_ldt)?
			.set_random_coefficients(coefficients)
	}
}
