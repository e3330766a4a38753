// Copyright 2024-2025 Irreducible Inc.

//! Protocol parameters and the data derived from them.

use std::marker::PhantomData;

use getset::{CopyGetters, Getters};
use preon_field::{BinaryField, BinaryField192b, BinaryField256b, BinaryField320b};
use preon_hash::{Hasher, Sha3_384, Sha3_512};
use preon_math::{AffineSubspace, VanishingPolynomial};
use preon_utils::{bail, checked_arithmetics::log2_ceil_usize};

use crate::{error::Error, merkle_tree::TreeShape};

/// Number of oracles committed in the first Merkle tree.
pub const NUM_WITNESS_TREE_ORACLES: usize = 6;

/// Parameters can tag at most this many FRI rounds, since round tags are single bytes that start
/// after the fixed rounds.
const MAX_REDUCTIONS: usize = u8::MAX as usize - 3;

/// The tunable values of a Preon instance.
///
/// Domain sizes are given as base-2 logarithms. Every field is public so test suites can build
/// small instances; [`PreonParams::new`] validates the combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
	/// Bytes of randomness salting each Merkle leaf.
	pub hash_zk_bytesize: usize,
	/// Number of random coefficients masking each witness polynomial.
	pub query_bound: usize,
	pub log_input_domain_size: usize,
	pub log_variable_domain_size: usize,
	pub log_constraint_domain_size: usize,
	pub log_summation_domain_size: usize,
	pub log_codeword_domain_size: usize,
	/// `loc[i]` is the base-2 logarithm of the coset size folded in FRI round `i`.
	pub fri_localization_parameters: Vec<usize>,
	pub fri_query_repetitions: usize,
	pub max_ldt_tested_degree_bound: usize,
	pub fri_final_polynomial_degree_bound: usize,
}

impl ParameterSet {
	pub fn num_reductions(&self) -> usize {
		self.fri_localization_parameters.len()
	}

	/// Checks the relations between parameters that do not depend on the field or hash.
	pub fn validate(&self) -> Result<(), Error> {
		let invalid = |reason: &str| Err(Error::InvalidParameters(reason.to_string()));

		if self.log_input_domain_size > self.log_variable_domain_size {
			return invalid("the input domain must not exceed the variable domain");
		}
		if self.log_variable_domain_size > self.log_summation_domain_size
			|| self.log_constraint_domain_size > self.log_summation_domain_size
		{
			return invalid("the summation domain must contain the variable and constraint domains");
		}
		if self.log_summation_domain_size >= self.log_codeword_domain_size {
			return invalid("the codeword domain must be larger than the summation domain");
		}
		if self.log_codeword_domain_size >= usize::BITS as usize - 1 {
			return invalid("the codeword domain is too large");
		}
		if self.query_bound == 0 {
			return invalid("the query bound must be positive");
		}
		if self.fri_query_repetitions == 0 || self.fri_query_repetitions > u32::MAX as usize {
			return invalid("the number of FRI queries is out of range");
		}
		if self.fri_localization_parameters.is_empty()
			|| self.fri_localization_parameters.len() > MAX_REDUCTIONS
		{
			return invalid("the number of FRI reductions is out of range");
		}
		if self.fri_localization_parameters.contains(&0) {
			return invalid("every FRI localization parameter must be positive");
		}

		let total_reduction = self.fri_localization_parameters.iter().sum::<usize>();
		if total_reduction >= self.log_codeword_domain_size {
			return invalid("FRI reduces the codeword domain to nothing");
		}
		let codeword_size = 1usize << self.log_codeword_domain_size;
		if self.max_ldt_tested_degree_bound > codeword_size {
			return invalid("the tested degree bound exceeds the codeword domain size");
		}
		if self.fri_final_polynomial_degree_bound == 0
			|| self.fri_final_polynomial_degree_bound
				> 1 << (self.log_codeword_domain_size - total_reduction)
		{
			return invalid("the final polynomial degree bound must fit the last FRI domain");
		}
		let reduced_bound = self.max_ldt_tested_degree_bound.div_ceil(1 << total_reduction);
		if reduced_bound > self.fri_final_polynomial_degree_bound {
			return invalid("FRI does not reduce the tested degree to the final degree bound");
		}

		let bounds = DegreeBounds::new(self);
		if bounds.max_constituent() > self.max_ldt_tested_degree_bound {
			return invalid("an oracle degree bound exceeds the tested degree bound");
		}
		Ok(())
	}
}

/// Exclusive degree bounds of every oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeBounds {
	pub fw: usize,
	/// Bound of `fAz`, `fBz` and `fCz`.
	pub f_mz: usize,
	pub fz: usize,
	pub rowcheck: usize,
	/// Bound of the lincheck oracle, which `CombinedF` and the masking polynomial share.
	pub multi_lincheck: usize,
	pub sumcheck_h: usize,
	pub sumcheck_g: usize,
	pub blinding: usize,
}

impl DegreeBounds {
	pub fn new(parameter_set: &ParameterSet) -> Self {
		let qb = parameter_set.query_bound;
		let input = 1 << parameter_set.log_input_domain_size;
		let variable = 1 << parameter_set.log_variable_domain_size;
		let constraint = 1 << parameter_set.log_constraint_domain_size;
		let summation = 1 << parameter_set.log_summation_domain_size;

		let fz = variable + qb;
		let f_mz = constraint + qb;
		let multi_lincheck = summation + fz.max(f_mz) - 1;
		Self {
			fw: variable - input + qb,
			f_mz,
			fz,
			rowcheck: constraint + 2 * qb - 1,
			multi_lincheck,
			sumcheck_h: multi_lincheck - summation,
			sumcheck_g: summation - 1,
			blinding: parameter_set.max_ldt_tested_degree_bound,
		}
	}

	fn max_constituent(&self) -> usize {
		[
			self.fw,
			self.f_mz,
			self.fz,
			self.rowcheck,
			self.multi_lincheck,
			self.sumcheck_h,
			self.sumcheck_g,
		]
		.into_iter()
		.max()
		.unwrap_or_default()
	}
}

/// Validated parameters together with every domain the protocol uses.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct PreonParams<F: BinaryField, H> {
	#[getset(get = "pub")]
	parameter_set: ParameterSet,
	#[getset(get = "pub")]
	input_domain: AffineSubspace<F>,
	#[getset(get = "pub")]
	variable_domain: AffineSubspace<F>,
	#[getset(get = "pub")]
	constraint_domain: AffineSubspace<F>,
	#[getset(get = "pub")]
	summation_domain: AffineSubspace<F>,
	/// The FRI evaluation domain `L`, shifted off the subspace spanned by the smaller domains.
	#[getset(get = "pub")]
	codeword_domain: AffineSubspace<F>,
	/// `fri_domains[0]` is the codeword domain and `fri_domains[i + 1]` is the image of
	/// `fri_domains[i]` under the `i`-th localizer polynomial.
	#[getset(get = "pub")]
	fri_domains: Vec<AffineSubspace<F>>,
	#[getset(get = "pub")]
	fri_localizer_domains: Vec<AffineSubspace<F>>,
	#[getset(get = "pub")]
	fri_localizer_polynomials: Vec<VanishingPolynomial<F>>,
	#[getset(get_copy = "pub")]
	degree_bounds: DegreeBounds,
	_marker: PhantomData<H>,
}

impl<F: BinaryField, H: Hasher<u8>> PreonParams<F, H> {
	pub fn new(parameter_set: ParameterSet) -> Result<Self, Error> {
		parameter_set.validate()?;
		if parameter_set.log_codeword_domain_size >= F::DEGREE {
			bail!(Error::InvalidParameters(format!(
				"a codeword domain of dimension {} does not fit a field of degree {}",
				parameter_set.log_codeword_domain_size,
				F::DEGREE
			)));
		}
		let digest_bytes = H::digest_size();
		if F::N_BYTES > digest_bytes {
			bail!(Error::DigestTooShort {
				field_bytes: F::N_BYTES,
				digest_bytes,
			});
		}

		let domain =
			|log_size: usize, shift: F| AffineSubspace::<F>::with_dim(log_size, shift);
		let input_domain = domain(parameter_set.log_input_domain_size, F::ZERO)?;
		let variable_domain = domain(parameter_set.log_variable_domain_size, F::ZERO)?;
		let constraint_domain = domain(parameter_set.log_constraint_domain_size, F::ZERO)?;
		let summation_domain = domain(parameter_set.log_summation_domain_size, F::ZERO)?;
		let codeword_domain = domain(
			parameter_set.log_codeword_domain_size,
			F::basis(parameter_set.log_codeword_domain_size)?,
		)?;

		let mut fri_domains = vec![codeword_domain.clone()];
		let mut fri_localizer_domains = Vec::new();
		let mut fri_localizer_polynomials = Vec::new();
		for &loc in &parameter_set.fri_localization_parameters {
			let current = &fri_domains[fri_domains.len() - 1];
			let localizer =
				AffineSubspace::new_unchecked(current.basis()[..loc].to_vec(), F::ZERO);
			let localizer_polynomial = VanishingPolynomial::new(&localizer);
			let next = AffineSubspace::new_unchecked(
				current.basis()[loc..]
					.iter()
					.map(|&b| localizer_polynomial.evaluate(b))
					.collect(),
				localizer_polynomial.evaluate(current.shift()),
			);
			fri_localizer_domains.push(localizer);
			fri_localizer_polynomials.push(localizer_polynomial);
			fri_domains.push(next);
		}

		let degree_bounds = DegreeBounds::new(&parameter_set);
		tracing::debug!(
			log_codeword_domain_size = parameter_set.log_codeword_domain_size,
			num_reductions = parameter_set.num_reductions(),
			max_ldt_tested_degree_bound = parameter_set.max_ldt_tested_degree_bound,
			"derived Preon parameters"
		);

		Ok(Self {
			parameter_set,
			input_domain,
			variable_domain,
			constraint_domain,
			summation_domain,
			codeword_domain,
			fri_domains,
			fri_localizer_domains,
			fri_localizer_polynomials,
			degree_bounds,
			_marker: PhantomData,
		})
	}

	pub fn query_bound(&self) -> usize {
		self.parameter_set.query_bound
	}

	pub fn num_queries(&self) -> usize {
		self.parameter_set.fri_query_repetitions
	}

	pub fn num_reductions(&self) -> usize {
		self.parameter_set.num_reductions()
	}

	pub fn hash_zk_bytesize(&self) -> usize {
		self.parameter_set.hash_zk_bytesize
	}

	pub fn final_degree_bound(&self) -> usize {
		self.parameter_set.fri_final_polynomial_degree_bound
	}

	pub fn max_ldt_tested_degree_bound(&self) -> usize {
		self.parameter_set.max_ldt_tested_degree_bound
	}

	/// `loc[round]`, the base-2 logarithm of the coset size folded in FRI round `round`.
	pub fn localization_parameter(&self, round: usize) -> usize {
		self.parameter_set.fri_localization_parameters[round]
	}

	/// Trees 0 and 1 hold the round 0 oracles and tree `t >= 2` holds the oracle folded in round
	/// `t - 1`.
	pub fn num_trees(&self) -> usize {
		self.num_reductions() + 1
	}

	/// Index of the FRI domain that tree `tree` commits over.
	pub fn tree_domain_index(tree: usize) -> usize {
		tree.saturating_sub(1)
	}

	pub fn tree_shape(&self, tree: usize) -> TreeShape {
		let round = Self::tree_domain_index(tree);
		let log_coset_size = self.localization_parameter(round);
		let num_oracles = if tree == 0 {
			NUM_WITNESS_TREE_ORACLES
		} else {
			1
		};
		TreeShape {
			num_leaves: self.fri_domains[round].size() >> log_coset_size,
			values_per_leaf: num_oracles << log_coset_size,
			zk_bytesize: self.hash_zk_bytesize(),
			max_openings: self.num_queries(),
		}
	}

	pub fn tree_shapes(&self) -> Vec<TreeShape> {
		(0..self.num_trees()).map(|tree| self.tree_shape(tree)).collect()
	}

	/// The leaf of tree `tree` that answers the query at codeword position `position`.
	pub fn leaf_index(&self, tree: usize, position: usize) -> usize {
		let round = Self::tree_domain_index(tree);
		let shift = self.parameter_set.fri_localization_parameters[..=round]
			.iter()
			.sum::<usize>();
		position >> shift
	}

	/// The sorted, distinct leaves of tree `tree` opened by the query positions.
	pub fn opened_leaves(&self, tree: usize, positions: &[usize]) -> Vec<usize> {
		let mut leaves = positions
			.iter()
			.map(|&position| self.leaf_index(tree, position))
			.collect::<Vec<_>>();
		leaves.sort_unstable();
		leaves.dedup();
		leaves
	}

	/// Number of evaluations of the lincheck oracle the prover interpolates to find `h`.
	pub fn sumcheck_interpolation_size(&self) -> usize {
		1 << log2_ceil_usize(self.degree_bounds.multi_lincheck)
	}
}

/// A named preset binding a field, a hash function and a parameter set.
pub trait PreonVariant {
	type Field: BinaryField;
	type Hasher: Hasher<u8>;

	const NAME: &'static str;

	fn parameter_set() -> ParameterSet;

	fn params() -> Result<PreonParams<Self::Field, Self::Hasher>, Error> {
		PreonParams::new(Self::parameter_set())
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Preon128;

#[derive(Debug, Clone, Copy, Default)]
pub struct Preon192;

#[derive(Debug, Clone, Copy, Default)]
pub struct Preon256;

impl PreonVariant for Preon128 {
	type Field = BinaryField192b;
	type Hasher = Sha3_384;

	const NAME: &'static str = "Preon128";

	fn parameter_set() -> ParameterSet {
		ParameterSet {
			hash_zk_bytesize: 96,
			query_bound: 763,
			log_input_domain_size: 6,
			log_variable_domain_size: 12,
			log_constraint_domain_size: 12,
			log_summation_domain_size: 12,
			log_codeword_domain_size: 19,
			fri_localization_parameters: vec![1; 14],
			fri_query_repetitions: 381,
			max_ldt_tested_degree_bound: 1 << 14,
			fri_final_polynomial_degree_bound: 1,
		}
	}
}

impl PreonVariant for Preon192 {
	type Field = BinaryField256b;
	type Hasher = Sha3_512;

	const NAME: &'static str = "Preon192";

	fn parameter_set() -> ParameterSet {
		ParameterSet {
			hash_zk_bytesize: 128,
			query_bound: 175,
			log_input_domain_size: 7,
			log_variable_domain_size: 13,
			log_constraint_domain_size: 13,
			log_summation_domain_size: 13,
			log_codeword_domain_size: 20,
			fri_localization_parameters: vec![1; 15],
			fri_query_repetitions: 87,
			max_ldt_tested_degree_bound: 1 << 15,
			fri_final_polynomial_degree_bound: 1,
		}
	}
}

impl PreonVariant for Preon256 {
	type Field = BinaryField320b;
	type Hasher = Sha3_512;

	const NAME: &'static str = "Preon256";

	fn parameter_set() -> ParameterSet {
		ParameterSet {
			hash_zk_bytesize: 128,
			query_bound: 219,
			log_input_domain_size: 8,
			log_variable_domain_size: 14,
			log_constraint_domain_size: 14,
			log_summation_domain_size: 14,
			log_codeword_domain_size: 21,
			fri_localization_parameters: vec![1; 16],
			fri_query_repetitions: 110,
			max_ldt_tested_degree_bound: 1 << 16,
			fri_final_polynomial_degree_bound: 1,
		}
	}
}
