// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_math::AffineSubspace;
use preon_utils::bail;
use rayon::prelude::*;

use crate::oracle::{Error, VirtualOracle};

fn check_constituent_lengths<F>(
	codeword_domain: &AffineSubspace<F>,
	constituents: &[&[F]],
	arity: usize,
) -> Result<(), Error>
where
	F: BinaryField,
{
	if constituents.len() != arity {
		bail!(Error::IncorrectArgumentLength {
			arg: "constituents",
			expected: arity,
			actual: constituents.len(),
		});
	}
	if let Some(constituent) = constituents
		.iter()
		.find(|values| values.len() != codeword_domain.size())
	{
		bail!(Error::IncorrectContentLength {
			expected: codeword_domain.size(),
			actual: constituent.len(),
		});
	}
	Ok(())
}

fn check_point_arity<F>(constituents: &[F], arity: usize) -> Result<(), Error> {
	if constituents.len() != arity {
		bail!(Error::IncorrectArgumentLength {
			arg: "constituents",
			expected: arity,
			actual: constituents.len(),
		});
	}
	Ok(())
}

/// `sum_i c_i f_i` for coefficients fixed once through [`Self::set_coefficients`].
#[derive(Debug, Clone)]
pub struct LinearCombination<F: BinaryField> {
	arity: usize,
	coefficients: Option<Vec<F>>,
}

impl<F: BinaryField> LinearCombination<F> {
	pub fn new(arity: usize) -> Self {
		Self {
			arity,
			coefficients: None,
		}
	}

	pub fn set_coefficients(&mut self, coefficients: Vec<F>) -> Result<(), Error> {
		if self.coefficients.is_some() {
			bail!(Error::AlreadySet("the combination coefficients"));
		}
		if coefficients.len() != self.arity {
			bail!(Error::IncorrectArgumentLength {
				arg: "combination coefficients",
				expected: self.arity,
				actual: coefficients.len(),
			});
		}
		self.coefficients = Some(coefficients);
		Ok(())
	}

	fn coefficients(&self) -> Result<&[F], Error> {
		self.coefficients
			.as_deref()
			.ok_or(Error::MissingState("the combination coefficients"))
	}
}

impl<F: BinaryField> VirtualOracle<F> for LinearCombination<F> {
	fn arity(&self) -> usize {
		self.arity
	}

	fn evaluate_content(
		&self,
		codeword_domain: &AffineSubspace<F>,
		constituents: &[&[F]],
	) -> Result<Vec<F>, Error> {
		let coefficients = self.coefficients()?;
		check_constituent_lengths(codeword_domain, constituents, self.arity)?;
		Ok((0..codeword_domain.size())
			.into_par_iter()
			.map(|position| {
				coefficients
					.iter()
					.zip(constituents)
					.map(|(&c, values)| c * values[position])
					.sum::<F>()
			})
			.collect())
	}

	fn evaluate_at_point(&self, _point: F, constituents: &[F]) -> Result<F, Error> {
		check_point_arity(constituents, self.arity)?;
		Ok(self
			.coefficients()?
			.iter()
			.zip(constituents)
			.map(|(&c, &value)| c * value)
			.sum())
	}
}

/// The random combination of every oracle that the low-degree test checks.
///
/// With `max` the largest constituent degree bound, the value is
///
/// $$\sum_i c_i f_i(X) + \sum_k c_{n + k} X^{max - d_{j_k}} f_{j_k}(X)$$
///
/// where `n` is the arity and `j_0, j_1, ...` are the constituents whose bound `d_{j_k}` is below
/// `max`. Shifting those up to `max` makes FRI test each of them against its own bound. The
/// first coefficient is fixed to one and the other `2n` are random.
#[derive(Debug, Clone)]
pub struct CombinedLdt<F: BinaryField> {
	degree_bounds: Vec<usize>,
	max_degree_bound: usize,
	coefficients: Option<Vec<F>>,
}

impl<F: BinaryField> CombinedLdt<F> {
	pub fn new(degree_bounds: Vec<usize>) -> Self {
		let max_degree_bound = degree_bounds.iter().copied().max().unwrap_or_default();
		Self {
			degree_bounds,
			max_degree_bound,
			coefficients: None,
		}
	}

	pub fn max_degree_bound(&self) -> usize {
		self.max_degree_bound
	}

	/// Number of random coefficients [`Self::set_random_coefficients`] takes.
	pub fn num_random_coefficients(&self) -> usize {
		2 * self.degree_bounds.len()
	}

	pub fn set_random_coefficients(&mut self, random: &[F]) -> Result<(), Error> {
		if self.coefficients.is_some() {
			bail!(Error::AlreadySet("the LDT coefficients"));
		}
		if random.len() != self.num_random_coefficients() {
			bail!(Error::IncorrectArgumentLength {
				arg: "LDT coefficients",
				expected: self.num_random_coefficients(),
				actual: random.len(),
			});
		}
		let mut coefficients = Vec::with_capacity(random.len() + 1);
		coefficients.push(F::ONE);
		coefficients.extend_from_slice(random);
		self.coefficients = Some(coefficients);
		Ok(())
	}

	fn coefficients(&self) -> Result<&[F], Error> {
		self.coefficients
			.as_deref()
			.ok_or(Error::MissingState("the LDT coefficients"))
	}

	/// `(constituent index, exponent of X)` for each constituent below the maximum bound.
	fn shifted_constituents(&self) -> Vec<(usize, u64)> {
		self.degree_bounds
			.iter()
			.enumerate()
			.filter(|(_, &bound)| bound < self.max_degree_bound)
			.map(|(index, &bound)| (index, (self.max_degree_bound - bound) as u64))
			.collect()
	}

	/// `power(k)` is the point raised to the exponent of the `k`-th shifted constituent.
	fn combine(
		&self,
		coefficients: &[F],
		shifted: &[(usize, u64)],
		value: impl Fn(usize) -> F,
		power: impl Fn(usize) -> F,
	) -> F {
		let arity = self.degree_bounds.len();
		let unshifted = (0..arity)
			.map(|i| coefficients[i] * value(i))
			.sum::<F>();
		let shifted = shifted
			.iter()
			.enumerate()
			.map(|(k, &(i, _))| coefficients[arity + k] * power(k) * value(i))
			.sum::<F>();
		unshifted + shifted
	}
}

impl<F: BinaryField> VirtualOracle<F> for CombinedLdt<F> {
	fn arity(&self) -> usize {
		self.degree_bounds.len()
	}

	fn evaluate_content(
		&self,
		codeword_domain: &AffineSubspace<F>,
		constituents: &[&[F]],
	) -> Result<Vec<F>, Error> {
		let coefficients = self.coefficients()?;
		check_constituent_lengths(codeword_domain, constituents, self.arity())?;
		let shifted = self.shifted_constituents();

		// Constituents sharing a degree bound share the powers of X over the domain.
		let mut exponents = shifted
			.iter()
			.map(|&(_, exponent)| exponent)
			.collect::<Vec<_>>();
		exponents.sort_unstable();
		exponents.dedup();
		let powers = exponents
			.par_iter()
			.map(|&exponent| codeword_domain.pow_elements(exponent))
			.collect::<Vec<_>>();
		let power_index = shifted
			.iter()
			.map(|&(_, exponent)| exponents.partition_point(|&e| e < exponent))
			.collect::<Vec<_>>();

		Ok((0..codeword_domain.size())
			.into_par_iter()
			.map(|position| {
				self.combine(
					coefficients,
					&shifted,
					|i| constituents[i][position],
					|k| powers[power_index[k]][position],
				)
			})
			.collect())
	}

	fn evaluate_at_point(&self, point: F, constituents: &[F]) -> Result<F, Error> {
		check_point_arity(constituents, self.arity())?;
		let coefficients = self.coefficients()?;
		let shifted = self.shifted_constituents();
		Ok(self.combine(coefficients, &shifted, |i| constituents[i], |k| point.pow(shifted[k].1)))
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use preon_field::{BinaryField192b, Field};
	use preon_math::num_nonzero_prefix;
	use preon_ntt::{fft, ifft};
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;

	type F = BinaryField192b;

	#[test]
	fn test_linear_combination() {
		let domain = AffineSubspace::<F>::with_dim(2, F::from_u64(4)).unwrap();
		let mut combination = LinearCombination::new(2);
		combination
			.set_coefficients(vec![F::ONE, F::ONE])
			.unwrap();
		let a = [F::from_u64(1), F::from_u64(2), F::from_u64(3), F::from_u64(4)];
		let b = [F::from_u64(5), F::from_u64(6), F::from_u64(7), F::from_u64(8)];
		let content = combination.evaluate_content(&domain, &[a.as_slice(), b.as_slice()]).unwrap();
		for i in 0..4 {
			assert_eq!(content[i], a[i] + b[i]);
			assert_eq!(combination.evaluate_at_point(F::ZERO, &[a[i], b[i]]).unwrap(), content[i]);
		}
		assert_matches!(
			combination.set_coefficients(vec![F::ONE, F::ONE]),
			Err(Error::AlreadySet(_))
		);
		assert_matches!(
			LinearCombination::new(2).set_coefficients(vec![F::ONE]),
			Err(Error::IncorrectArgumentLength { .. })
		);
	}

	#[test]
	fn test_combined_degree_is_the_maximum_bound() {
		let mut rng = StdRng::seed_from_u64(0);
		let domain = AffineSubspace::<F>::with_dim(5, F::from_u64(32)).unwrap();
		let bounds = vec![8, 3, 5, 3];
		let polys = bounds
			.iter()
			.map(|&bound| (0..bound).map(|_| F::random(&mut rng)).collect::<Vec<_>>())
			.collect::<Vec<_>>();
		let contents = polys
			.iter()
			.map(|poly| fft(poly, &domain).unwrap())
			.collect::<Vec<_>>();
		let constituents = contents.iter().map(Vec::as_slice).collect::<Vec<_>>();

		let mut combined = CombinedLdt::new(bounds);
		assert_eq!(combined.max_degree_bound(), 8);
		let random = (0..combined.num_random_coefficients())
			.map(|_| F::random(&mut rng))
			.collect::<Vec<_>>();
		combined.set_random_coefficients(&random).unwrap();
		let content = combined.evaluate_content(&domain, &constituents).unwrap();
		assert_eq!(num_nonzero_prefix(&ifft(&content, &domain).unwrap()), 8);

		let position = 17;
		let values = contents.iter().map(|c| c[position]).collect::<Vec<_>>();
		assert_eq!(
			combined
				.evaluate_at_point(domain.get(position), &values)
				.unwrap(),
			content[position]
		);
	}

	#[test]
	fn test_combined_ldt_setter() {
		let mut combined = CombinedLdt::<F>::new(vec![4, 4]);
		assert_matches!(
			combined.evaluate_at_point(F::ONE, &[F::ONE, F::ONE]),
			Err(Error::MissingState(_))
		);
		assert_matches!(
			combined.set_random_coefficients(&[F::ONE; 3]),
			Err(Error::IncorrectArgumentLength { expected: 4, .. })
		);
		combined.set_random_coefficients(&[F::ONE; 4]).unwrap();
		assert_matches!(combined.set_random_coefficients(&[F::ONE; 4]), Err(Error::AlreadySet(_)));
		assert_matches!(
			combined.evaluate_at_point(F::ONE, &[F::ONE]),
			Err(Error::IncorrectArgumentLength { expected: 2, actual: 1, .. })
		);

		let mut sum = LinearCombination::new(2);
		sum.set_coefficients(vec![F::ONE, F::ONE]).unwrap();
		assert_matches!(
			sum.evaluate_at_point(F::ONE, &[F::ONE; 3]),
			Err(Error::IncorrectArgumentLength { expected: 2, actual: 3, .. })
		);
	}
}
