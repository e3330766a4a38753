// Copyright 2024-2025 Irreducible Inc.

//! Rank-1 constraint systems.
//!
//! The variable vector is `z = (1, primary inputs, auxiliary inputs)`. A constraint holds when
//! `<a, z> * <b, z> = <c, z>`, where `a`, `b` and `c` are sparse rows of the matrices `A`, `B`
//! and `C`.

use preon_field::{BinaryField, Field};
use preon_utils::{bail, ensure};

use crate::{error::Error, params::PreonParams};

/// Sparse matrix row as `(column, coefficient)` pairs. Column 0 is the constant one.
pub type SparseRow<F> = Vec<(usize, F)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matrix {
	A,
	B,
	C,
}

impl Matrix {
	pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint<F> {
	pub a: SparseRow<F>,
	pub b: SparseRow<F>,
	pub c: SparseRow<F>,
}

impl<F> Constraint<F> {
	pub fn row(&self, matrix: Matrix) -> &[(usize, F)] {
		match matrix {
			Matrix::A => &self.a,
			Matrix::B => &self.b,
			Matrix::C => &self.c,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSystem<F> {
	num_public_inputs: usize,
	num_variables: usize,
	constraints: Vec<Constraint<F>>,
}

impl<F: Field> ConstraintSystem<F> {
	/// Creates an empty system over `num_variables` variables, the first `num_public_inputs` of
	/// which are public. The constant one is not counted.
	pub fn new(num_public_inputs: usize, num_variables: usize) -> Result<Self, Error> {
		ensure!(
			num_public_inputs <= num_variables,
			Error::IncorrectWitnessLength {
				arg: "variables covering the public inputs",
				expected: num_public_inputs,
				actual: num_variables,
			}
		);
		Ok(Self {
			num_public_inputs,
			num_variables,
			constraints: Vec::new(),
		})
	}

	pub fn num_public_inputs(&self) -> usize {
		self.num_public_inputs
	}

	pub fn num_auxiliary_inputs(&self) -> usize {
		self.num_variables - self.num_public_inputs
	}

	pub fn num_variables(&self) -> usize {
		self.num_variables
	}

	pub fn num_constraints(&self) -> usize {
		self.constraints.len()
	}

	pub fn constraints(&self) -> &[Constraint<F>] {
		&self.constraints
	}

	pub fn add_constraint(
		&mut self,
		a: SparseRow<F>,
		b: SparseRow<F>,
		c: SparseRow<F>,
	) -> Result<(), Error> {
		let constraint = Constraint { a, b, c };
		self.check_columns(self.constraints.len(), &constraint)?;
		self.constraints.push(constraint);
		Ok(())
	}

	/// Checks that every referenced column exists.
	pub fn validate(&self) -> Result<(), Error> {
		self.constraints
			.iter()
			.enumerate()
			.try_for_each(|(index, constraint)| self.check_columns(index, constraint))
	}

	fn check_columns(&self, index: usize, constraint: &Constraint<F>) -> Result<(), Error> {
		let num_columns = self.num_variables + 1;
		for matrix in Matrix::ALL {
			if let Some(&(column, _)) = constraint
				.row(matrix)
				.iter()
				.find(|(column, _)| *column >= num_columns)
			{
				bail!(Error::ColumnOutOfRange {
					constraint: index,
					column,
					num_columns,
				});
			}
		}
		Ok(())
	}

	/// Checks that the system can be laid out over the domains of `params`.
	pub fn check_fits<FDomain: BinaryField, H>(
		&self,
		params: &PreonParams<FDomain, H>,
	) -> Result<(), Error> {
		self.validate()?;
		let input_size = params.input_domain().size();
		let variable_size = params.variable_domain().size();
		let constraint_size = params.constraint_domain().size();
		if self.num_public_inputs + 1 > input_size {
			bail!(Error::InstanceTooLarge(format!(
				"{} public inputs and the constant do not fit an input domain of size {input_size}",
				self.num_public_inputs
			)));
		}
		if input_size + self.num_auxiliary_inputs() > variable_size {
			bail!(Error::InstanceTooLarge(format!(
				"{} auxiliary inputs do not fit a variable domain of size {variable_size}",
				self.num_auxiliary_inputs()
			)));
		}
		if self.num_constraints() > constraint_size {
			bail!(Error::InstanceTooLarge(format!(
				"{} constraints do not fit a constraint domain of size {constraint_size}",
				self.num_constraints()
			)));
		}
		Ok(())
	}

	/// Position of column `column` of `z` in the variable domain.
	///
	/// The constant and the public inputs occupy the start of the input domain and the auxiliary
	/// inputs start right after it.
	pub fn variable_domain_index(&self, column: usize, input_domain_size: usize) -> usize {
		if column <= self.num_public_inputs {
			column
		} else {
			input_domain_size + column - self.num_public_inputs - 1
		}
	}

	/// Builds `z = (1, primary, auxiliary)`.
	pub fn assignment(&self, primary: &[F], auxiliary: &[F]) -> Result<Vec<F>, Error> {
		ensure!(
			primary.len() == self.num_public_inputs,
			Error::IncorrectWitnessLength {
				arg: "public inputs",
				expected: self.num_public_inputs,
				actual: primary.len(),
			}
		);
		ensure!(
			auxiliary.len() == self.num_auxiliary_inputs(),
			Error::IncorrectWitnessLength {
				arg: "auxiliary inputs",
				expected: self.num_auxiliary_inputs(),
				actual: auxiliary.len(),
			}
		);
		let mut z = Vec::with_capacity(self.num_variables + 1);
		z.push(F::ONE);
		z.extend_from_slice(primary);
		z.extend_from_slice(auxiliary);
		Ok(z)
	}

	/// Computes `Az`, `Bz` and `Cz`, one entry per constraint.
	pub fn matrix_vector_products(&self, z: &[F]) -> [Vec<F>; 3] {
		Matrix::ALL.map(|matrix| {
			self.constraints
				.iter()
				.map(|constraint| {
					constraint
						.row(matrix)
						.iter()
						.map(|&(column, coeff)| coeff * z[column])
						.sum::<F>()
				})
				.collect()
		})
	}

	/// Returns the first constraint that `(primary, auxiliary)` violates as an error.
	pub fn check_satisfied(&self, primary: &[F], auxiliary: &[F]) -> Result<(), Error> {
		let z = self.assignment(primary, auxiliary)?;
		let [az, bz, cz] = self.matrix_vector_products(&z);
		if let Some(constraint) = (0..self.num_constraints()).find(|&i| az[i] * bz[i] != cz[i]) {
			bail!(Error::UnsatisfiedConstraint { constraint });
		}
		Ok(())
	}

	pub fn is_satisfied(&self, primary: &[F], auxiliary: &[F]) -> bool {
		self.check_satisfied(primary, auxiliary).is_ok()
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use preon_field::BinaryField192b;

	use super::*;

	type F = BinaryField192b;

	fn f(value: u64) -> F {
		F::from_u64(value)
	}

	/// `x * y = out` with `out` public.
	fn product_system() -> ConstraintSystem<F> {
		let mut cs = ConstraintSystem::new(1, 3).unwrap();
		cs.add_constraint(vec![(2, F::ONE)], vec![(3, F::ONE)], vec![(1, F::ONE)])
			.unwrap();
		cs
	}

	#[test]
	fn test_satisfaction() {
		let cs = product_system();
		let (x, y) = (f(7), f(11));
		assert!(cs.is_satisfied(&[x * y], &[x, y]));
		assert_matches!(
			cs.check_satisfied(&[x * y + F::ONE], &[x, y]),
			Err(Error::UnsatisfiedConstraint { constraint: 0 })
		);
	}

	#[test]
	fn test_assignment_layout() {
		let cs = product_system();
		let z = cs.assignment(&[f(5)], &[f(6), f(7)]).unwrap();
		assert_eq!(z, vec![F::ONE, f(5), f(6), f(7)]);
		assert_matches!(
			cs.assignment(&[], &[f(6), f(7)]),
			Err(Error::IncorrectWitnessLength {
				arg: "public inputs",
				..
			})
		);
	}

	#[test]
	fn test_variable_domain_index() {
		let cs = product_system();
		assert_eq!(cs.variable_domain_index(0, 4), 0);
		assert_eq!(cs.variable_domain_index(1, 4), 1);
		assert_eq!(cs.variable_domain_index(2, 4), 4);
		assert_eq!(cs.variable_domain_index(3, 4), 5);
	}

	#[test]
	fn test_column_bounds() {
		let mut cs = product_system();
		assert_matches!(
			cs.add_constraint(vec![(4, F::ONE)], vec![], vec![]),
			Err(Error::ColumnOutOfRange {
				constraint: 1,
				column: 4,
				num_columns: 4
			})
		);
		assert_eq!(cs.num_constraints(), 1);
	}

	#[test]
	fn test_matrix_vector_products() {
		let mut cs = product_system();
		cs.add_constraint(vec![(0, f(3)), (2, F::ONE)], vec![(0, F::ONE)], vec![])
			.unwrap();
		let z = cs.assignment(&[f(1)], &[f(2), f(4)]).unwrap();
		let [az, bz, cz] = cs.matrix_vector_products(&z);
		assert_eq!(az, vec![f(2), f(3) + f(2)]);
		assert_eq!(bz, vec![f(4), F::ONE]);
		assert_eq!(cz, vec![f(1), F::ZERO]);
	}
}
