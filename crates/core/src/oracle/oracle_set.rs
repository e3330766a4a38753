// Copyright 2024-2025 Irreducible Inc.

use std::collections::HashMap;

use preon_field::BinaryField;
use preon_math::AffineSubspace;
use preon_utils::bail;
use tracing::instrument;

use super::{Error, OracleId, OracleKind, OracleVariant};

#[derive(Debug, Clone)]
pub struct Oracle<F: BinaryField> {
	id: OracleId,
	name: String,
	/// Exclusive upper bound on the degree of the polynomial behind the oracle.
	degree_bound: usize,
	constituents: Vec<OracleId>,
	content: Option<Vec<F>>,
	kind: OracleKind<F>,
}

impl<F: BinaryField> Oracle<F> {
	pub fn id(&self) -> OracleId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn degree_bound(&self) -> usize {
		self.degree_bound
	}

	pub fn constituents(&self) -> &[OracleId] {
		&self.constituents
	}

	/// Evaluations over the codeword domain, once known.
	pub fn content(&self) -> Option<&[F]> {
		self.content.as_deref()
	}

	pub fn kind(&self) -> &OracleKind<F> {
		&self.kind
	}
}

/// The oracles of one proof session.
///
/// Oracles are appended in topological order: a virtual oracle can only be built from oracles
/// that are already registered, so the set is a DAG by construction.
#[derive(Debug, Clone)]
pub struct OracleSet<F: BinaryField> {
	codeword_domain: AffineSubspace<F>,
	oracles: Vec<Oracle<F>>,
}

impl<F: BinaryField> OracleSet<F> {
	pub fn new(codeword_domain: AffineSubspace<F>) -> Self {
		Self {
			codeword_domain,
			oracles: Vec::new(),
		}
	}

	pub fn codeword_domain(&self) -> &AffineSubspace<F> {
		&self.codeword_domain
	}

	pub fn len(&self) -> usize {
		self.oracles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.oracles.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Oracle<F>> {
		self.oracles.iter()
	}

	pub fn get(&self, id: OracleId) -> Result<&Oracle<F>, Error> {
		self.oracles
			.get(id.index())
			.ok_or(Error::InvalidOracleId(id))
	}

	pub fn add_committed(&mut self, name: impl Into<String>, degree_bound: usize) -> OracleId {
		self.push(name.into(), degree_bound, Vec::new(), OracleKind::Committed)
	}

	pub fn add_virtual<T: OracleVariant<F>>(
		&mut self,
		name: impl Into<String>,
		degree_bound: usize,
		oracle: T,
		constituents: &[OracleId],
	) -> Result<OracleId, Error> {
		let name = name.into();
		if let Some(&constituent) = constituents.iter().find(|id| id.index() >= self.len()) {
			bail!(Error::UnregisteredConstituent { constituent });
		}
		if constituents.len() != oracle.arity() {
			bail!(Error::ArityMismatch {
				name,
				expected: oracle.arity(),
				actual: constituents.len(),
			});
		}
		Ok(self.push(name, degree_bound, constituents.to_vec(), oracle.into_kind()))
	}

	fn push(
		&mut self,
		name: String,
		degree_bound: usize,
		constituents: Vec<OracleId>,
		kind: OracleKind<F>,
	) -> OracleId {
		let id = OracleId::from_index(self.oracles.len());
		self.oracles.push(Oracle {
			id,
			name,
			degree_bound,
			constituents,
			content: None,
			kind,
		});
		id
	}

	/// The virtual oracle with id `id`, which must be of type `T`.
	pub fn virtual_oracle<T: OracleVariant<F>>(&self, id: OracleId) -> Result<&T, Error> {
		T::from_kind(&self.get(id)?.kind).ok_or(Error::WrongKind {
			id,
			expected: T::KIND,
		})
	}

	/// Mutable access to the auxiliary state of a virtual oracle, for its setters.
	pub fn virtual_oracle_mut<T: OracleVariant<F>>(&mut self, id: OracleId) -> Result<&mut T, Error> {
		let oracle = self
			.oracles
			.get_mut(id.index())
			.ok_or(Error::InvalidOracleId(id))?;
		T::from_kind_mut(&mut oracle.kind).ok_or(Error::WrongKind {
			id,
			expected: T::KIND,
		})
	}

	pub fn content(&self, id: OracleId) -> Result<&[F], Error> {
		self.get(id)?.content().ok_or(Error::MissingContent(id))
	}

	/// Sets the evaluations of a committed oracle over the codeword domain. Allowed once.
	pub fn set_content(&mut self, id: OracleId, values: Vec<F>) -> Result<(), Error> {
		let expected = self.codeword_domain.size();
		let oracle = self
			.oracles
			.get_mut(id.index())
			.ok_or(Error::InvalidOracleId(id))?;
		if !oracle.kind.is_committed() {
			bail!(Error::NotCommitted(id));
		}
		if oracle.content.is_some() {
			bail!(Error::ContentAlreadySet(id));
		}
		if values.len() != expected {
			bail!(Error::IncorrectContentLength {
				expected,
				actual: values.len(),
			});
		}
		oracle.content = Some(values);
		Ok(())
	}

	/// Computes the evaluations of a virtual oracle from its constituents. Allowed once.
	#[instrument("OracleSet::evaluate_content", skip(self), level = "debug")]
	pub fn evaluate_content(&mut self, id: OracleId) -> Result<&[F], Error> {
		if id.index() >= self.len() {
			bail!(Error::InvalidOracleId(id));
		}
		let (earlier, rest) = self.oracles.split_at_mut(id.index());
		let oracle = &mut rest[0];
		if oracle.content.is_some() {
			bail!(Error::ContentAlreadySet(id));
		}
		let virtual_oracle = oracle.kind.as_virtual().ok_or(Error::NotVirtual(id))?;
		let constituents = oracle
			.constituents
			.iter()
			.map(|&constituent| {
				earlier[constituent.index()]
					.content
					.as_deref()
					.ok_or(Error::MissingContent(constituent))
			})
			.collect::<Result<Vec<_>, _>>()?;

		let content = virtual_oracle.evaluate_content(&self.codeword_domain, &constituents)?;
		if content.len() != self.codeword_domain.size() {
			bail!(Error::IncorrectContentLength {
				expected: self.codeword_domain.size(),
				actual: content.len(),
			});
		}
		Ok(oracle.content.insert(content).as_slice())
	}

	/// Evaluates a virtual oracle at `point` from its constituents' values there.
	pub fn evaluate_at_point(
		&self,
		id: OracleId,
		point: F,
		constituent_values: &[F],
	) -> Result<F, Error> {
		let oracle = self.get(id)?;
		let virtual_oracle = oracle.kind.as_virtual().ok_or(Error::NotVirtual(id))?;
		if constituent_values.len() != virtual_oracle.arity() {
			bail!(Error::ArityMismatch {
				name: oracle.name.clone(),
				expected: virtual_oracle.arity(),
				actual: constituent_values.len(),
			});
		}
		virtual_oracle.evaluate_at_point(point, constituent_values)
	}

	/// Evaluates oracle `id` at codeword position `position`, given the values of the committed
	/// oracles it depends on at that position.
	pub fn evaluate_at_position(
		&self,
		id: OracleId,
		position: usize,
		committed_values: &HashMap<OracleId, F>,
	) -> Result<F, Error> {
		let point = self.codeword_domain.get_checked(position)?;
		let mut memo = HashMap::new();
		self.evaluate_recursive(id, point, committed_values, &mut memo)
	}

	fn evaluate_recursive(
		&self,
		id: OracleId,
		point: F,
		committed_values: &HashMap<OracleId, F>,
		memo: &mut HashMap<OracleId, F>,
	) -> Result<F, Error> {
		if let Some(&value) = memo.get(&id) {
			return Ok(value);
		}
		let oracle = self.get(id)?;
		let value = if oracle.kind.is_committed() {
			*committed_values
				.get(&id)
				.ok_or(Error::MissingLeafValue(id))?
		} else {
			let constituent_values = oracle
				.constituents
				.iter()
				.map(|&constituent| {
					self.evaluate_recursive(constituent, point, committed_values, memo)
				})
				.collect::<Result<Vec<_>, _>>()?;
			self.evaluate_at_point(id, point, &constituent_values)?
		};
		memo.insert(id, value);
		Ok(value)
	}
}
