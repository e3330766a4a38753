// Copyright 2024-2025 Irreducible Inc.

use preon_field::BinaryField;
use preon_math::AffineSubspace;

use super::Error;
use crate::protocols::{
	ldt::{CombinedLdt, LinearCombination},
	r1cs_iop::{Fz, MultiLincheck, Rowcheck},
	sumcheck::SumcheckG,
};

/// An oracle whose evaluations are a pointwise function of its constituents' evaluations.
///
/// The function may depend on the evaluation point and on auxiliary state that the protocol
/// fixes through setters before the oracle is evaluated.
pub trait VirtualOracle<F: BinaryField> {
	/// Number of constituents.
	fn arity(&self) -> usize;

	/// Evaluates the oracle over the whole codeword domain, given each constituent's evaluations
	/// over the same domain.
	fn evaluate_content(
		&self,
		codeword_domain: &AffineSubspace<F>,
		constituents: &[&[F]],
	) -> Result<Vec<F>, Error>;

	/// Evaluates the oracle at a single point, given each constituent's value there.
	fn evaluate_at_point(&self, point: F, constituents: &[F]) -> Result<F, Error>;
}

/// The closed set of oracle types, dispatched by `match`.
#[derive(Debug, Clone)]
pub enum OracleKind<F: BinaryField> {
	Committed,
	Fz(Fz<F>),
	Rowcheck(Rowcheck<F>),
	MultiLincheck(MultiLincheck<F>),
	CombinedF(LinearCombination<F>),
	SumcheckG(SumcheckG<F>),
	CombinedLdt(CombinedLdt<F>),
}

impl<F: BinaryField> OracleKind<F> {
	pub fn as_virtual(&self) -> Option<&dyn VirtualOracle<F>> {
		match self {
			Self::Committed => None,
			Self::Fz(oracle) => Some(oracle),
			Self::Rowcheck(oracle) => Some(oracle),
			Self::MultiLincheck(oracle) => Some(oracle),
			Self::CombinedF(oracle) => Some(oracle),
			Self::SumcheckG(oracle) => Some(oracle),
			Self::CombinedLdt(oracle) => Some(oracle),
		}
	}

	pub fn is_committed(&self) -> bool {
		matches!(self, Self::Committed)
	}
}

/// A virtual oracle type with its own [`OracleKind`] variant.
pub trait OracleVariant<F: BinaryField>: VirtualOracle<F> + Sized {
	const KIND: &'static str;

	fn into_kind(self) -> OracleKind<F>;

	fn from_kind(kind: &OracleKind<F>) -> Option<&Self>;

	fn from_kind_mut(kind: &mut OracleKind<F>) -> Option<&mut Self>;
}

macro_rules! impl_oracle_variant {
	($ty:ident, $variant:ident) => {
		impl<F: BinaryField> OracleVariant<F> for $ty<F> {
			const KIND: &'static str = stringify!($variant);

			fn into_kind(self) -> OracleKind<F> {
				OracleKind::$variant(self)
			}

			fn from_kind(kind: &OracleKind<F>) -> Option<&Self> {
				match kind {
					OracleKind::$variant(oracle) => Some(oracle),
					_ => None,
				}
			}

			fn from_kind_mut(kind: &mut OracleKind<F>) -> Option<&mut Self> {
				match kind {
					OracleKind::$variant(oracle) => Some(oracle),
					_ => None,
				}
			}
		}
	};
}

impl_oracle_variant!(Fz, Fz);
impl_oracle_variant!(Rowcheck, Rowcheck);
impl_oracle_variant!(MultiLincheck, MultiLincheck);
impl_oracle_variant!(LinearCombination, CombinedF);
impl_oracle_variant!(SumcheckG, SumcheckG);
impl_oracle_variant!(CombinedLdt, CombinedLdt);
