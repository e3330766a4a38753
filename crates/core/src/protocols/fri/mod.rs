// Copyright 2024-2025 Irreducible Inc.

//! FRI over affine subspaces with localization.
//!
//! Round `i` splits its domain `D_i` into cosets of the localizer subspace spanned by the first
//! `loc[i]` basis elements, and folds each coset to one value by interpolating the codeword on
//! the coset at the round challenge. The localizer polynomial `q_i` maps each coset to a single
//! point of `D_{i+1}`, so the folded codeword lives on the image domain. After the last round
//! the prover sends the interpolant of the remaining codeword in the clear.
//!
//! Prover and verifier fold through the same [`FoldingDomain::fold_coset`] routine.

mod common;
mod error;
mod prove;
#[cfg(test)]
mod tests;
mod verify;

pub use common::*;
pub use error::*;
pub use prove::*;
pub use verify::*;
