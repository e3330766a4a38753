// Copyright 2024-2025 Irreducible Inc.

//! The Preon polynomial IOP: zero-knowledge arguments for rank-1 constraint systems over binary
//! fields, built from an oracle DAG, a univariate sumcheck and FRI.
//!
//! [`prove`] and [`verify`] are the entry points. Parameters come either from a preset
//! implementing [`PreonVariant`] or from a custom [`ParameterSet`].

pub mod error;
pub mod merkle_tree;
pub mod oracle;
pub mod params;
pub mod piop;
pub mod protocols;
pub mod r1cs;
#[cfg(test)]
mod test_utils;
pub mod transcript;

pub use error::{Error, VerificationError};
pub use params::{ParameterSet, Preon128, Preon192, Preon256, PreonParams, PreonVariant};
pub use piop::{prove, verify, verify_detailed, Proof};
pub use r1cs::ConstraintSystem;
