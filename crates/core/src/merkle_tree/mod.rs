// Copyright 2024-2025 Irreducible Inc.

//! Zero-knowledge Merkle commitments to cosets of oracle evaluations.
//!
//! A leaf groups `coset_size` consecutive codeword positions of every committed oracle, so one
//! opened leaf answers a whole FRI coset at once. Each leaf is salted with fresh randomness that
//! is only revealed for opened leaves.

mod binary_merkle_tree;
mod errors;
mod membership_proof;
#[cfg(test)]
mod tests;

pub use binary_merkle_tree::*;
pub use errors::*;
pub use membership_proof::*;
