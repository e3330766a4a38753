// Copyright 2024-2025 Irreducible Inc.

//! Batching of oracles with different degree bounds into one codeword for FRI.

mod blinding;
mod combination;

pub use blinding::*;
pub use combination::*;
