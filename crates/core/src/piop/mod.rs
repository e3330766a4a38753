// Copyright 2024-2025 Irreducible Inc.

//! The compilation of the Preon polynomial IOP into a non-interactive argument.
//!
//! The prover commits to the witness oracles, runs the R1CS-to-sumcheck reduction over the oracle
//! DAG and proves that a random combination of every oracle has low degree with FRI. Merkle trees
//! stand in for oracle access and a Fiat-Shamir transcript supplies the verifier's challenges.
//!
//! | Tree  | Contents                                          |
//! |-------|---------------------------------------------------|
//! | 0     | `fw, fAz, fBz, fCz`, masking and blinding oracles |
//! | 1     | the sumcheck quotient `h`                         |
//! | t ≥ 2 | the codeword folded in FRI round `t - 2`          |
//!
//! The verifier never sees the combined low-degree-test oracle. It recomputes its values on each
//! queried coset from the opened leaves of trees 0 and 1.

mod logging;
mod oracles;
mod proof;
mod prove;
mod verify;

pub use oracles::*;
pub use proof::*;
pub use prove::*;
pub use verify::{verify, verify_detailed};
