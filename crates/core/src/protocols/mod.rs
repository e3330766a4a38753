// Copyright 2024-2025 Irreducible Inc.

//! The sub-protocols that the Preon IOP is assembled from.
//!
//! Each protocol contributes virtual oracles to the session's [`OracleSet`] together with the
//! prover-side routines computing the committed polynomials it needs. The protocols are
//! public-coin and made non-interactive by the Fiat-Shamir transformation, so the prover
//! simulates the verifier to derive every challenge from the transcript.
//!
//! * [`r1cs_iop`] reduces R1CS satisfiability to a rowcheck and a multi-matrix lincheck [BCRSVW19].
//! * [`sumcheck`] proves that the lincheck polynomial sums to zero over the summation domain.
//! * [`ldt`] batches every oracle into a single codeword for the low-degree test.
//! * [`fri`] tests that codeword for proximity to a Reed-Solomon code.
//!
//! [`OracleSet`]: crate::oracle::OracleSet
//! [BCRSVW19]: <https://eprint.iacr.org/2018/828>

pub mod fri;
pub mod ldt;
pub mod r1cs_iop;
pub mod sumcheck;
