// Copyright 2024-2025 Irreducible Inc.

//! The additive FFT over affine subspaces of binary fields.
//!
//! Coefficients are in the monomial basis and evaluations are in subspace order, so the
//! transforms compose directly with the dense polynomial helpers of `preon_math`. The algorithm
//! is the recursive one of [GM10], with the per-level data precomputed once per domain.
//!
//! [GM10]: <https://doi.org/10.1145/1837934.1837965>

mod additive_ntt;
mod error;
mod gao_mateer;
#[cfg(test)]
mod reference;
pub mod twiddle;

pub use additive_ntt::{fft, ifft, AdditiveNTT};
pub use error::Error;
pub use gao_mateer::GaoMateerNTT;
