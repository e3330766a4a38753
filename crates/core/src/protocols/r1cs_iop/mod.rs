// Copyright 2024-2025 Irreducible Inc.

//! Reduction of R1CS satisfiability to checks on low-degree oracles.
//!
//! The prover commits to `fw`, the masked low-degree extension of the auxiliary inputs, and to
//! `fAz`, `fBz` and `fCz`, the masked extensions of the matrix-vector products. Three virtual
//! oracles tie them to the instance:
//!
//! * [`Fz`] rebuilds the extension of the whole variable vector from `fw` and the public inputs;
//! * [`Rowcheck`] is a polynomial only if `fAz * fBz = fCz` on the constraint domain;
//! * [`MultiLincheck`] sums to zero over the summation domain only if each `fMz` is consistent
//!   with `M` applied to `fz`.

mod fz;
mod lincheck;
mod rowcheck;
mod witness;

pub use fz::*;
pub use lincheck::*;
pub use rowcheck::*;
pub use witness::*;
