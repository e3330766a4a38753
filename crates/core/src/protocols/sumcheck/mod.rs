// Copyright 2024-2025 Irreducible Inc.

//! Univariate sumcheck over the summation domain `H`.
//!
//! A polynomial `f` of degree below `|H| + d` splits as `f = Z_H * h + g` with `deg g < |H|`, and
//! the sum of `f` over `H` only depends on the coefficient of `X^{|H| - 1}` in `g`. The prover
//! commits `h`; the verifier reads `g` off the virtual oracle [`SumcheckG`] and the low-degree
//! test enforces `deg g < |H| - 1`, which pins the sum to the claimed value.

mod oracle;
mod prove;

pub use oracle::*;
pub use prove::*;
