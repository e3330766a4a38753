// Copyright 2024-2025 Irreducible Inc.

//! Affine subspaces of binary fields and the univariate polynomials that live on them.

mod affine_subspace;
mod error;
mod lagrange;
mod univariate;
mod vanishing;

pub use affine_subspace::*;
pub use error::*;
pub use lagrange::*;
pub use univariate::*;
pub use vanishing::*;
