// Copyright 2024-2025 Irreducible Inc.

//! Binary field arithmetic used by the Preon proof system.
//!
//! [`BinaryField64b`] is GF(2^64) in a polynomial basis. The larger fields are extensions of it,
//! chosen so that their byte size fits in the digest of the hash function paired with them.

mod binary_field;
mod error;
mod extension;
mod field;
pub mod util;

pub use binary_field::*;
pub use error::*;
pub use extension::*;
pub use field::*;
