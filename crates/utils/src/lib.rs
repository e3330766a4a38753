// Copyright 2024-2025 Irreducible Inc.

pub mod checked_arithmetics;
pub mod error_utils;
pub mod rayon;
pub mod serialization;
pub mod tracing;

pub use bytes;
pub use generic_array;
pub use serialization::{DeserializeBytes, SerializeBytes};
