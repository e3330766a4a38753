// Copyright 2024-2025 Irreducible Inc.

pub mod hasher;
pub mod sha3;

pub use hasher::*;
pub use sha3::*;
