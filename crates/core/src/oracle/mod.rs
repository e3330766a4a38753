// Copyright 2024-2025 Irreducible Inc.

//! Univariate polynomial oracles over the codeword domain.
//!
//! An oracle is either committed, in which case the prover supplies its evaluations, or virtual,
//! in which case its evaluations are a pointwise function of its constituents' evaluations and
//! some auxiliary state fixed by the protocol. The oracles of one proof form a DAG stored in an
//! [`OracleSet`].

mod error;
mod kind;
mod oracle_id;
mod oracle_set;

pub use error::Error;
pub use kind::*;
pub use oracle_id::OracleId;
pub use oracle_set::*;
