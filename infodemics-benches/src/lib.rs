//! Benchmark support crate for infodemics.
//!
//! Provides a synthetic scale-free network source and parameter types used by
//! the Criterion benchmarks for graph construction, super-spreader pruning and
//! SIR simulation.

pub mod error;
pub mod params;
pub mod source;
