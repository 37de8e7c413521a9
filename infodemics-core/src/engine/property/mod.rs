//! Property-based tests for the SIR engine and super-spreader pruning.
//!
//! Checks conservation, monotone transitions, determinism and the
//! disabled-rate edge cases over generated networks, the pruning bounds
//! over degree ladders, and a Monte-Carlo comparison showing that a higher
//! transmission rate never lowers the mean infected count.

mod invariants;
mod pruning;
mod strategies;
mod types;
