//! Support library for the infodemics CLI binary.
//!
//! Exposes the command pipeline and logging setup so tests can exercise
//! them without spawning a subprocess.

pub mod cli;
pub mod logging;
