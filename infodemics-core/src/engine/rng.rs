//! Per-node random streams for the parallel step.
//!
//! Each step draws one seed from the caller's generator; every node then
//! derives its own stream from that seed and its index, so the outcome does
//! not depend on how rayon splits the work.

use rand::{SeedableRng, rngs::SmallRng};

/// SplitMix64 increment (the 64-bit golden ratio).
const NODE_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
pub(super) const fn mix_node_seed(step_seed: u64, node_index: usize) -> u64 {
    let salt = (node_index as u64).wrapping_add(1);
    splitmix64(step_seed ^ salt.wrapping_mul(NODE_SEED_SPACING))
}

#[inline]
const fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(NODE_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

pub(super) fn node_rng(step_seed: u64, node_index: usize) -> SmallRng {
    SmallRng::seed_from_u64(mix_node_seed(step_seed, node_index))
}
