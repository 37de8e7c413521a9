//! Strategy builders for SIR property-based tests.
//!
//! Networks are generated from a proptest-chosen seed with [`SmallRng`] so
//! failing cases shrink on the seed and the scalar parameters rather than on
//! large edge lists.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::graph::{EdgeRecord, NodeRecord};

use super::types::{PruningFixture, SirFixture, Topology};

const MIN_NODES: usize = 1;
const MAX_NODES: usize = 48;
const MAX_STEPS: usize = 40;
const CONSPIRACY_SHARE: f64 = 0.15;

/// Generates SIR fixtures across every topology and the full parameter
/// range, boundary rates included.
pub(super) fn sir_fixture_strategy() -> impl Strategy<Value = SirFixture> {
    (
        any::<Topology>(),
        any::<u64>(),
        rate_strategy(),
        rate_strategy(),
        prop_oneof![Just(0.0), Just(100.0), 0.0..=100.0_f64],
        0..=MAX_STEPS,
    )
        .prop_map(|(topology, seed, beta, gamma, initial_infected_pct, time_steps)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let (nodes, edges) = generate_network(topology, &mut rng);
            SirFixture {
                nodes,
                edges,
                beta,
                gamma,
                initial_infected_pct,
                time_steps,
                seed,
                topology,
            }
        })
}

fn rate_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.0..=1.0_f64]
}

/// Generates a network of the requested shape.
pub(super) fn generate_network(
    topology: Topology,
    rng: &mut SmallRng,
) -> (Vec<NodeRecord>, Vec<EdgeRecord>) {
    let count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let nodes: Vec<NodeRecord> = (0..count)
        .map(|index| {
            let label = if rng.gen_bool(CONSPIRACY_SHARE) {
                "5G_Conspiracy_Graph"
            } else {
                "Non_Conspiracy_Graph"
            };
            NodeRecord::new(index as u64, label, rng.gen_range(0..10_000))
        })
        .collect();

    let mut pairs = match topology {
        Topology::Path => (1..count).map(|index| (index - 1, index)).collect(),
        Topology::Star => (1..count).map(|index| (0, index)).collect(),
        Topology::Random => random_pairs(0..count, rng.gen_range(0.05..0.4), rng),
        Topology::ScaleFree => preferential_attachment(count, rng),
        Topology::Disconnected => {
            let split = count / 2;
            let mut pairs = random_pairs(0..split, 0.3, rng);
            pairs.extend(random_pairs(split..count, 0.3, rng));
            pairs
        }
    };

    // Raw exports often list both directions and stray identifiers.
    if rng.gen_bool(0.3) {
        let reversed: Vec<(usize, usize)> = pairs.iter().map(|&(a, b)| (b, a)).collect();
        pairs.extend(reversed);
    }
    let mut edges: Vec<EdgeRecord> = pairs
        .into_iter()
        .map(|(a, b)| EdgeRecord::new(a as u64, b as u64))
        .collect();
    if rng.gen_bool(0.2) {
        edges.push(EdgeRecord::new(0_u64, "missing"));
    }
    (nodes, edges)
}

fn random_pairs(
    range: std::ops::Range<usize>,
    probability: f64,
    rng: &mut SmallRng,
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for a in range.clone() {
        for b in (a + 1)..range.end {
            if rng.gen_bool(probability) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

fn preferential_attachment(count: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut endpoints: Vec<usize> = Vec::new();
    for node in 1..count {
        let target = endpoints.choose(rng).copied().unwrap_or(0);
        pairs.push((node, target));
        endpoints.extend([node, target]);
    }
    pairs
}

/// Generates degree ladders for the pruning property.
pub(super) fn pruning_fixture_strategy() -> impl Strategy<Value = PruningFixture> {
    (4_usize..120, 0.5..=60.0_f64, any::<bool>(), any::<u64>()).prop_map(
        |(count, prune_top_percent, distinct_degrees, seed)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut degrees: Vec<usize> = if distinct_degrees {
                (0..count).collect()
            } else {
                (0..count).map(|_| rng.gen_range(0..=count / 3)).collect()
            };
            degrees.shuffle(&mut rng);

            let nodes = (0..count)
                .map(|index| NodeRecord::new(index as u64, "Other", 0))
                .collect();
            let edges = degrees
                .iter()
                .enumerate()
                .flat_map(|(index, &degree)| {
                    (0..degree).map(move |_| EdgeRecord::new(index as u64, "outside"))
                })
                .collect();
            PruningFixture {
                nodes,
                edges,
                prune_top_percent,
                distinct_degrees,
            }
        },
    )
}
