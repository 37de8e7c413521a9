//! Type definitions for SIR property-based tests.

use test_strategy::Arbitrary;

use crate::graph::{EdgeRecord, NodeRecord};

/// Shape of the generated interaction network.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum Topology {
    /// Nodes joined in a single chain.
    #[weight(1)]
    Path,
    /// One hub linked to every other node.
    #[weight(1)]
    Star,
    /// Each pair linked independently with a fixed probability.
    #[weight(3)]
    Random,
    /// Preferential attachment, giving a heavy-tailed degree distribution.
    #[weight(3)]
    ScaleFree,
    /// Several random components with no edges between them.
    #[weight(2)]
    Disconnected,
}

/// Generated network and run parameters for one property case.
///
/// Edge lists may name identifiers outside the node set and may repeat
/// pairs in either direction, as raw exports do.
#[derive(Clone, Debug)]
pub(super) struct SirFixture {
    /// Node records in input order.
    pub nodes: Vec<NodeRecord>,
    /// Edge records in input order.
    pub edges: Vec<EdgeRecord>,
    /// Transmission probability.
    pub beta: f64,
    /// Recovery probability.
    pub gamma: f64,
    /// Requested initial infection share.
    pub initial_infected_pct: f64,
    /// Steps to simulate.
    pub time_steps: usize,
    /// Seed for initial selection and per-step draws.
    pub seed: u64,
    /// Topology used during generation.
    pub topology: Topology,
}

/// Degree ladder used by the pruning property.
#[derive(Clone, Debug)]
pub(super) struct PruningFixture {
    /// Node records in input order.
    pub nodes: Vec<NodeRecord>,
    /// Edge records producing the requested degrees.
    pub edges: Vec<EdgeRecord>,
    /// Percentage of top-degree nodes to remove.
    pub prune_top_percent: f64,
    /// Whether every node received a distinct degree.
    pub distinct_degrees: bool,
}
