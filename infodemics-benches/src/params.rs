//! Benchmark parameter types.
//!
//! Each type renders as a compact Criterion parameter label.

use std::fmt;

use infodemics_core::ExecutionStrategy;

/// Parameters for a simulation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct SimulationBenchParams {
    /// Number of nodes in the synthetic network.
    pub node_count: usize,
    /// Backend the run is pinned to.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for SimulationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},strategy={:?}", self.node_count, self.strategy)
    }
}

/// Parameters for a graph construction benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct PruningBenchParams {
    /// Number of nodes in the synthetic network.
    pub node_count: usize,
    /// Share of top-degree nodes removed, if any.
    pub prune_top_percent: Option<f64>,
}

impl fmt::Display for PruningBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prune_top_percent {
            Some(percent) => write!(f, "n={},prune={percent}%", self.node_count),
            None => write!(f, "n={},prune=none", self.node_count),
        }
    }
}
