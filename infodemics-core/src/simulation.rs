//! Orchestration of a complete simulation run.
//!
//! Provides the [`Simulation`] entry point, which seeds a generator,
//! initialises node states and drives the engine.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use crate::{
    Result,
    engine::{ExecutionStrategy, SirEngine, SirParams},
    graph::GraphModel,
    initializer::initialize_states,
    results::SimulationRun,
};

/// Entry point for running the SIR model over a built graph.
///
/// # Examples
/// ```
/// use infodemics_core::{EdgeRecord, GraphBuilder, NodeRecord, SimulationBuilder};
///
/// let nodes = vec![
///     NodeRecord::new("a", "Conspiracy", 0),
///     NodeRecord::new("b", "Other", 0),
///     NodeRecord::new("c", "Other", 0),
/// ];
/// let edges = vec![EdgeRecord::new("a", "b"), EdgeRecord::new("b", "c")];
/// let graph = GraphBuilder::new().build(&nodes, &edges)?.into_graph();
///
/// let simulation = SimulationBuilder::new().with_time_steps(5).build()?;
/// let run = simulation.run(&graph)?;
/// assert_eq!(run.history().len(), 5);
/// assert_eq!(run.initial_states().counts().infected, 1);
/// # Ok::<(), infodemics_core::SimulationError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    params: SirParams,
    initial_infected_pct: f64,
    rng_seed: u64,
    execution_strategy: ExecutionStrategy,
}

impl Simulation {
    pub(crate) const fn new(
        params: SirParams,
        initial_infected_pct: f64,
        rng_seed: u64,
        execution_strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            params,
            initial_infected_pct,
            rng_seed,
            execution_strategy,
        }
    }

    /// Returns the validated rates and step count.
    #[must_use]
    pub const fn params(&self) -> &SirParams {
        &self.params
    }

    /// Returns the initial infection share in percent.
    #[must_use]
    pub const fn initial_infected_pct(&self) -> f64 {
        self.initial_infected_pct
    }

    /// Returns the seed used by [`Self::run`].
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Returns the execution strategy that will be used when running.
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Runs the model from a generator seeded with [`Self::rng_seed`].
    ///
    /// Two calls on the same graph produce identical runs.
    ///
    /// # Errors
    /// Returns [`crate::SimulationError::BackendUnavailable`] when the
    /// configured strategy is not compiled into this build.
    pub fn run(&self, graph: &GraphModel) -> Result<SimulationRun> {
        let mut rng = SmallRng::seed_from_u64(self.rng_seed);
        self.run_with_rng(graph, &mut rng)
    }

    /// Runs the model drawing from a caller-supplied generator.
    ///
    /// Initial selection draws first; the engine continues from the same
    /// generator.
    ///
    /// # Errors
    /// See [`Self::run`].
    #[instrument(
        name = "core.run",
        err,
        skip(self, graph, rng),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            initial_infected_pct = self.initial_infected_pct,
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        graph: &GraphModel,
        rng: &mut R,
    ) -> Result<SimulationRun> {
        let initial = initialize_states(graph, self.initial_infected_pct, rng)?;
        let run = SirEngine::new(self.params, self.execution_strategy).run(graph, initial, rng)?;
        if let Some(summary) = run.summary() {
            info!(
                peak_infected = summary.peak.infected,
                peak_step = summary.peak.time_step,
                susceptible = summary.final_counts.susceptible,
                infected = summary.final_counts.infected,
                recovered = summary.final_counts.recovered,
                "simulation completed"
            );
        }
        Ok(run)
    }
}
