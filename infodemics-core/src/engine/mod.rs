//! Discrete-time stochastic SIR engine.
//!
//! Every step is synchronous: transitions are decided from the snapshot
//! taken at the start of the step and written into a second buffer, which
//! then replaces the first. No decision within a step observes another.

#[cfg(test)]
mod property;
#[cfg(feature = "parallel")]
mod rng;
mod telemetry;

use std::mem;

use rand::{Rng, distributions::Standard};
use tracing::{debug, info, instrument};

use crate::{
    Result,
    error::{SimulationError, validate_rate},
    graph::GraphModel,
    results::{SimulationRun, SirHistory},
    state::{NodeStates, SirCounts, SirState},
};

/// Number of steps between `info`-level progress events.
const PROGRESS_INTERVAL: usize = 10;

/// Selects how per-node transitions are evaluated within a step.
///
/// `Auto` resolves deterministically at build time: it uses the parallel
/// path when the `parallel` feature is compiled in and the sequential path
/// otherwise.
///
/// # Examples
/// ```
/// use infodemics_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert_eq!(strategy, ExecutionStrategy::Auto);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ExecutionStrategy {
    /// Let the crate choose the fastest available path.
    #[default]
    Auto,
    /// Evaluate nodes in index order, drawing from the caller's generator.
    Sequential,
    /// Evaluate nodes with rayon using per-node derived generators.
    Parallel,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Backend {
    Sequential,
    #[cfg(feature = "parallel")]
    Parallel,
}

impl ExecutionStrategy {
    fn resolve(self) -> Result<Backend> {
        match self {
            Self::Sequential => Ok(Backend::Sequential),
            #[cfg(feature = "parallel")]
            Self::Auto | Self::Parallel => Ok(Backend::Parallel),
            #[cfg(not(feature = "parallel"))]
            Self::Auto => Ok(Backend::Sequential),
            #[cfg(not(feature = "parallel"))]
            Self::Parallel => Err(SimulationError::BackendUnavailable {
                requested: Self::Parallel,
            }),
        }
    }
}

/// Validated transition rates and run length.
///
/// # Examples
/// ```
/// use infodemics_core::SirParams;
///
/// let params = SirParams::new(0.3, 0.1, 50)?;
/// assert_eq!(params.time_steps(), 50);
/// assert!(SirParams::new(1.5, 0.1, 50).is_err());
/// # Ok::<(), infodemics_core::SimulationError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SirParams {
    beta: f64,
    gamma: f64,
    time_steps: usize,
}

impl SirParams {
    /// Validates and bundles the run parameters.
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidRate`] when `beta` or `gamma` is
    /// outside `[0, 1]` or not finite.
    pub fn new(beta: f64, gamma: f64, time_steps: usize) -> Result<Self> {
        Ok(Self {
            beta: validate_rate("beta", beta)?,
            gamma: validate_rate("gamma", gamma)?,
            time_steps,
        })
    }

    /// Per-contact transmission probability.
    #[must_use]
    pub const fn beta(&self) -> f64 {
        self.beta
    }

    /// Per-step recovery probability.
    #[must_use]
    pub const fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Number of steps to run.
    #[must_use]
    pub const fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Probability that at least one of `infected_neighbors` independent
    /// contacts transmits: `1 - (1 - beta)^k`.
    ///
    /// # Examples
    /// ```
    /// use infodemics_core::SirParams;
    ///
    /// let params = SirParams::new(0.5, 0.0, 1)?;
    /// assert_eq!(params.infection_probability(0), 0.0);
    /// assert_eq!(params.infection_probability(2), 0.75);
    /// # Ok::<(), infodemics_core::SimulationError>(())
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "probability of at least one success over independent trials"
    )]
    pub fn infection_probability(&self, infected_neighbors: usize) -> f64 {
        let exponent = i32::try_from(infected_neighbors).unwrap_or(i32::MAX);
        1.0 - (1.0 - self.beta).powi(exponent)
    }
}

/// Counts of transitions committed during one step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct StepTally {
    infections: usize,
    recoveries: usize,
}

impl StepTally {
    const fn observe(from: SirState, to: SirState) -> Self {
        match (from, to) {
            (SirState::Susceptible, SirState::Infected) => Self {
                infections: 1,
                recoveries: 0,
            },
            (SirState::Infected, SirState::Recovered) => Self {
                infections: 0,
                recoveries: 1,
            },
            _ => Self {
                infections: 0,
                recoveries: 0,
            },
        }
    }

    const fn merge(self, other: Self) -> Self {
        Self {
            infections: self.infections + other.infections,
            recoveries: self.recoveries + other.recoveries,
        }
    }
}

/// Advances node states through a fixed number of steps.
///
/// # Examples
/// ```
/// use infodemics_core::{
///     EdgeRecord, ExecutionStrategy, GraphBuilder, NodeRecord, NodeStates, SirEngine, SirParams,
///     SirState,
/// };
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let nodes = vec![NodeRecord::new("a", "Other", 0), NodeRecord::new("b", "Other", 0)];
/// let edges = vec![EdgeRecord::new("a", "b")];
/// let graph = GraphBuilder::new().build(&nodes, &edges)?.into_graph();
/// let initial = NodeStates::new(vec![SirState::Infected, SirState::Susceptible]);
///
/// let engine = SirEngine::new(SirParams::new(1.0, 0.0, 2)?, ExecutionStrategy::Sequential);
/// let run = engine.run(&graph, initial, &mut SmallRng::seed_from_u64(1))?;
/// assert_eq!(run.history().len(), 2);
/// assert_eq!(run.final_states().counts().infected, 2);
/// # Ok::<(), infodemics_core::SimulationError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SirEngine {
    params: SirParams,
    strategy: ExecutionStrategy,
}

impl SirEngine {
    /// Creates an engine for already validated parameters.
    #[must_use]
    pub const fn new(params: SirParams, strategy: ExecutionStrategy) -> Self {
        Self { params, strategy }
    }

    /// Returns the run parameters.
    #[must_use]
    pub const fn params(&self) -> &SirParams {
        &self.params
    }

    /// Returns the configured execution strategy.
    #[must_use]
    pub const fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Runs the simulation from `initial`.
    ///
    /// The history holds one snapshot per step, taken before that step's
    /// transitions. The final states are the snapshot after the last step,
    /// so a zero-step run returns `initial` unchanged with an empty history.
    ///
    /// # Errors
    /// Returns [`SimulationError::StateCountMismatch`] when `initial` does
    /// not hold exactly one state per node, and
    /// [`SimulationError::BackendUnavailable`] when the parallel strategy is
    /// requested without the `parallel` feature. Both are raised before any
    /// state is touched.
    #[instrument(
        name = "core.simulate",
        err,
        skip(self, graph, initial, rng),
        fields(
            nodes = graph.node_count(),
            beta = self.params.beta,
            gamma = self.params.gamma,
            time_steps = self.params.time_steps,
            strategy = ?self.strategy,
        ),
    )]
    pub fn run<R: Rng + ?Sized>(
        &self,
        graph: &GraphModel,
        initial: NodeStates,
        rng: &mut R,
    ) -> Result<SimulationRun> {
        if initial.len() != graph.node_count() {
            return Err(SimulationError::StateCountMismatch {
                states: initial.len(),
                nodes: graph.node_count(),
            });
        }
        let backend = self.strategy.resolve()?;

        let mut current = initial.clone();
        let mut next = initial.clone();
        let mut history = Vec::with_capacity(self.params.time_steps);

        for step in 0..self.params.time_steps {
            let counts = current.counts();
            history.push(counts);

            let tally = match backend {
                Backend::Sequential => {
                    self.step_sequential(graph, current.as_slice(), next.as_mut_slice(), rng)
                }
                #[cfg(feature = "parallel")]
                Backend::Parallel => {
                    let step_seed: u64 = rng.sample(Standard);
                    self.step_parallel(graph, current.as_slice(), next.as_mut_slice(), step_seed)
                }
            };
            mem::swap(&mut current, &mut next);

            report_step(step, counts, tally);
        }

        Ok(SimulationRun::new(
            initial,
            SirHistory::from(history),
            current,
        ))
    }

    fn step_sequential<R: Rng + ?Sized>(
        &self,
        graph: &GraphModel,
        current: &[SirState],
        next: &mut [SirState],
        rng: &mut R,
    ) -> StepTally {
        next.iter_mut()
            .zip(current)
            .enumerate()
            .fold(StepTally::default(), |tally, (index, (slot, &state))| {
                *slot = self.transition(graph, current, index, state, rng);
                tally.merge(StepTally::observe(state, *slot))
            })
    }

    #[cfg(feature = "parallel")]
    fn step_parallel(
        &self,
        graph: &GraphModel,
        current: &[SirState],
        next: &mut [SirState],
        step_seed: u64,
    ) -> StepTally {
        use rayon::prelude::*;

        next.par_iter_mut()
            .zip(current.par_iter())
            .enumerate()
            .map(|(index, (slot, &state))| {
                let mut node_rng = rng::node_rng(step_seed, index);
                *slot = self.transition(graph, current, index, state, &mut node_rng);
                StepTally::observe(state, *slot)
            })
            .reduce(StepTally::default, StepTally::merge)
    }

    /// Decides the next state of one node from the current snapshot.
    fn transition<R: Rng + ?Sized>(
        &self,
        graph: &GraphModel,
        current: &[SirState],
        index: usize,
        state: SirState,
        rng: &mut R,
    ) -> SirState {
        match state {
            SirState::Susceptible => {
                let infected_neighbors = graph
                    .neighbors(index)
                    .iter()
                    .filter(|&&neighbor| current.get(neighbor) == Some(&SirState::Infected))
                    .count();
                if infected_neighbors == 0 {
                    return SirState::Susceptible;
                }
                let draw: f64 = rng.sample(Standard);
                if draw < self.params.infection_probability(infected_neighbors) {
                    SirState::Infected
                } else {
                    SirState::Susceptible
                }
            }
            SirState::Infected => {
                let draw: f64 = rng.sample(Standard);
                if draw < self.params.gamma {
                    SirState::Recovered
                } else {
                    SirState::Infected
                }
            }
            SirState::Recovered => SirState::Recovered,
        }
    }
}

fn report_step(step: usize, counts: SirCounts, tally: StepTally) {
    telemetry::record_step(counts, tally.infections, tally.recoveries);
    debug!(
        step,
        susceptible = counts.susceptible,
        infected = counts.infected,
        recovered = counts.recovered,
        infections = tally.infections,
        recoveries = tally.recoveries,
        "step completed"
    );
    if step.is_multiple_of(PROGRESS_INTERVAL) {
        info!(
            step,
            susceptible = counts.susceptible,
            infected = counts.infected,
            recovered = counts.recovered,
            "simulation progress"
        );
    }
}
