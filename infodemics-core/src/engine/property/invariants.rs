//! SIR run invariants checked for every execution strategy.
//!
//! - **Conservation**: each snapshot accounts for every node.
//! - **Monotone transitions**: stepping one step at a time reproduces the
//!   full run, and no node ever moves backwards.
//! - **Determinism**: the same seed yields the same run.
//! - **Disabled transitions**: `beta = 0` freezes the susceptible count and
//!   `gamma = 0` never produces a recovered node.

use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    ExecutionStrategy, GraphBuilder, GraphModel, NodeStates, SimulationRun, SirEngine, SirParams,
    initialize_states,
};

use super::types::SirFixture;

/// Strategies compiled into this build.
pub(super) fn available_strategies() -> Vec<ExecutionStrategy> {
    vec![
        ExecutionStrategy::Sequential,
        #[cfg(feature = "parallel")]
        ExecutionStrategy::Parallel,
    ]
}

/// Runs every invariant for `fixture` under each available strategy.
pub(super) fn run_sir_invariants_property(fixture: &SirFixture) -> TestCaseResult {
    let graph = GraphBuilder::new()
        .build(&fixture.nodes, &fixture.edges)
        .map_err(|err| TestCaseError::fail(format!("graph build failed: {err}")))?
        .into_graph();

    for strategy in available_strategies() {
        let context = format!(
            "strategy={strategy:?}, topology={:?}, nodes={}, beta={}, gamma={}, seed={}",
            fixture.topology,
            graph.node_count(),
            fixture.beta,
            fixture.gamma,
            fixture.seed,
        );
        let (initial, run) = simulate(&graph, fixture, strategy)?;

        validate_history_shape(&graph, fixture, &run, &context)?;
        validate_stepwise_monotone(&graph, fixture, strategy, &initial, &run, &context)?;
        validate_determinism(&graph, fixture, strategy, &run, &context)?;
        validate_disabled_transitions(fixture, &initial, &run, &context)?;
    }
    Ok(())
}

fn engine(
    fixture: &SirFixture,
    time_steps: usize,
    strategy: ExecutionStrategy,
) -> Result<SirEngine, TestCaseError> {
    let params = SirParams::new(fixture.beta, fixture.gamma, time_steps)
        .map_err(|err| TestCaseError::fail(format!("invalid params: {err}")))?;
    Ok(SirEngine::new(params, strategy))
}

fn simulate(
    graph: &GraphModel,
    fixture: &SirFixture,
    strategy: ExecutionStrategy,
) -> Result<(NodeStates, SimulationRun), TestCaseError> {
    let mut rng = SmallRng::seed_from_u64(fixture.seed);
    let initial = initialize_states(graph, fixture.initial_infected_pct, &mut rng)
        .map_err(|err| TestCaseError::fail(format!("initialisation failed: {err}")))?;
    let run = engine(fixture, fixture.time_steps, strategy)?
        .run(graph, initial.clone(), &mut rng)
        .map_err(|err| TestCaseError::fail(format!("run failed: {err}")))?;
    Ok((initial, run))
}

fn validate_history_shape(
    graph: &GraphModel,
    fixture: &SirFixture,
    run: &SimulationRun,
    context: &str,
) -> TestCaseResult {
    let history = run.history();
    if history.len() != fixture.time_steps {
        return Err(TestCaseError::fail(format!(
            "history has {} entries, expected {} ({context})",
            history.len(),
            fixture.time_steps,
        )));
    }
    for (step, counts) in history.iter().enumerate() {
        if counts.total() != graph.node_count() {
            return Err(TestCaseError::fail(format!(
                "step {step} counts {counts:?} do not sum to {} ({context})",
                graph.node_count(),
            )));
        }
    }
    for (step, pair) in history.as_slice().windows(2).enumerate() {
        let [before, after] = pair else { continue };
        if after.susceptible > before.susceptible || after.recovered < before.recovered {
            return Err(TestCaseError::fail(format!(
                "counts moved backwards between steps {step} and {}: {before:?} -> {after:?} ({context})",
                step + 1,
            )));
        }
    }
    Ok(())
}

/// Replays the run one step at a time from the same generator and checks
/// every per-node transition along the way.
fn validate_stepwise_monotone(
    graph: &GraphModel,
    fixture: &SirFixture,
    strategy: ExecutionStrategy,
    initial: &NodeStates,
    run: &SimulationRun,
    context: &str,
) -> TestCaseResult {
    let mut rng = SmallRng::seed_from_u64(fixture.seed);
    // Consume the same draws initialisation made.
    initialize_states(graph, fixture.initial_infected_pct, &mut rng)
        .map_err(|err| TestCaseError::fail(format!("initialisation failed: {err}")))?;

    let single = engine(fixture, 1, strategy)?;
    let mut current = initial.clone();
    for step in 0..fixture.time_steps {
        let next = single
            .run(graph, current.clone(), &mut rng)
            .map_err(|err| TestCaseError::fail(format!("step {step} failed: {err}")))?
            .final_states()
            .clone();
        for (index, (before, after)) in current.as_slice().iter().zip(next.as_slice()).enumerate()
        {
            if !before.permits(*after) {
                return Err(TestCaseError::fail(format!(
                    "node {index} moved {before} -> {after} at step {step} ({context})"
                )));
            }
        }
        current = next;
    }

    if &current != run.final_states() {
        return Err(TestCaseError::fail(format!(
            "stepwise replay diverged from the full run ({context})"
        )));
    }
    Ok(())
}

fn validate_determinism(
    graph: &GraphModel,
    fixture: &SirFixture,
    strategy: ExecutionStrategy,
    run: &SimulationRun,
    context: &str,
) -> TestCaseResult {
    let (_, again) = simulate(graph, fixture, strategy)?;
    if &again != run {
        return Err(TestCaseError::fail(format!(
            "identical seed produced a different run ({context})"
        )));
    }
    Ok(())
}

fn validate_disabled_transitions(
    fixture: &SirFixture,
    initial: &NodeStates,
    run: &SimulationRun,
    context: &str,
) -> TestCaseResult {
    let start = initial.counts();
    let end = run.final_states().counts();
    if fixture.beta == 0.0 {
        let frozen = run
            .history()
            .iter()
            .all(|counts| counts.susceptible == start.susceptible);
        if !frozen || end.susceptible != start.susceptible {
            return Err(TestCaseError::fail(format!(
                "beta = 0 changed the susceptible count ({context})"
            )));
        }
    }
    if fixture.gamma == 0.0 {
        let none_recovered = run.history().iter().all(|counts| counts.recovered == 0);
        if !none_recovered || end.recovered != 0 {
            return Err(TestCaseError::fail(format!(
                "gamma = 0 produced recovered nodes ({context})"
            )));
        }
    }
    Ok(())
}
