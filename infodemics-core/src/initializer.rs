//! Initial SIR state assignment.

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{
    Result,
    category::Category,
    error::validate_percentage,
    graph::GraphModel,
    state::{NodeStates, SirState},
};

/// Assigns every node of `graph` its starting state.
///
/// Conspiracy nodes always start [`SirState::Infected`]. When
/// `floor(n * initial_infected_pct / 100)` exceeds the number of conspiracy
/// nodes, the shortfall is drawn uniformly without replacement from the
/// non-conspiracy nodes; a shortfall larger than that population infects all
/// of it. Everything else starts [`SirState::Susceptible`]. `rng` is only
/// consulted when there is a shortfall to fill.
///
/// # Errors
/// Returns [`crate::SimulationError::InvalidPercentage`] when
/// `initial_infected_pct` is outside `[0, 100]` or not finite.
///
/// # Examples
/// ```
/// use infodemics_core::{GraphBuilder, NodeRecord, SirState, initialize_states};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let nodes = vec![
///     NodeRecord::new("a", "Conspiracy", 0),
///     NodeRecord::new("b", "Other", 0),
///     NodeRecord::new("c", "Other", 0),
///     NodeRecord::new("d", "Other", 0),
/// ];
/// let graph = GraphBuilder::new().build(&nodes, &[])?.into_graph();
/// let mut rng = SmallRng::seed_from_u64(7);
///
/// let states = initialize_states(&graph, 50.0, &mut rng)?;
/// assert_eq!(states.get(0), Some(SirState::Infected));
/// assert_eq!(states.counts().infected, 2);
/// # Ok::<(), infodemics_core::SimulationError>(())
/// ```
#[instrument(
    name = "core.initialize_states",
    err,
    skip(graph, rng),
    fields(nodes = graph.node_count()),
)]
pub fn initialize_states<R: Rng + ?Sized>(
    graph: &GraphModel,
    initial_infected_pct: f64,
    rng: &mut R,
) -> Result<NodeStates> {
    let pct = validate_percentage("initial_infected_pct", initial_infected_pct)?;

    let mut states = NodeStates::susceptible(graph.node_count());
    let mut candidates = Vec::new();
    for (index, (slot, node)) in states
        .as_mut_slice()
        .iter_mut()
        .zip(graph.nodes())
        .enumerate()
    {
        match node.category() {
            Category::Conspiracy => *slot = SirState::Infected,
            Category::NonConspiracy => candidates.push(index),
        }
    }
    let seeded = graph.node_count() - candidates.len();

    let shortfall = infection_target(graph.node_count(), pct).saturating_sub(seeded);
    if shortfall > 0 {
        let slots = states.as_mut_slice();
        for &index in candidates.choose_multiple(rng, shortfall) {
            if let Some(slot) = slots.get_mut(index) {
                *slot = SirState::Infected;
            }
        }
    }

    debug!(
        conspiracy = seeded,
        shortfall,
        infected = states.counts().infected,
        "initial states assigned"
    );
    Ok(states)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the target is the floor of a non-negative share of the node count"
)]
fn infection_target(node_count: usize, pct: f64) -> usize {
    (node_count as f64 * pct / 100.0).floor() as usize
}
