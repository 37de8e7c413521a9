//! Per-node SIR states and aggregate counts.

use std::fmt;

use crate::graph::{GraphModel, NodeId};

/// Compartment a node occupies at one time step.
///
/// Transitions only move forward: `Susceptible → Infected → Recovered`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SirState {
    /// Has not yet adopted the claim.
    #[default]
    Susceptible,
    /// Currently spreads the claim to neighbours.
    Infected,
    /// Stopped spreading, e.g. after a fact-check; never reinfected.
    Recovered,
}

impl SirState {
    /// Returns the single-letter symbol used in tabular output.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Susceptible => 'S',
            Self::Infected => 'I',
            Self::Recovered => 'R',
        }
    }

    /// Returns `true` when a node may move from `self` to `next` within one
    /// step.
    ///
    /// # Examples
    /// ```
    /// use infodemics_core::SirState;
    ///
    /// assert!(SirState::Susceptible.permits(SirState::Infected));
    /// assert!(SirState::Infected.permits(SirState::Infected));
    /// assert!(!SirState::Recovered.permits(SirState::Infected));
    /// assert!(!SirState::Susceptible.permits(SirState::Recovered));
    /// ```
    #[must_use]
    pub const fn permits(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Susceptible, Self::Susceptible | Self::Infected)
                | (Self::Infected, Self::Infected | Self::Recovered)
                | (Self::Recovered, Self::Recovered)
        )
    }
}

impl fmt::Display for SirState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Susceptible => "Susceptible",
            Self::Infected => "Infected",
            Self::Recovered => "Recovered",
        })
    }
}

/// Number of nodes in each compartment at one time step.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SirCounts {
    /// Nodes in [`SirState::Susceptible`].
    pub susceptible: usize,
    /// Nodes in [`SirState::Infected`].
    pub infected: usize,
    /// Nodes in [`SirState::Recovered`].
    pub recovered: usize,
}

impl SirCounts {
    /// Tallies a slice of states.
    #[must_use]
    pub fn from_states(states: &[SirState]) -> Self {
        states.iter().fold(Self::default(), |mut counts, state| {
            match state {
                SirState::Susceptible => counts.susceptible += 1,
                SirState::Infected => counts.infected += 1,
                SirState::Recovered => counts.recovered += 1,
            }
            counts
        })
    }

    /// Returns the total number of nodes counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered
    }
}

/// State assignment for every node of a graph, indexed like
/// [`GraphModel::nodes`].
///
/// # Examples
/// ```
/// use infodemics_core::{NodeStates, SirState};
///
/// let states = NodeStates::new(vec![SirState::Infected, SirState::Susceptible]);
/// assert_eq!(states.len(), 2);
/// assert_eq!(states.get(0), Some(SirState::Infected));
/// assert_eq!(states.counts().infected, 1);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NodeStates {
    states: Vec<SirState>,
}

impl NodeStates {
    /// Wraps an explicit state vector.
    #[must_use]
    pub const fn new(states: Vec<SirState>) -> Self {
        Self { states }
    }

    /// Creates an all-susceptible assignment for `len` nodes.
    #[must_use]
    pub fn susceptible(len: usize) -> Self {
        Self::new(vec![SirState::Susceptible; len])
    }

    /// Returns the number of nodes covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` when no node is covered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the state of the node at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<SirState> {
        self.states.get(index).copied()
    }

    /// Returns the states as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SirState] {
        &self.states
    }

    /// Tallies the assignment.
    #[must_use]
    pub fn counts(&self) -> SirCounts {
        SirCounts::from_states(&self.states)
    }

    /// Looks up the state of a node by external identifier.
    #[must_use]
    pub fn state_of(&self, graph: &GraphModel, id: &str) -> Option<SirState> {
        graph.index_of(id).and_then(|index| self.get(index))
    }

    /// Pairs each state with the identifier of its node.
    pub fn iter_with_ids<'a>(
        &'a self,
        graph: &'a GraphModel,
    ) -> impl Iterator<Item = (&'a NodeId, SirState)> + 'a {
        graph
            .nodes()
            .iter()
            .zip(self.states.iter().copied())
            .map(|(node, state)| (node.id(), state))
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [SirState] {
        &mut self.states
    }
}
