//! Read-only views over a completed simulation run.

use crate::state::{NodeStates, SirCounts};

/// Per-step S/I/R counts, indexed by time step `0..T`.
///
/// Entry `t` is the snapshot taken at the start of step `t`, before that
/// step's transitions are applied.
///
/// # Examples
/// ```
/// use infodemics_core::{SirCounts, SirHistory};
///
/// let history = SirHistory::from(vec![
///     SirCounts { susceptible: 3, infected: 1, recovered: 0 },
///     SirCounts { susceptible: 1, infected: 3, recovered: 0 },
///     SirCounts { susceptible: 0, infected: 3, recovered: 1 },
/// ]);
/// let peak = history.peak_infection().expect("history is not empty");
/// assert_eq!((peak.infected, peak.time_step), (3, 1));
/// assert_eq!(history.infected(), vec![1, 3, 3]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SirHistory {
    steps: Vec<SirCounts>,
}

impl From<Vec<SirCounts>> for SirHistory {
    fn from(steps: Vec<SirCounts>) -> Self {
        Self { steps }
    }
}

impl SirHistory {
    /// Returns the number of recorded steps.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` when no step was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the snapshot recorded at `time_step`.
    #[must_use]
    pub fn get(&self, time_step: usize) -> Option<SirCounts> {
        self.steps.get(time_step).copied()
    }

    /// Returns every snapshot in time order.
    #[must_use]
    pub fn as_slice(&self) -> &[SirCounts] {
        &self.steps
    }

    /// Iterates over the snapshots in time order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = SirCounts> + '_ {
        self.steps.iter().copied()
    }

    /// Susceptible series.
    #[must_use]
    pub fn susceptible(&self) -> Vec<usize> {
        self.iter().map(|counts| counts.susceptible).collect()
    }

    /// Infected series.
    #[must_use]
    pub fn infected(&self) -> Vec<usize> {
        self.iter().map(|counts| counts.infected).collect()
    }

    /// Recovered series.
    #[must_use]
    pub fn recovered(&self) -> Vec<usize> {
        self.iter().map(|counts| counts.recovered).collect()
    }

    /// Returns the last recorded snapshot.
    #[must_use]
    pub fn final_counts(&self) -> Option<SirCounts> {
        self.steps.last().copied()
    }

    /// Returns the largest infected count and the earliest step reaching it.
    #[must_use]
    pub fn peak_infection(&self) -> Option<PeakInfection> {
        self.iter()
            .enumerate()
            .fold(None, |best: Option<PeakInfection>, (time_step, counts)| match best {
                Some(peak) if peak.infected >= counts.infected => Some(peak),
                _ => Some(PeakInfection {
                    infected: counts.infected,
                    time_step,
                }),
            })
    }
}

impl<'a> IntoIterator for &'a SirHistory {
    type Item = &'a SirCounts;
    type IntoIter = std::slice::Iter<'a, SirCounts>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Highest infected count of a run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PeakInfection {
    /// Number of infected nodes at the peak.
    pub infected: usize,
    /// First time step at which the peak was recorded.
    pub time_step: usize,
}

/// Headline figures derived from a [`SirHistory`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SimulationSummary {
    /// Peak infection and when it first occurred.
    pub peak: PeakInfection,
    /// S/I/R counts of the last recorded step.
    pub final_counts: SirCounts,
    /// Number of recorded steps.
    pub time_steps: usize,
}

impl SimulationSummary {
    /// Summarises `history`, or returns `None` when it is empty.
    #[must_use]
    pub fn from_history(history: &SirHistory) -> Option<Self> {
        Some(Self {
            peak: history.peak_infection()?,
            final_counts: history.final_counts()?,
            time_steps: history.len(),
        })
    }
}

/// Everything a run produces, owned by the caller once it completes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimulationRun {
    initial_states: NodeStates,
    history: SirHistory,
    final_states: NodeStates,
}

impl SimulationRun {
    pub(crate) const fn new(
        initial_states: NodeStates,
        history: SirHistory,
        final_states: NodeStates,
    ) -> Self {
        Self {
            initial_states,
            history,
            final_states,
        }
    }

    /// Returns the states the run started from.
    #[must_use]
    pub const fn initial_states(&self) -> &NodeStates {
        &self.initial_states
    }

    /// Returns the per-step counts.
    #[must_use]
    pub const fn history(&self) -> &SirHistory {
        &self.history
    }

    /// Returns the states after the last step's transitions.
    ///
    /// These are one step ahead of the last history entry.
    #[must_use]
    pub const fn final_states(&self) -> &NodeStates {
        &self.final_states
    }

    /// Summarises the history; `None` for a zero-step run.
    #[must_use]
    pub fn summary(&self) -> Option<SimulationSummary> {
        SimulationSummary::from_history(&self.history)
    }

    /// Splits the run into its parts.
    #[must_use]
    pub fn into_parts(self) -> (NodeStates, SirHistory, NodeStates) {
        (self.initial_states, self.history, self.final_states)
    }
}
