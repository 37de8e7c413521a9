//! Infodemics core library.
//!
//! Models how a labelled claim spreads through an interaction network with
//! a discrete-time stochastic SIR process. Records are built into a
//! [`GraphModel`] (optionally with super-spreaders pruned), nodes receive
//! initial states from their [`Category`], and the [`SirEngine`] advances
//! them synchronously while recording per-step counts.
//!
//! With the `metrics` feature the engine publishes the counters
//! `infodemics_steps_total`, `infodemics_infections_total` and
//! `infodemics_recoveries_total`, and the gauges `infodemics_susceptible`,
//! `infodemics_infected` and `infodemics_recovered`.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod category;
mod engine;
mod error;
mod graph;
mod initializer;
mod results;
mod simulation;
mod source;
mod state;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{DEFAULT_SEED, SimulationBuilder},
    category::Category,
    engine::{ExecutionStrategy, SirEngine, SirParams},
    error::{Result, SimulationError, SimulationErrorCode},
    graph::{
        BuildOutcome, EdgeRecord, GraphBuilder, GraphModel, NetworkStatistics, Node, NodeId,
        NodeRecord, top_influencers,
    },
    initializer::initialize_states,
    results::{PeakInfection, SimulationRun, SimulationSummary, SirHistory},
    simulation::Simulation,
    source::NetworkSource,
    state::{NodeStates, SirCounts, SirState},
};
