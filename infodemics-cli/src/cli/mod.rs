//! Command-line interface orchestration for the infodemics model.
//!
//! `run` loads a network from CSV tables, optionally removes
//! super-spreaders and reports the outbreak; `stats` describes the network
//! without simulating.

mod commands;
mod report;

pub use commands::{
    Cli, CliError, Command, NetworkArgs, OutputFormat, RunCommand, StatsCommand, StrategyArg,
    run_cli,
};
pub use report::{
    CountsView, Execution, HistoryRow, InfluencerView, NetworkView, Parameters, PeakView, Report,
    RunReport, StatsReport, render,
};

#[cfg(test)]
mod test_helpers;
