//! Serialisable reports and their text rendering.

use std::io::Write;

use infodemics_core::{Node, PeakInfection, SirCounts};
use serde::Serialize;

use super::commands::{CliError, OutputFormat};

/// A finished command together with the format it should be written in.
#[derive(Debug, Clone)]
pub struct Execution {
    /// Requested output format.
    pub format: OutputFormat,
    /// Report produced by the command.
    pub report: Report,
}

/// Report produced by one of the CLI commands.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Report {
    /// Outcome of `run`.
    Run(RunReport),
    /// Outcome of `stats`.
    Stats(StatsReport),
}

/// The network as it entered the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkView {
    /// Name reported by the data source.
    pub data_source: String,
    /// Nodes left after pruning.
    pub nodes: usize,
    /// Distinct undirected edges left after pruning.
    pub edges: usize,
    /// Nodes removed as super-spreaders.
    pub removed_super_spreaders: usize,
    /// Degree above which nodes were removed, when pruning was requested.
    pub degree_threshold: Option<f64>,
}

/// Parameters the run actually used, after defaults were applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameters {
    /// Per-contact transmission probability.
    pub beta: f64,
    /// Per-step recovery probability.
    pub gamma: f64,
    /// Initial infection share in percent.
    pub initial_infected_pct: f64,
    /// Number of simulated steps.
    pub time_steps: usize,
    /// Seed of the run's generator.
    pub seed: u64,
    /// Execution strategy as configured.
    pub strategy: String,
}

/// S/I/R counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountsView {
    /// Susceptible nodes.
    pub susceptible: usize,
    /// Infected nodes.
    pub infected: usize,
    /// Recovered nodes.
    pub recovered: usize,
}

impl From<SirCounts> for CountsView {
    fn from(counts: SirCounts) -> Self {
        Self {
            susceptible: counts.susceptible,
            infected: counts.infected,
            recovered: counts.recovered,
        }
    }
}

/// Peak infection and the first step it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakView {
    /// Infected nodes at the peak.
    pub infected: usize,
    /// First step the peak was recorded at.
    pub time_step: usize,
}

impl From<PeakInfection> for PeakView {
    fn from(peak: PeakInfection) -> Self {
        Self {
            infected: peak.infected,
            time_step: peak.time_step,
        }
    }
}

/// One row of the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    /// Time step the snapshot was taken at.
    pub t: usize,
    /// Counts at the start of step `t`.
    #[serde(flatten)]
    pub counts: CountsView,
}

impl HistoryRow {
    pub(super) fn new(t: usize, counts: SirCounts) -> Self {
        Self {
            t,
            counts: counts.into(),
        }
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Network the run used.
    #[serde(flatten)]
    pub network: NetworkView,
    /// Effective parameters.
    pub parameters: Parameters,
    /// Counts at t=0, before any transition.
    pub initial_counts: CountsView,
    /// `None` when no step was recorded.
    pub peak: Option<PeakView>,
    /// Counts of the last recorded step; `None` when no step was recorded.
    pub final_counts: Option<CountsView>,
    /// Counts after the last step's transitions.
    pub final_states: CountsView,
    /// One row per recorded step.
    pub history: Vec<HistoryRow>,
}

/// A highly connected node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfluencerView {
    /// External identifier.
    pub id: String,
    /// Classified category.
    pub category: String,
    /// Raw label from the node table.
    pub label: String,
    /// Structural degree.
    pub degree: u64,
    /// Follower count.
    pub followers: u64,
}

impl From<&Node> for InfluencerView {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id().to_string(),
            category: node.category().to_string(),
            label: node.original_label().to_owned(),
            degree: node.degree(),
            followers: node.followers(),
        }
    }
}

/// Outcome of `stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    /// Network the statistics describe.
    #[serde(flatten)]
    pub network: NetworkView,
    /// Edge density.
    pub density: f64,
    /// Connected components.
    pub components: usize,
    /// Whether the network forms a single component.
    pub connected: bool,
    /// Nodes starting infected.
    pub conspiracy_nodes: usize,
    /// Nodes starting susceptible.
    pub non_conspiracy_nodes: usize,
    /// Mean adjacency degree.
    pub average_degree: f64,
    /// Largest adjacency degree.
    pub max_degree: usize,
    /// Highest structural degrees, descending.
    pub top_influencers: Vec<InfluencerView>,
}

/// Writes `execution` to `writer` in its requested format.
///
/// # Errors
/// Returns [`CliError::Io`] when writing fails and [`CliError::Json`] when
/// the report cannot be encoded.
pub fn render(execution: &Execution, mut writer: impl Write) -> Result<(), CliError> {
    match execution.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &execution.report)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => match &execution.report {
            Report::Run(report) => render_run(report, &mut writer)?,
            Report::Stats(report) => render_stats(report, &mut writer)?,
        },
    }
    Ok(())
}

fn render_counts(label: &str, counts: CountsView, writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        writer,
        "{label}: S={} I={} R={}",
        counts.susceptible, counts.infected, counts.recovered
    )
}

fn render_network(network: &NetworkView, writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "data source: {}", network.data_source)?;
    writeln!(writer, "nodes: {}", network.nodes)?;
    writeln!(writer, "edges: {}", network.edges)?;
    writeln!(
        writer,
        "removed super-spreaders: {}",
        network.removed_super_spreaders
    )?;
    if let Some(threshold) = network.degree_threshold {
        writeln!(writer, "degree threshold: {threshold}")?;
    }
    Ok(())
}

fn render_run(report: &RunReport, writer: &mut impl Write) -> std::io::Result<()> {
    render_network(&report.network, writer)?;
    let params = &report.parameters;
    writeln!(writer, "beta: {}", params.beta)?;
    writeln!(writer, "gamma: {}", params.gamma)?;
    writeln!(writer, "initial infected: {}%", params.initial_infected_pct)?;
    writeln!(writer, "time steps: {}", params.time_steps)?;
    writeln!(writer, "seed: {}", params.seed)?;
    writeln!(writer, "strategy: {}", params.strategy)?;
    render_counts("initial", report.initial_counts, writer)?;
    match report.peak {
        Some(peak) => writeln!(
            writer,
            "peak infected: {} at t={}",
            peak.infected, peak.time_step
        )?,
        None => writeln!(writer, "peak infected: n/a")?,
    }
    if let Some(counts) = report.final_counts {
        render_counts("final", counts, writer)?;
    }
    render_counts("after last step", report.final_states, writer)?;
    writeln!(writer)?;
    writeln!(writer, "t\tS\tI\tR")?;
    for row in &report.history {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            row.t, row.counts.susceptible, row.counts.infected, row.counts.recovered
        )?;
    }
    Ok(())
}

fn render_stats(report: &StatsReport, writer: &mut impl Write) -> std::io::Result<()> {
    render_network(&report.network, writer)?;
    writeln!(writer, "density: {:.4}", report.density)?;
    writeln!(writer, "components: {}", report.components)?;
    writeln!(writer, "connected: {}", report.connected)?;
    writeln!(writer, "conspiracy nodes: {}", report.conspiracy_nodes)?;
    writeln!(writer, "non-conspiracy nodes: {}", report.non_conspiracy_nodes)?;
    writeln!(writer, "average degree: {:.2}", report.average_degree)?;
    writeln!(writer, "max degree: {}", report.max_degree)?;
    writeln!(writer)?;
    writeln!(writer, "id\tcategory\tdegree\tfollowers")?;
    for node in &report.top_influencers {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            node.id, node.category, node.degree, node.followers
        )?;
    }
    Ok(())
}
