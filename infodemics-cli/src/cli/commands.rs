//! Command implementations and argument parsing for the infodemics CLI.

use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use infodemics_core::{
    BuildOutcome, Category, ExecutionStrategy, GraphBuilder, NetworkSource, NetworkStatistics,
    NodeRecord, SimulationBuilder, SimulationError, top_influencers,
};
use infodemics_providers_csv::{CsvNetworkProvider, CsvProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::logging::LogFormat;

use super::report::{
    CountsView, Execution, HistoryRow, InfluencerView, NetworkView, Parameters, PeakView, Report,
    RunReport, StatsReport,
};

const DEFAULT_TOP_INFLUENCERS: usize = 5;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "infodemics",
    about = "Simulate misinformation spreading through an interaction network."
)]
pub struct Cli {
    /// Diagnostic output on stderr; overrides `INFODEMICS_LOG_FORMAT`.
    #[arg(long, value_enum, global = true, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the SIR model over the network and report the outbreak.
    Run(RunCommand),
    /// Describe the network without simulating.
    Stats(StatsCommand),
}

/// Where to load the network from, and how to prune it.
///
/// Without `--data-dir` or `--nodes`/`--edges`, `nodes.csv` and `edges.csv`
/// are read from the working directory.
#[derive(Debug, Args, Clone, Default)]
pub struct NetworkArgs {
    /// Directory holding `nodes.csv` and `edges.csv`.
    #[arg(long, value_name = "DIR", conflicts_with_all = ["nodes", "edges"])]
    pub data_dir: Option<PathBuf>,

    /// Path to the node table.
    #[arg(long, value_name = "PATH", requires = "edges")]
    pub nodes: Option<PathBuf>,

    /// Path to the edge table.
    #[arg(long, value_name = "PATH", requires = "nodes")]
    pub edges: Option<PathBuf>,

    /// Remove the top P percent of nodes by structural degree first.
    #[arg(long = "ban-top-percent", value_name = "P")]
    pub ban_top_percent: Option<f64>,
}

/// Options accepted by the `run` command.
///
/// Unset rates and counts fall back to the [`SimulationBuilder`] defaults.
#[derive(Debug, Args, Clone, Default)]
pub struct RunCommand {
    /// Network input and pruning.
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Per-contact transmission probability in [0, 1].
    #[arg(long)]
    pub beta: Option<f64>,

    /// Per-step recovery probability in [0, 1].
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Number of discrete steps to simulate.
    #[arg(long = "time-steps")]
    pub time_steps: Option<usize>,

    /// Share of nodes infected at t=0, in percent. Defaults to the
    /// conspiracy share of the loaded network.
    #[arg(long = "initial-infected-pct", value_name = "PCT")]
    pub initial_infected_pct: Option<f64>,

    /// Seed for every random draw of the run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How per-node transitions are evaluated.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Options accepted by the `stats` command.
#[derive(Debug, Args, Clone)]
pub struct StatsCommand {
    /// Network input and pruning.
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Number of highest-degree nodes to list.
    #[arg(long, default_value_t = DEFAULT_TOP_INFLUENCERS)]
    pub top: usize,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Report formats written to stdout.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary followed by a tab-separated history table.
    #[default]
    Text,
    /// A single pretty-printed JSON document.
    Json,
}

/// Command-line spelling of [`ExecutionStrategy`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when compiled in, otherwise sequential.
    #[default]
    Auto,
    /// Evaluate nodes one after another.
    Sequential,
    /// Evaluate nodes on the rayon pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading the node or edge table failed.
    #[error(transparent)]
    Provider(#[from] CsvProviderError),
    /// Building the graph or running the model failed.
    #[error(transparent)]
    Core(#[from] SimulationError),
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
    /// Serialising the JSON report failed.
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the stable code of the underlying provider or core error.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Provider(err) => Some(err.code().as_str()),
            Self::Core(err) => Some(err.code().as_str()),
            Self::Io(_) | Self::Json(_) => None,
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, building or simulating fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use infodemics_cli::cli::{Cli, Command, NetworkArgs, Report, RunCommand, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// std::fs::write(dir.path().join("nodes.csv"), "id,label,followers\n1,Conspiracy,3\n2,Other,1\n")?;
/// std::fs::write(dir.path().join("edges.csv"), "source,target\n1,2\n")?;
/// let cli = Cli {
///     log_format: None,
///     command: Command::Run(RunCommand {
///         network: NetworkArgs {
///             data_dir: Some(dir.path().to_path_buf()),
///             ..NetworkArgs::default()
///         },
///         time_steps: Some(4),
///         ..RunCommand::default()
///     }),
/// };
/// let execution = run_cli(cli)?;
/// let Report::Run(report) = execution.report else { unreachable!() };
/// assert_eq!(report.history.len(), 4);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<Execution, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Run(run) => {
            span.record("command", "run");
            run_command(&run)
        }
        Command::Stats(stats) => {
            span.record("command", "stats");
            stats_command(&stats)
        }
    }
}

struct LoadedNetwork {
    provider: CsvNetworkProvider,
    outcome: BuildOutcome,
}

impl LoadedNetwork {
    fn view(&self) -> NetworkView {
        let graph = self.outcome.graph();
        NetworkView {
            data_source: self.provider.name().to_owned(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            removed_super_spreaders: self.outcome.removed_count(),
            degree_threshold: self.outcome.threshold(),
        }
    }
}

#[instrument(
    name = "cli.load_network",
    err,
    skip(args),
    fields(source = field::Empty, ban_top_percent = ?args.ban_top_percent),
)]
fn load_network(args: &NetworkArgs) -> Result<LoadedNetwork, CliError> {
    let span = Span::current();
    let provider = match (&args.data_dir, &args.nodes, &args.edges) {
        (_, Some(nodes), Some(edges)) => {
            span.record("source", field::display(nodes.display()));
            CsvNetworkProvider::try_from_paths(nodes, edges)?
        }
        (Some(dir), _, _) => {
            span.record("source", field::display(dir.display()));
            CsvNetworkProvider::try_from_dir(dir)?
        }
        _ => {
            span.record("source", ".");
            CsvNetworkProvider::try_from_dir(".")?
        }
    };
    let outcome = GraphBuilder::new()
        .with_prune_top_percent(args.ban_top_percent)
        .build_from_source(&provider)?;
    Ok(LoadedNetwork { provider, outcome })
}

/// Truncated percentage of conspiracy-labelled records, the share the model
/// starts from when no initial percentage is given.
pub(super) fn default_initial_infected_pct(records: &[NodeRecord]) -> f64 {
    let conspiracy = records
        .iter()
        .filter(|record| Category::classify(&record.label).is_conspiracy())
        .count();
    let whole_percent = conspiracy
        .saturating_mul(100)
        .checked_div(records.len())
        .unwrap_or_default();
    u32::try_from(whole_percent).map_or(0.0, f64::from)
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(time_steps = ?command.time_steps, seed = ?command.seed),
)]
pub(super) fn run_command(command: &RunCommand) -> Result<Execution, CliError> {
    let network = load_network(&command.network)?;
    let initial_infected_pct = command
        .initial_infected_pct
        .unwrap_or_else(|| default_initial_infected_pct(network.provider.nodes()));

    let mut builder = SimulationBuilder::new()
        .with_initial_infected_pct(initial_infected_pct)
        .with_execution_strategy(command.strategy.into());
    if let Some(beta) = command.beta {
        builder = builder.with_beta(beta);
    }
    if let Some(gamma) = command.gamma {
        builder = builder.with_gamma(gamma);
    }
    if let Some(time_steps) = command.time_steps {
        builder = builder.with_time_steps(time_steps);
    }
    if let Some(seed) = command.seed {
        builder = builder.with_rng_seed(seed);
    }
    let simulation = builder.build()?;
    let run = simulation.run(network.outcome.graph())?;

    let summary = run.summary();
    let report = RunReport {
        network: network.view(),
        parameters: Parameters {
            beta: simulation.params().beta(),
            gamma: simulation.params().gamma(),
            initial_infected_pct,
            time_steps: simulation.params().time_steps(),
            seed: simulation.rng_seed(),
            strategy: format!("{:?}", simulation.execution_strategy()),
        },
        initial_counts: run.initial_states().counts().into(),
        peak: summary.map(|summary| PeakView::from(summary.peak)),
        final_counts: summary.map(|summary| CountsView::from(summary.final_counts)),
        final_states: run.final_states().counts().into(),
        history: run
            .history()
            .iter()
            .enumerate()
            .map(|(time_step, counts)| HistoryRow::new(time_step, counts))
            .collect(),
    };
    info!(
        data_source = report.network.data_source.as_str(),
        steps = report.history.len(),
        "command completed"
    );
    Ok(Execution {
        format: command.format,
        report: Report::Run(report),
    })
}

#[instrument(name = "cli.stats", err, skip(command), fields(top = command.top))]
pub(super) fn stats_command(command: &StatsCommand) -> Result<Execution, CliError> {
    let network = load_network(&command.network)?;
    let graph = network.outcome.graph();
    let statistics = NetworkStatistics::compute(graph);
    let report = StatsReport {
        network: network.view(),
        density: statistics.density,
        components: statistics.components,
        connected: statistics.is_connected(),
        conspiracy_nodes: statistics.conspiracy_nodes,
        non_conspiracy_nodes: statistics.non_conspiracy_nodes,
        average_degree: statistics.average_degree,
        max_degree: statistics.max_degree,
        top_influencers: top_influencers(graph, command.top)
            .into_iter()
            .map(InfluencerView::from)
            .collect(),
    };
    info!(
        data_source = report.network.data_source.as_str(),
        nodes = report.network.nodes,
        "command completed"
    );
    Ok(Execution {
        format: command.format,
        report: Report::Stats(report),
    })
}
