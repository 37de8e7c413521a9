//! End-to-end behaviour of graph construction, initialisation and runs.

mod common;

use common::Network;
use infodemics_core::{
    ExecutionStrategy, GraphBuilder, GraphModel, NodeStates, SimulationBuilder, SirCounts,
    SirEngine, SirParams, SirState, initialize_states,
};
use infodemics_test_support::tracing::RecordingLayer;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};
use tracing::Level;

#[fixture]
fn path_graph() -> GraphModel {
    GraphBuilder::new()
        .build_from_source(&Network::path_abcd())
        .expect("path must build")
        .into_graph()
}

fn strategies() -> Vec<ExecutionStrategy> {
    vec![
        ExecutionStrategy::Auto,
        ExecutionStrategy::Sequential,
        #[cfg(feature = "parallel")]
        ExecutionStrategy::Parallel,
    ]
}

#[test]
fn builder_defaults() {
    let builder = SimulationBuilder::new();
    assert_eq!(builder.beta(), 0.3);
    assert_eq!(builder.gamma(), 0.1);
    assert_eq!(builder.initial_infected_pct(), 0.0);
    assert_eq!(builder.time_steps(), 50);
    assert_eq!(builder.rng_seed(), infodemics_core::DEFAULT_SEED);
    assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
}

#[rstest]
fn certain_transmission_saturates_connected_path(path_graph: GraphModel) {
    for strategy in strategies() {
        for seed in 0..16 {
            let simulation = SimulationBuilder::new()
                .with_beta(1.0)
                .with_gamma(0.0)
                .with_initial_infected_pct(25.0)
                .with_time_steps(3)
                .with_rng_seed(seed)
                .with_execution_strategy(strategy)
                .build()
                .expect("configuration is valid");
            let run = simulation.run(&path_graph).expect("run must succeed");

            assert_eq!(run.initial_states().counts().infected, 1);
            assert_eq!(run.history().len(), 3);
            assert_eq!(
                run.final_states().counts(),
                SirCounts {
                    susceptible: 0,
                    infected: 4,
                    recovered: 0,
                },
                "seed {seed}, {strategy:?}"
            );
        }
    }
}

#[rstest]
fn initial_single_infection_is_uniform_over_nodes(path_graph: GraphModel) {
    let mut hits = [0_u32; 4];
    for seed in 0..400 {
        let states = initialize_states(&path_graph, 25.0, &mut SmallRng::seed_from_u64(seed))
            .expect("pct is valid");
        for (index, state) in states.as_slice().iter().enumerate() {
            if *state == SirState::Infected {
                hits[index] += 1;
            }
        }
    }
    assert_eq!(hits.iter().sum::<u32>(), 400);
    assert!(hits.iter().all(|&count| (60..=140).contains(&count)), "{hits:?}");
}

#[test]
fn instant_recovery_without_transmission() {
    let network = Network::new(
        &[
            ("1", "5G_Conspiracy"),
            ("2", "Non_Conspiracy"),
            ("3", "5G_Conspiracy"),
            ("4", "Non_Conspiracy"),
            ("5", "Other"),
        ],
        &[("1", "2"), ("2", "3"), ("3", "4"), ("4", "5")],
    );
    let graph = GraphBuilder::new()
        .build_from_source(&network)
        .expect("network must build")
        .into_graph();

    for strategy in strategies() {
        let run = SimulationBuilder::new()
            .with_beta(0.0)
            .with_gamma(1.0)
            .with_time_steps(5)
            .with_execution_strategy(strategy)
            .build()
            .expect("configuration is valid")
            .run(&graph)
            .expect("run must succeed");

        let history = run.history();
        assert_eq!(history.get(0).map(|counts| counts.infected), Some(2));
        for counts in history.iter().skip(1) {
            assert_eq!(counts.infected, 0);
            assert_eq!(counts.recovered, 2);
        }
        assert_eq!(history.susceptible(), vec![3; 5]);
        assert_eq!(run.final_states().state_of(&graph, "1"), Some(SirState::Recovered));
        assert_eq!(run.final_states().state_of(&graph, "2"), Some(SirState::Susceptible));
    }
}

#[rstest]
fn zero_steps_leave_initial_states_untouched(path_graph: GraphModel) {
    let run = SimulationBuilder::new()
        .with_initial_infected_pct(50.0)
        .with_time_steps(0)
        .build()
        .expect("configuration is valid")
        .run(&path_graph)
        .expect("run must succeed");
    assert!(run.history().is_empty());
    assert_eq!(run.final_states(), run.initial_states());
    assert!(run.summary().is_none());
}

#[rstest]
fn identical_seeds_reproduce_runs(path_graph: GraphModel) {
    for strategy in strategies() {
        let simulation = SimulationBuilder::new()
            .with_beta(0.4)
            .with_gamma(0.3)
            .with_initial_infected_pct(25.0)
            .with_time_steps(12)
            .with_rng_seed(1234)
            .with_execution_strategy(strategy)
            .build()
            .expect("configuration is valid");
        let first = simulation.run(&path_graph).expect("run must succeed");
        let second = simulation.run(&path_graph).expect("run must succeed");
        assert_eq!(first, second, "{strategy:?}");
    }
}

#[test]
fn empty_graph_is_a_no_op_with_zero_counts() {
    let run = SimulationBuilder::new()
        .with_time_steps(4)
        .build()
        .expect("configuration is valid")
        .run(&GraphModel::default())
        .expect("run must succeed");
    assert_eq!(run.history().as_slice(), &[SirCounts::default(); 4]);
    assert!(run.final_states().is_empty());
    let summary = run.summary().expect("four steps were recorded");
    assert_eq!(summary.peak.infected, 0);
    assert_eq!(summary.peak.time_step, 0);
}

#[test]
fn pruned_nodes_never_take_part() {
    let network = Network::new(
        &[
            ("hub", "Conspiracy"),
            ("a", "Other"),
            ("b", "Other"),
            ("c", "Other"),
        ],
        &[("hub", "a"), ("hub", "b"), ("hub", "c"), ("a", "b")],
    );
    let outcome = GraphBuilder::new()
        .with_prune_top_percent(Some(25.0))
        .build_from_source(&network)
        .expect("network must build");
    assert_eq!(outcome.removed_count(), 1);

    let graph = outcome.graph();
    let run = SimulationBuilder::new()
        .with_beta(1.0)
        .with_time_steps(5)
        .build()
        .expect("configuration is valid")
        .run(graph)
        .expect("run must succeed");
    assert_eq!(run.final_states().len(), 3);
    assert_eq!(run.final_states().state_of(graph, "hub"), None);
    // The only conspiracy node was pruned, so nothing can spread.
    assert!(run.history().iter().all(|counts| counts.infected == 0));
}

#[rstest]
fn final_states_pair_with_node_ids(path_graph: GraphModel) {
    let states = NodeStates::new(vec![
        SirState::Infected,
        SirState::Susceptible,
        SirState::Recovered,
        SirState::Susceptible,
    ]);
    let pairs: Vec<(String, char)> = states
        .iter_with_ids(&path_graph)
        .map(|(id, state)| (id.to_string(), state.symbol()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("A".to_owned(), 'I'),
            ("B".to_owned(), 'S'),
            ("C".to_owned(), 'R'),
            ("D".to_owned(), 'S'),
        ]
    );
}

#[rstest]
fn run_records_core_tracing(path_graph: GraphModel) {
    let simulation = SimulationBuilder::new()
        .with_beta(0.5)
        .with_gamma(0.25)
        .with_initial_infected_pct(25.0)
        .with_time_steps(12)
        .with_execution_strategy(ExecutionStrategy::Sequential)
        .build()
        .expect("configuration is valid");

    let (result, layer) = RecordingLayer::capture(|| simulation.run(&path_graph));
    result.expect("run must succeed");

    let run_span = layer.span("core.run").expect("core.run span must exist");
    assert_eq!(run_span.field("nodes"), Some("4"));
    assert_eq!(run_span.field("edges"), Some("3"));
    assert_eq!(run_span.field("strategy"), Some("Sequential"));

    let init_span = layer
        .span("core.initialize_states")
        .expect("core.initialize_states span must exist");
    assert_eq!(init_span.field("initial_infected_pct"), Some("25.0"));

    let simulate_span = layer
        .span("core.simulate")
        .expect("core.simulate span must exist");
    assert_eq!(simulate_span.field("beta"), Some("0.5"));
    assert_eq!(simulate_span.field("gamma"), Some("0.25"));
    assert_eq!(simulate_span.field("time_steps"), Some("12"));

    let progress = layer.events_with_message("simulation progress");
    let steps: Vec<&str> = progress
        .iter()
        .filter_map(|event| event.field("step"))
        .collect();
    assert_eq!(steps, vec!["0", "10"]);
    assert!(progress.iter().all(|event| event.level == Level::INFO));

    let step_events = layer.events_with_message("step completed");
    assert_eq!(step_events.len(), 12);
    assert!(step_events.iter().all(|event| event.level == Level::DEBUG));

    assert_eq!(layer.events_with_message("simulation completed").len(), 1);
}

#[test]
fn build_records_pruning_outcome() {
    let network = Network::new(
        &[("hub", "Other"), ("a", "Other"), ("b", "Other"), ("c", "Other")],
        &[("hub", "a"), ("hub", "b"), ("hub", "c")],
    );
    let (outcome, layer) = RecordingLayer::capture(|| {
        GraphBuilder::new()
            .with_prune_top_percent(Some(25.0))
            .build_from_source(&network)
    });
    outcome.expect("network must build");

    let span = layer
        .span("core.build_graph")
        .expect("core.build_graph span must exist");
    assert_eq!(span.field("nodes"), Some("4"));
    assert_eq!(span.field("edges"), Some("3"));
    assert_eq!(span.field("prune_top_percent"), Some("Some(25.0)"));

    let events = layer.events_with_message("removed super-spreaders");
    let event = events.first().expect("pruning event must be emitted");
    assert_eq!(event.field("removed"), Some("1"));
}

#[test]
fn rejected_initialisation_is_logged_as_error() {
    let graph = GraphModel::default();
    let (result, layer) = RecordingLayer::capture(|| {
        initialize_states(&graph, 140.0, &mut SmallRng::seed_from_u64(0))
    });
    assert!(result.is_err());
    assert!(layer.span("core.initialize_states").is_some());
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::ERROR && event.field("error").is_some())
    );
}

#[test]
fn engine_accepts_explicit_generators() {
    let graph = GraphBuilder::new()
        .build_from_source(&Network::path_abcd())
        .expect("path must build")
        .into_graph();
    let engine = SirEngine::new(
        SirParams::new(1.0, 1.0, 2).expect("rates are valid"),
        ExecutionStrategy::Sequential,
    );
    let initial = NodeStates::new(vec![
        SirState::Susceptible,
        SirState::Infected,
        SirState::Susceptible,
        SirState::Susceptible,
    ]);
    let run = engine
        .run(&graph, initial, &mut SmallRng::seed_from_u64(5))
        .expect("run must succeed");
    // Step 0 infects A and C while B recovers; step 1 infects D and
    // recovers A and C.
    assert_eq!(
        run.final_states().as_slice(),
        &[
            SirState::Recovered,
            SirState::Recovered,
            SirState::Recovered,
            SirState::Infected,
        ]
    );
}
