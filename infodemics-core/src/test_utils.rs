//! Shared test utilities for `infodemics-core`.

use infodemics_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::graph::{EdgeRecord, GraphBuilder, GraphModel, NodeRecord};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `INFODEMICS_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds an unpruned graph from `(id, label)` nodes and `(source, target)`
/// edges.
#[must_use]
pub(crate) fn build_graph(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> GraphModel {
    let nodes: Vec<NodeRecord> = nodes
        .iter()
        .map(|(id, label)| NodeRecord::new(*id, *label, 0))
        .collect();
    let edges: Vec<EdgeRecord> = edges
        .iter()
        .map(|(source, target)| EdgeRecord::new(*source, *target))
        .collect();
    GraphBuilder::new()
        .build(&nodes, &edges)
        .expect("test graph must build")
        .into_graph()
}
