//! Super-spreader pruning bounds.
//!
//! After removing the top `p`% by structural degree:
//!
//! - every surviving node has degree at most the threshold, and every
//!   removed node strictly exceeds it;
//! - the removed count never exceeds `ceil(n * p / 100)`;
//! - with distinct degrees it is within one of that bound.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{GraphBuilder, Node};

use super::types::PruningFixture;

fn expected_removals(nodes: usize, prune_top_percent: f64) -> usize {
    (nodes as f64 * prune_top_percent / 100.0).ceil() as usize
}

/// Runs the pruning bounds property for the given fixture.
pub(super) fn run_pruning_bounds_property(fixture: &PruningFixture) -> TestCaseResult {
    let unpruned = GraphBuilder::new()
        .build(&fixture.nodes, &fixture.edges)
        .map_err(|err| TestCaseError::fail(format!("unpruned build failed: {err}")))?;
    let outcome = GraphBuilder::new()
        .with_prune_top_percent(Some(fixture.prune_top_percent))
        .build(&fixture.nodes, &fixture.edges)
        .map_err(|err| TestCaseError::fail(format!("pruned build failed: {err}")))?;
    let threshold = outcome
        .threshold()
        .ok_or_else(|| TestCaseError::fail("pruning was requested but no threshold reported"))?;

    let max_remaining = outcome.graph().nodes().iter().map(Node::degree).max();
    if let Some(max) = max_remaining {
        if max as f64 > threshold {
            return Err(TestCaseError::fail(format!(
                "surviving degree {max} exceeds threshold {threshold}"
            )));
        }
    }
    for id in outcome.removed() {
        let degree = unpruned
            .graph()
            .index_of(id.as_str())
            .and_then(|index| unpruned.graph().node(index))
            .map(Node::degree)
            .ok_or_else(|| TestCaseError::fail(format!("removed node {id} was never built")))?;
        if degree as f64 <= threshold {
            return Err(TestCaseError::fail(format!(
                "removed node {id} has degree {degree} within threshold {threshold}"
            )));
        }
    }

    let total = fixture.nodes.len();
    if outcome.graph().node_count() + outcome.removed_count() != total {
        return Err(TestCaseError::fail("pruning lost or duplicated nodes"));
    }

    let bound = expected_removals(total, fixture.prune_top_percent);
    let removed = outcome.removed_count();
    if removed > bound + 1 {
        return Err(TestCaseError::fail(format!(
            "removed {removed} nodes, more than ceil bound {bound} (n={total}, p={})",
            fixture.prune_top_percent
        )));
    }
    if fixture.distinct_degrees && removed + 1 < bound {
        return Err(TestCaseError::fail(format!(
            "removed {removed} nodes, expected about {bound} for distinct degrees (n={total}, p={})",
            fixture.prune_top_percent
        )));
    }
    Ok(())
}
