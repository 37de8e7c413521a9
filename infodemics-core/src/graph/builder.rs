//! Graph construction and super-spreader pruning.
//!
//! Structural degree is counted over the raw edge list before anything is
//! removed: every record contributes one to its source and one to its
//! target, whether or not both endpoints are known nodes.

use std::collections::HashMap;

use tracing::{info, instrument};

use crate::{
    Result,
    error::validate_percentage,
    graph::{
        EdgeRecord, GraphModel, Node, NodeId, NodeRecord, merge_repeated,
        percentile::linear_percentile,
    },
    source::NetworkSource,
};

/// Configures and runs graph construction.
///
/// # Examples
/// ```
/// use infodemics_core::{EdgeRecord, GraphBuilder, NodeRecord};
///
/// let nodes = vec![
///     NodeRecord::new("a", "Conspiracy", 10),
///     NodeRecord::new("b", "Non_Conspiracy", 3),
/// ];
/// let edges = vec![EdgeRecord::new("a", "b"), EdgeRecord::new("a", "ghost")];
/// let outcome = GraphBuilder::new().build(&nodes, &edges)?;
/// let graph = outcome.graph();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.nodes()[0].degree(), 2);
/// assert_eq!(outcome.removed_count(), 0);
/// # Ok::<(), infodemics_core::SimulationError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    prune_top_percent: Option<f64>,
}

/// Output of [`GraphBuilder::build`].
#[derive(Clone, Debug)]
pub struct BuildOutcome {
    graph: GraphModel,
    removed: Vec<NodeId>,
    threshold: Option<f64>,
}

impl BuildOutcome {
    /// Returns the effective graph after pruning.
    #[must_use]
    pub const fn graph(&self) -> &GraphModel {
        &self.graph
    }

    /// Consumes the outcome and returns the graph.
    #[must_use]
    pub fn into_graph(self) -> GraphModel {
        self.graph
    }

    /// Returns the identifiers removed as super-spreaders, in input order.
    #[must_use]
    pub fn removed(&self) -> &[NodeId] {
        &self.removed
    }

    /// Returns how many nodes pruning removed.
    #[must_use]
    pub const fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Returns the degree threshold above which nodes were removed, or
    /// `None` when pruning was not requested.
    #[must_use]
    pub const fn threshold(&self) -> Option<f64> {
        self.threshold
    }
}

impl GraphBuilder {
    /// Creates a builder that keeps every node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests removal of the top `percent` of nodes by structural degree.
    ///
    /// `None` or `Some(0.0)` disables pruning. The value is validated by
    /// [`Self::build`].
    #[must_use]
    pub fn with_prune_top_percent(mut self, percent: Option<f64>) -> Self {
        self.prune_top_percent = percent;
        self
    }

    /// Returns the configured pruning percentage.
    #[must_use]
    pub const fn prune_top_percent(&self) -> Option<f64> {
        self.prune_top_percent
    }

    /// Builds a graph from the records of a [`NetworkSource`].
    ///
    /// # Errors
    /// See [`Self::build`].
    pub fn build_from_source<S: NetworkSource + ?Sized>(&self, source: &S) -> Result<BuildOutcome> {
        self.build(source.nodes(), source.edges())
    }

    /// Builds a graph, pruning the highest-degree nodes when requested.
    ///
    /// Nodes whose structural degree strictly exceeds the `(100 - p)`-th
    /// percentile of the degree distribution are removed along with every
    /// edge that touches them. Edges naming unknown identifiers are skipped.
    ///
    /// # Errors
    /// Returns [`crate::SimulationError::InvalidPercentage`] when the pruning
    /// percentage is outside `[0, 100]` or not finite.
    #[instrument(
        name = "core.build_graph",
        err,
        skip(self, nodes, edges),
        fields(nodes = nodes.len(), edges = edges.len(), prune_top_percent = ?self.prune_top_percent),
    )]
    pub fn build(&self, nodes: &[NodeRecord], edges: &[EdgeRecord]) -> Result<BuildOutcome> {
        let prune = self
            .prune_top_percent
            .map(|percent| validate_percentage("prune_top_percent", percent))
            .transpose()?
            .filter(|&percent| percent > 0.0);

        let degrees = structural_degrees(edges);
        let candidates = merge_repeated(nodes.iter().map(|record| {
            let degree = degrees.get(&record.id).copied().unwrap_or_default();
            Node::from_record(record, degree)
        }));

        let threshold = prune.and_then(|percent| degree_threshold(&candidates, percent));
        let (kept, removed): (Vec<Node>, Vec<Node>) = match threshold {
            Some(limit) => candidates
                .into_iter()
                .partition(|node| !exceeds(node.degree(), limit)),
            None => (candidates, Vec::new()),
        };

        let graph = GraphModel::from_parts(kept, edges);

        let removed: Vec<NodeId> = removed.into_iter().map(|node| node.id().clone()).collect();
        if let Some(limit) = threshold {
            info!(
                removed = removed.len(),
                threshold = limit,
                "removed super-spreaders"
            );
        }

        Ok(BuildOutcome {
            graph,
            removed,
            threshold,
        })
    }
}

fn structural_degrees(edges: &[EdgeRecord]) -> HashMap<&NodeId, u64> {
    let mut degrees: HashMap<&NodeId, u64> = HashMap::new();
    for edge in edges {
        *degrees.entry(&edge.source).or_default() += 1;
        *degrees.entry(&edge.target).or_default() += 1;
    }
    degrees
}

#[expect(
    clippy::float_arithmetic,
    reason = "the percentile rank is the complement of the pruned share"
)]
fn degree_threshold(nodes: &[Node], prune_top_percent: f64) -> Option<f64> {
    let mut sorted: Vec<u64> = nodes.iter().map(Node::degree).collect();
    sorted.sort_unstable();
    linear_percentile(&sorted, 100.0 - prune_top_percent)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "degrees stay far below 2^52"
)]
fn exceeds(degree: u64, threshold: f64) -> bool {
    degree as f64 > threshold
}
