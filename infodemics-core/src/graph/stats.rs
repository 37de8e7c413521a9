//! Summary statistics over a [`GraphModel`].

use crate::{
    category::Category,
    graph::{GraphModel, Node, union_find::DisjointSet},
};

/// Aggregate description of a network, as printed before a run.
///
/// # Examples
/// ```
/// use infodemics_core::{EdgeRecord, GraphBuilder, NetworkStatistics, NodeRecord};
///
/// let nodes = vec![
///     NodeRecord::new("a", "Conspiracy", 0),
///     NodeRecord::new("b", "Other", 0),
///     NodeRecord::new("c", "Other", 0),
/// ];
/// let edges = vec![EdgeRecord::new("a", "b")];
/// let graph = GraphBuilder::new().build(&nodes, &edges)?.into_graph();
/// let stats = NetworkStatistics::compute(&graph);
/// assert_eq!(stats.components, 2);
/// assert!(!stats.is_connected());
/// assert_eq!(stats.conspiracy_nodes, 1);
/// # Ok::<(), infodemics_core::SimulationError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkStatistics {
    /// Number of nodes.
    pub nodes: usize,
    /// Number of distinct undirected edges.
    pub edges: usize,
    /// `2m / (n (n - 1))`, or zero for fewer than two nodes.
    pub density: f64,
    /// Number of connected components.
    pub components: usize,
    /// Nodes classified as [`Category::Conspiracy`].
    pub conspiracy_nodes: usize,
    /// Nodes classified as [`Category::NonConspiracy`].
    pub non_conspiracy_nodes: usize,
    /// Mean adjacency degree, or zero for an empty graph.
    pub average_degree: f64,
    /// Largest adjacency degree, or zero for an empty graph.
    pub max_degree: usize,
}

impl NetworkStatistics {
    /// Computes statistics for `graph`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "density and mean degree are real-valued ratios of small counts"
    )]
    pub fn compute(graph: &GraphModel) -> Self {
        let nodes = graph.node_count();
        let edges = graph.edge_count();

        let density = if nodes < 2 {
            0.0
        } else {
            (2 * edges) as f64 / (nodes * (nodes - 1)) as f64
        };

        let mut components = DisjointSet::new(nodes);
        for (left, right) in graph.edges() {
            components.union(left, right);
        }

        let conspiracy_nodes = graph
            .nodes()
            .iter()
            .filter(|node| node.category() == Category::Conspiracy)
            .count();

        let degrees = (0..nodes).map(|index| graph.graph_degree(index));
        let max_degree = degrees.clone().max().unwrap_or_default();
        let average_degree = if nodes == 0 {
            0.0
        } else {
            degrees.sum::<usize>() as f64 / nodes as f64
        };

        Self {
            nodes,
            edges,
            density,
            components: components.component_count(),
            conspiracy_nodes,
            non_conspiracy_nodes: nodes - conspiracy_nodes,
            average_degree,
            max_degree,
        }
    }

    /// Returns `true` when the graph is non-empty and forms one component.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.components == 1
    }
}

/// Returns up to `count` nodes with the highest structural degree.
///
/// Ordering is by descending degree; ties keep input order.
#[must_use]
pub fn top_influencers(graph: &GraphModel, count: usize) -> Vec<&Node> {
    let mut ranked: Vec<&Node> = graph.nodes().iter().collect();
    ranked.sort_by(|left, right| right.degree().cmp(&left.degree()));
    ranked.truncate(count);
    ranked
}
