//! Network source abstraction for the infodemics core runtime.

use crate::graph::{EdgeRecord, NodeRecord};

/// Abstraction over a loaded set of node and edge records.
///
/// Data-loading collaborators implement this trait after rejecting malformed
/// input, so the core only ever sees well-formed records.
///
/// # Examples
/// ```
/// use infodemics_core::{EdgeRecord, GraphBuilder, NetworkSource, NodeRecord};
///
/// struct Fixed {
///     nodes: Vec<NodeRecord>,
///     edges: Vec<EdgeRecord>,
/// }
///
/// impl NetworkSource for Fixed {
///     fn name(&self) -> &str { "fixed" }
///     fn nodes(&self) -> &[NodeRecord] { &self.nodes }
///     fn edges(&self) -> &[EdgeRecord] { &self.edges }
/// }
///
/// let source = Fixed {
///     nodes: vec![NodeRecord::new("1", "Conspiracy", 4), NodeRecord::new("2", "Other", 9)],
///     edges: vec![EdgeRecord::new("1", "2")],
/// };
/// assert_eq!(source.node_count(), 2);
/// assert!(!source.is_empty());
///
/// let graph = GraphBuilder::new().build_from_source(&source)?.into_graph();
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), infodemics_core::SimulationError>(())
/// ```
pub trait NetworkSource {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the node records in input order.
    fn nodes(&self) -> &[NodeRecord];

    /// Returns the edge records in input order.
    fn edges(&self) -> &[EdgeRecord];

    /// Returns the number of node records.
    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Returns the number of edge records.
    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Returns whether the source holds no node records.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }
}
