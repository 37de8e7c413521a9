//! Undirected interaction graph with typed node attributes.
//!
//! Nodes are stored densely in input order and addressed by index; the
//! identifier map resolves external [`NodeId`]s to those indices. Adjacency
//! lists are kept sorted and free of duplicates so iteration is deterministic
//! and a repeated edge collapses into one.

mod builder;
mod percentile;
mod stats;
mod union_find;

use std::{borrow::Borrow, collections::HashMap, fmt, sync::Arc};

use crate::category::Category;

pub use builder::{BuildOutcome, GraphBuilder};
pub use stats::{NetworkStatistics, top_influencers};

/// Unique, hashable identifier of a node as it appears in the input records.
///
/// # Examples
/// ```
/// use infodemics_core::NodeId;
///
/// let id = NodeId::from("42");
/// assert_eq!(id.as_str(), "42");
/// assert_eq!(NodeId::from(42_u64), id);
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(Arc<str>);

impl NodeId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(Arc::from(value.to_string()))
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw node record handed over by a data-loading collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeRecord {
    /// External identifier.
    pub id: NodeId,
    /// Raw category label, classified with [`Category::classify`].
    pub label: String,
    /// Follower count reported by the source platform.
    pub followers: u64,
}

impl NodeRecord {
    /// Creates a node record.
    ///
    /// # Examples
    /// ```
    /// use infodemics_core::NodeRecord;
    ///
    /// let record = NodeRecord::new("7", "Conspiracy", 120);
    /// assert_eq!(record.id.as_str(), "7");
    /// assert_eq!(record.followers, 120);
    /// ```
    #[must_use]
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, followers: u64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            followers,
        }
    }
}

/// Raw edge record; the pair is treated as unordered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Identifier listed in the source column.
    pub source: NodeId,
    /// Identifier listed in the target column.
    pub target: NodeId,
}

impl EdgeRecord {
    /// Creates an edge record.
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A node of the [`GraphModel`] with its classified attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    category: Category,
    followers: u64,
    degree: u64,
    original_label: String,
}

impl Node {
    pub(crate) fn from_record(record: &NodeRecord, degree: u64) -> Self {
        Self {
            id: record.id.clone(),
            category: Category::classify(&record.label),
            followers: record.followers,
            degree,
            original_label: record.label.clone(),
        }
    }

    /// Returns the external identifier.
    #[must_use]
    pub const fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the category derived from the raw label.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the follower count.
    #[must_use]
    pub const fn followers(&self) -> u64 {
        self.followers
    }

    /// Returns the structural degree computed over the raw edge list.
    ///
    /// This counts edge endpoints, so an input listing both directions of
    /// an undirected edge contributes two to each endpoint.
    #[must_use]
    pub const fn degree(&self) -> u64 {
        self.degree
    }

    /// Returns the raw label the category was derived from.
    #[must_use]
    pub fn original_label(&self) -> &str {
        &self.original_label
    }
}

/// Undirected graph over [`Node`]s.
///
/// The node set is fixed once [`GraphBuilder::build`] returns.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl GraphModel {
    /// Creates a graph over `nodes`, linking every edge whose endpoints are
    /// both present.
    ///
    /// Identifiers must already be distinct; see [`merge_repeated`]. Rows
    /// are filled unordered and sorted once at the end.
    pub(crate) fn from_parts(nodes: Vec<Node>, edges: &[EdgeRecord]) -> Self {
        let index: HashMap<NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id().clone(), position))
            .collect();

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for edge in edges {
            let (Some(&left), Some(&right)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) else {
                continue;
            };
            push_neighbor(&mut adjacency, left, right);
            if left != right {
                push_neighbor(&mut adjacency, right, left);
            }
        }

        let mut edge_count = 0;
        for (position, row) in adjacency.iter_mut().enumerate() {
            row.sort_unstable();
            row.dedup();
            edge_count += row.iter().filter(|&&neighbor| neighbor >= position).count();
        }

        Self {
            nodes,
            index,
            adjacency,
            edge_count,
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of distinct undirected edges, self-loops included.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the nodes in input order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the node stored at `index`.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Resolves an external identifier to its dense index.
    ///
    /// # Examples
    /// ```
    /// use infodemics_core::{EdgeRecord, GraphBuilder, NodeRecord};
    ///
    /// let nodes = vec![NodeRecord::new("a", "Other", 0), NodeRecord::new("b", "Other", 0)];
    /// let edges = vec![EdgeRecord::new("a", "b")];
    /// let graph = GraphBuilder::new().build(&nodes, &edges)?.into_graph();
    /// assert_eq!(graph.index_of("b"), Some(1));
    /// assert_eq!(graph.index_of("z"), None);
    /// # Ok::<(), infodemics_core::SimulationError>(())
    /// ```
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns the sorted neighbour indices of `index`.
    ///
    /// Unknown indices yield an empty slice.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the adjacency degree of `index`; a self-loop counts twice.
    #[must_use]
    pub fn graph_degree(&self, index: usize) -> usize {
        let neighbors = self.neighbors(index);
        let loops = usize::from(neighbors.binary_search(&index).is_ok());
        neighbors.len() + loops
    }

    /// Iterates over the edges in canonical `(low, high)` index order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(left, row)| {
            row.iter()
                .copied()
                .filter(move |&right| left <= right)
                .map(move |right| (left, right))
        })
    }
}

fn push_neighbor(adjacency: &mut [Vec<usize>], from: usize, to: usize) {
    if let Some(row) = adjacency.get_mut(from) {
        row.push(to);
    }
}

/// Collapses repeated identifiers in record order.
///
/// A repeated identifier keeps its first position and takes the later
/// record's attributes.
pub(crate) fn merge_repeated(nodes: impl IntoIterator<Item = Node>) -> Vec<Node> {
    let mut positions: HashMap<NodeId, usize> = HashMap::new();
    let mut merged: Vec<Node> = Vec::new();
    for node in nodes {
        match positions.get(node.id()).copied() {
            Some(position) => {
                if let Some(slot) = merged.get_mut(position) {
                    *slot = node;
                }
            }
            None => {
                positions.insert(node.id().clone(), merged.len());
                merged.push(node);
            }
        }
    }
    merged
}
