//! Preferential-attachment network generator.
//!
//! Social follower graphs are heavy-tailed, so the benchmarks use a
//! Barabási–Albert process: each arriving node links to `attachments`
//! distinct earlier nodes chosen with probability proportional to degree.

use infodemics_core::{EdgeRecord, NetworkSource, NodeRecord};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::SyntheticError;

const CONSPIRACY_LABEL: &str = "5G_Conspiracy_Graph";
const NON_CONSPIRACY_LABEL: &str = "Non_Conspiracy_Graph";
const OTHER_LABEL: &str = "Other_Graph";
const MAX_FOLLOWERS: u64 = 10_000;

/// Configuration for a synthetic scale-free network.
#[derive(Clone, Debug)]
pub struct ScaleFreeConfig {
    /// Number of nodes to generate.
    pub node_count: usize,
    /// Edges added by each arriving node.
    pub attachments: usize,
    /// Probability that a node carries a conspiracy label.
    pub conspiracy_share: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Node and edge records produced by [`SyntheticNetwork::generate`].
#[derive(Clone, Debug)]
pub struct SyntheticNetwork {
    name: String,
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl SyntheticNetwork {
    /// Generates a network from `config`.
    ///
    /// The first `attachments + 1` nodes form a star around node `0`; every
    /// later node then attaches to distinct earlier nodes drawn from the
    /// endpoint list, which weights each node by its current degree.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration cannot describe a
    /// network.
    ///
    /// # Examples
    /// ```
    /// use infodemics_benches::source::{ScaleFreeConfig, SyntheticNetwork};
    /// use infodemics_core::NetworkSource;
    ///
    /// let network = SyntheticNetwork::generate(&ScaleFreeConfig {
    ///     node_count: 10,
    ///     attachments: 2,
    ///     conspiracy_share: 0.1,
    ///     seed: 7,
    /// })?;
    /// assert_eq!(network.node_count(), 10);
    /// assert_eq!(network.edge_count(), 16);
    /// # Ok::<(), infodemics_benches::source::SyntheticError>(())
    /// ```
    pub fn generate(config: &ScaleFreeConfig) -> Result<Self, SyntheticError> {
        validate(config)?;
        let mut rng = SmallRng::seed_from_u64(config.seed);

        let nodes = (0..config.node_count)
            .map(|index| random_node(index, config.conspiracy_share, &mut rng))
            .collect();
        let edges = attach(config.node_count, config.attachments, &mut rng);

        Ok(Self {
            name: format!(
                "scale-free(n={},m={})",
                config.node_count, config.attachments
            ),
            nodes,
            edges,
        })
    }
}

impl NetworkSource for SyntheticNetwork {
    fn name(&self) -> &str {
        &self.name
    }

    fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }
}

fn validate(config: &ScaleFreeConfig) -> Result<(), SyntheticError> {
    if config.node_count == 0 {
        return Err(SyntheticError::ZeroNodes);
    }
    if config.attachments == 0 {
        return Err(SyntheticError::ZeroAttachments);
    }
    if config.attachments >= config.node_count {
        return Err(SyntheticError::AttachmentsExceedNodes {
            attachments: config.attachments,
            node_count: config.node_count,
        });
    }
    if !(0.0..=1.0).contains(&config.conspiracy_share) {
        return Err(SyntheticError::ConspiracyShareOutOfRange {
            share: config.conspiracy_share,
        });
    }
    Ok(())
}

fn random_node(index: usize, conspiracy_share: f64, rng: &mut SmallRng) -> NodeRecord {
    let label = if rng.gen_bool(conspiracy_share) {
        CONSPIRACY_LABEL
    } else if rng.gen_bool(0.5) {
        NON_CONSPIRACY_LABEL
    } else {
        OTHER_LABEL
    };
    NodeRecord::new(index.to_string(), label, rng.gen_range(0..=MAX_FOLLOWERS))
}

fn attach(node_count: usize, attachments: usize, rng: &mut SmallRng) -> Vec<EdgeRecord> {
    let mut edges = Vec::new();
    // Each node appears once per incident edge.
    let mut endpoints: Vec<usize> = Vec::new();

    for leaf in 1..=attachments {
        edges.push(EdgeRecord::new("0", leaf.to_string()));
        endpoints.extend([0, leaf]);
    }

    let mut targets: Vec<usize> = Vec::with_capacity(attachments);
    for arriving in (attachments + 1)..node_count {
        targets.clear();
        while targets.len() < attachments {
            let pick = rng.gen_range(0..endpoints.len());
            if let Some(&target) = endpoints.get(pick) {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        for &target in &targets {
            edges.push(EdgeRecord::new(arriving.to_string(), target.to_string()));
            endpoints.extend([arriving, target]);
        }
    }
    edges
}
