use infodemics_core::{EdgeRecord, NetworkSource, NodeRecord};

/// In-memory [`NetworkSource`] built from string tuples.
#[derive(Clone, Debug)]
pub struct Network {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl Network {
    #[must_use]
    pub fn new(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> Self {
        Self {
            nodes: nodes
                .iter()
                .map(|(id, label)| NodeRecord::new(*id, *label, 0))
                .collect(),
            edges: edges
                .iter()
                .map(|(source, target)| EdgeRecord::new(*source, *target))
                .collect(),
        }
    }

    /// The four-node path `A - B - C - D`, every node non-conspiracy.
    #[must_use]
    pub fn path_abcd() -> Self {
        Self::new(
            &[
                ("A", "Non_Conspiracy"),
                ("B", "Non_Conspiracy"),
                ("C", "Non_Conspiracy"),
                ("D", "Non_Conspiracy"),
            ],
            &[("A", "B"), ("B", "C"), ("C", "D")],
        )
    }
}

impl NetworkSource for Network {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }
}
