//! Error types for synthetic network generation.

/// Errors that may occur while generating a synthetic network.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SyntheticError {
    /// The requested node count was zero.
    #[error("node count must be greater than zero")]
    ZeroNodes,
    /// The requested attachment count was zero.
    #[error("attachment count must be greater than zero")]
    ZeroAttachments,
    /// Every node needs `attachments` distinct earlier nodes to link to.
    #[error("attachment count ({attachments}) must be below node count ({node_count})")]
    AttachmentsExceedNodes {
        /// Edges added per arriving node.
        attachments: usize,
        /// Number of nodes requested.
        node_count: usize,
    },
    /// The conspiracy share was not a probability.
    #[error("conspiracy share must lie in [0, 1] (got {share})")]
    ConspiracyShareOutOfRange {
        /// Share supplied by the caller.
        share: f64,
    },
}
