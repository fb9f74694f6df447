//! Network-specific error types.

use rf_core::{CouplingKey, NodeId, RfError};
use thiserror::Error;

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Network construction, lookup and integration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Node is not part of this network.
    #[error("Node {node} is not part of the network")]
    UnknownNode { node: NodeId },

    /// No coupling is defined between the two nodes.
    #[error("No coupling defined between {a} and {b}")]
    UnknownCoupling { a: NodeId, b: NodeId },

    /// The same node was added twice.
    #[error("Node {node} added more than once")]
    DuplicateNode { node: NodeId },

    /// The same undirected coupling was declared twice.
    #[error("Coupling {key} declared more than once")]
    DuplicateCoupling { key: CouplingKey },

    /// Node parameters are out of range.
    #[error("Invalid node {node}: {what}")]
    InvalidNode { node: NodeId, what: &'static str },

    /// Coupling parameters are out of range or refer to an unsuitable node.
    #[error("Invalid coupling {key}: {what}")]
    InvalidCoupling { key: CouplingKey, what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] RfError),
}
