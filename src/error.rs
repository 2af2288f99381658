//! Error taxonomy shared by the graph, its iterators and the algorithms.
//!
//! Every failure is reported synchronously at the call that detects it.
//! Mutations are atomic per call: a call that returns an error has not
//! touched the graph.

use crate::graph::{EdgeKey, Vertex};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex {0} already exists")]
    DuplicateVertex(Vertex),

    #[error("vertex {0} is not in the graph")]
    UnknownVertex(Vertex),

    #[error("edge {0} already exists")]
    DuplicateEdge(EdgeKey),

    #[error("edge {0} is not in the graph")]
    UnknownEdge(EdgeKey),

    /// The operation needs edge weights but the graph is in unweighted mode.
    #[error("operation requires a weighted graph")]
    UnweightedGraph,

    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// Kruskal ran out of edges before the spanning tree was complete.
    #[error("graph is disconnected")]
    DisconnectedGraph,

    #[error("no more neighbours")]
    ExhaustedIterator,

    /// A cursor was used after the graph it was created on changed shape.
    #[error("graph was modified while iterating")]
    ConcurrentModification,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        GraphError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
