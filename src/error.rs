/*!
# Errors

A single error enum shared by graph stores, collections and algorithms.

Read accessors that take a vertex follow the convention of the capability traits in
[`crate::ops`]: the plain accessor panics on a missing vertex (documented with
`** Panics ... **`) while the `try_` variant returns an `Option`. Everything that can fail
for reasons other than a caller bug returns [`Result`].
*/

use thiserror::Error;

/// Errors raised by graph operations, collections and algorithms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("vertex not found in graph")]
    VertexNotFound,

    #[error("edge not found in graph")]
    EdgeNotFound,

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("graph is not acyclic")]
    NonAcyclicGraph,

    #[error("edge has a negative weight")]
    NegativeWeight,

    #[error("edge has a negative capacity")]
    NegativeCapacity,

    #[error("graph contains a negative cycle")]
    NegativeCycleGraph,

    #[error("no path found between the given vertices")]
    NoPathFound,

    #[error("parallel edges are not allowed in this graph")]
    ParallelEdgeNotAllowed,

    #[error("queue is empty")]
    EmptyQueue,
}

impl GraphError {
    pub(crate) fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(GraphError::EmptyQueue.to_string(), "queue is empty");
        assert_eq!(
            GraphError::invalid_operation("root vertex not set").to_string(),
            "invalid operation: root vertex not set"
        );
        assert_eq!(
            GraphError::invalid_argument("source equals sink").to_string(),
            "invalid argument: source equals sink"
        );
    }
}
