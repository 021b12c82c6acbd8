/*!
# Errors

All fallible operations return [`Result`] with a [`GraphError`]. The set of variants is closed;
[`GraphError::kind`] groups them into the coarse [`ErrorKind`]s callers usually match on.
Errors are raised at the point of detection and never swallowed or retried inside the crate.
*/

use std::fmt::Debug;

use thiserror::Error;

use crate::ops::GraphKind;

pub type Result<T, E = GraphError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A node id was referenced that is not in the graph
    #[error("node {node} is not in the graph")]
    NodeNotFound { node: String },

    /// An edge was referenced that is not in the graph
    #[error("edge {u}-{v} is not in the graph")]
    EdgeNotFound { u: String, v: String },

    /// The question is ill-posed for this input (e.g. connectivity of the null graph)
    #[error("{0}")]
    PointlessConcept(String),

    /// The operation does not support this kind of graph
    #[error("`{operation}` is not implemented for {kind} graphs")]
    NotImplementedForKind {
        operation: &'static str,
        kind: GraphKind,
    },

    /// A well-posed search did not find the required solution
    #[error("{0}")]
    Unfeasible(String),

    /// The optimization problem has no finite optimum
    #[error("{0}")]
    Unbounded(String),

    /// Any other unexpected outcome
    #[error("{0}")]
    Algorithm(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    PointlessConcept,
    NotImplementedForKind,
    Unfeasible,
    Unbounded,
    AlgorithmError,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::NodeNotFound { .. } | GraphError::EdgeNotFound { .. } => {
                ErrorKind::NotFound
            }
            GraphError::PointlessConcept(_) => ErrorKind::PointlessConcept,
            GraphError::NotImplementedForKind { .. } => ErrorKind::NotImplementedForKind,
            GraphError::Unfeasible(_) => ErrorKind::Unfeasible,
            GraphError::Unbounded(_) => ErrorKind::Unbounded,
            GraphError::Algorithm(_) => ErrorKind::AlgorithmError,
        }
    }

    pub fn node_not_found<N: Debug + ?Sized>(node: &N) -> Self {
        GraphError::NodeNotFound {
            node: format!("{node:?}"),
        }
    }

    pub fn edge_not_found<N: Debug + ?Sized>(u: &N, v: &N) -> Self {
        GraphError::EdgeNotFound {
            u: format!("{u:?}"),
            v: format!("{v:?}"),
        }
    }

    pub fn not_implemented(operation: &'static str, kind: GraphKind) -> Self {
        GraphError::NotImplementedForKind { operation, kind }
    }

    pub fn pointless(msg: impl Into<String>) -> Self {
        GraphError::PointlessConcept(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_messages() {
        let e = GraphError::node_not_found(&"a");
        assert_eq!(e.kind(), ErrorKind::NotFound);
        assert_eq!(e.to_string(), "node \"a\" is not in the graph");

        let e = GraphError::edge_not_found(&1, &2);
        assert_eq!(e.kind(), ErrorKind::NotFound);
        assert_eq!(e.to_string(), "edge 1-2 is not in the graph");

        let e = GraphError::not_implemented("bridges", GraphKind::DIRECTED);
        assert_eq!(e.kind(), ErrorKind::NotImplementedForKind);
        assert_eq!(e.to_string(), "`bridges` is not implemented for directed graphs");

        assert_eq!(
            GraphError::pointless("null graph").kind(),
            ErrorKind::PointlessConcept
        );
    }
}
