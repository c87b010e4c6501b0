/*!
# Errors

All fallible operations of this crate return [`Result`].
Errors are grouped into three kinds (see [`ErrorKind`]) so callers can tell apart
*bad input* (e.g. a node that is not part of the graph), a *violated precondition*
(e.g. a disconnected graph where connectivity is required) and an *internal
inconsistency* (e.g. an auxiliary digraph that was not built for node connectivity).
*/

use thiserror::Error;

use crate::node::Node;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed arguments that can never be valid for this graph
    BadInput,
    /// The arguments are well-formed but the graph does not satisfy a structural requirement
    Precondition,
    /// A derived structure handed back to the crate is inconsistent
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("node {0} is not in the graph")]
    NodeNotFound(Node),

    #[error("source and sink are the same node ({0})")]
    SourceIsSink(Node),

    #[error("both source and target must be specified")]
    MissingEndpoint,

    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("input graph is not connected")]
    NotConnected,

    #[error("not implemented for {0} graphs")]
    NotImplementedFor(&'static str),

    #[error("infinite capacity path, flow unbounded above")]
    Unbounded,

    #[error("no path between {0} and {1}")]
    NoPath(Node, Node),

    #[error("invalid auxiliary digraph: {0}")]
    InvalidAuxiliary(&'static str),
}

impl Error {
    /// Returns the [`ErrorKind`] of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NodeNotFound(_)
            | Error::SourceIsSink(_)
            | Error::MissingEndpoint
            | Error::InvalidParameter(_) => ErrorKind::BadInput,
            Error::NotConnected
            | Error::NotImplementedFor(_)
            | Error::Unbounded
            | Error::NoPath(_, _) => ErrorKind::Precondition,
            Error::InvalidAuxiliary(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
