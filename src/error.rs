use core::fmt;

/// Result alias for `louvain`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by community detection and modularity scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The graph has nodes but zero total edge weight, so modularity is undefined.
    DegenerateGraph {
        /// Number of nodes in the offending graph.
        nodes: usize,
    },

    /// A partition handed to [`modularity`](crate::modularity) is not a valid
    /// cover of the graph's nodes.
    InvalidPartition {
        /// What is wrong with the partition.
        reason: PartitionDefect,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

/// Ways in which a partition can fail to cover a graph exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionDefect {
    /// A community references a node index the graph does not have.
    UnknownNode {
        /// Offending node index.
        node: usize,
    },
    /// A node appears more than once across the partition.
    DuplicateNode {
        /// Offending node index.
        node: usize,
    },
    /// A graph node is not in any community.
    MissingNode {
        /// Offending node index.
        node: usize,
    },
    /// A community has no members.
    EmptyCommunity {
        /// Position of the community in the partition.
        community: usize,
    },
}

impl fmt::Display for PartitionDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionDefect::UnknownNode { node } => write!(f, "node {node} is not in the graph"),
            PartitionDefect::DuplicateNode { node } => {
                write!(f, "node {node} appears in more than one place")
            }
            PartitionDefect::MissingNode { node } => {
                write!(f, "node {node} is not assigned to any community")
            }
            PartitionDefect::EmptyCommunity { community } => {
                write!(f, "community {community} is empty")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DegenerateGraph { nodes } => {
                write!(f, "graph with {nodes} nodes has zero total edge weight")
            }
            Error::InvalidPartition { reason } => write!(f, "invalid partition: {reason}"),
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
