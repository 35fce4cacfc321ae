use serde::Serialize;
use thiserror::Error;

/// Classes of algorithm failures.
///
/// Every failure is terminal for the run it belongs to; the caller resets and retries with
/// different input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Detected before any step is produced
    Configuration,
    /// Detected by the absence of expected result steps after full exploration
    Structural,
    /// Detected by a dedicated verification pass
    Numerical,
}

/// Reasons an algorithm run can fail. The `Display` text is shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize)]
pub enum AlgorithmError {
    #[error("Please select an end node for {algorithm}.")]
    MissingEndNode { algorithm: &'static str },

    #[error("{algorithm} requires an undirected graph, but the graph contains directed edges.")]
    RequiresUndirected { algorithm: &'static str },

    #[error("No path found between the selected nodes.")]
    NoPathFound,

    #[error("The graph is not connected, so no spanning tree reaches every node.")]
    NotConnected,

    #[error("Graph contains a negative cycle reachable from the start node.")]
    NegativeCycle,

    #[error("No cycle found in the graph.")]
    NoCycleFound,
}

impl AlgorithmError {
    /// Returns the class of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingEndNode { .. } | Self::RequiresUndirected { .. } => {
                ErrorKind::Configuration
            }
            Self::NoPathFound | Self::NotConnected | Self::NoCycleFound => ErrorKind::Structural,
            Self::NegativeCycle => ErrorKind::Numerical,
        }
    }
}
