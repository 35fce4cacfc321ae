use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

use crate::node::*;

/// Orientation of a logical edge as drawn by the user
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeType {
    #[default]
    Directed,
    Undirected,
}

impl EdgeType {
    /// Returns *true* for [`EdgeType::Undirected`]
    pub fn is_undirected(&self) -> bool {
        matches!(self, EdgeType::Undirected)
    }
}

/// One adjacency entry of a snapshot.
///
/// An undirected logical edge is stored as two `EdgeInfo` records, one per direction,
/// with matching weight and type.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EdgeInfo {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
    pub edge_type: EdgeType,
}

impl EdgeInfo {
    /// Creates a new adjacency entry
    pub fn new(from: NodeId, to: NodeId, weight: Weight, edge_type: EdgeType) -> Self {
        Self {
            from,
            to,
            weight,
            edge_type,
        }
    }

    /// Returns the `(from, to)` pair of this entry
    pub fn edge_ref(&self) -> EdgeRef {
        EdgeRef::new(self.from, self.to)
    }

    /// Returns the entry pointing in the opposite direction
    pub fn reverse(&self) -> Self {
        Self::new(self.to, self.from, self.weight, self.edge_type)
    }

    /// Returns *true* if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }
}

/// A `(from, to)` pair used for step payloads and reconstructed paths.
///
/// `from == NO_PREDECESSOR` marks the starting node of an algorithm.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    pub from: NodeId,
    pub to: NodeId,
}

impl EdgeRef {
    /// Creates a new edge reference
    pub const fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }

    /// The synthetic edge `(-1, u)` announcing `u` as starting node
    pub const fn root(u: NodeId) -> Self {
        Self::new(NO_PREDECESSOR, u)
    }

    /// Returns *true* if this is a synthetic `(-1, u)` edge
    pub const fn is_root(&self) -> bool {
        self.from == NO_PREDECESSOR
    }

    /// Returns the predecessor or `None` for root edges
    pub const fn predecessor(&self) -> Option<NodeId> {
        predecessor(self.from)
    }

    /// Renderer key `"from-to"`
    pub fn key(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }

    /// Reverses the edge by switching the endpoints
    pub const fn reverse(&self) -> Self {
        Self::new(self.to, self.from)
    }
}

impl Display for EdgeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.from, self.to)
    }
}

impl Debug for EdgeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl From<(NodeId, NodeId)> for EdgeRef {
    fn from(value: (NodeId, NodeId)) -> Self {
        EdgeRef::new(value.0, value.1)
    }
}

impl From<&(NodeId, NodeId)> for EdgeRef {
    fn from(value: &(NodeId, NodeId)) -> Self {
        EdgeRef::new(value.0, value.1)
    }
}

impl From<&EdgeInfo> for EdgeRef {
    fn from(value: &EdgeInfo) -> Self {
        value.edge_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_edges() {
        let e = EdgeRef::root(4);
        assert!(e.is_root());
        assert_eq!(e.predecessor(), None);
        assert_eq!(e.key(), "-1-4");

        let e = EdgeRef::from((2, 4));
        assert!(!e.is_root());
        assert_eq!(e.predecessor(), Some(2));
        assert_eq!(e.key(), "2-4");
        assert_eq!(format!("{e}"), "(2,4)");
        assert_eq!(e.reverse(), EdgeRef::new(4, 2));
    }

    #[test]
    fn edge_info_reverse() {
        let e = EdgeInfo::new(1, 2, 3.5, EdgeType::Undirected);
        let r = e.reverse();
        assert_eq!(r.edge_ref(), EdgeRef::new(2, 1));
        assert_eq!(r.weight, 3.5);
        assert!(r.edge_type.is_undirected());
        assert!(!e.is_loop());
        assert!(EdgeInfo::new(1, 1, 1.0, EdgeType::Directed).is_loop());
    }
}
