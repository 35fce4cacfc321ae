/*!
# Graph Snapshot

A [`GraphSnapshot`] is the read-only adjacency representation every algorithm consumes.
It is built fresh per run from the live editor state and never mutated by an algorithm.

Two properties matter to the algorithms:
- **Order**: nodes are kept in insertion order and so are the entries of each adjacency list.
  Neighbor enumeration, tie-breaks and the choice of restart nodes all follow this order, which
  makes every algorithm deterministic for a given snapshot.
- **Undirected edges** are stored as two [`EdgeInfo`] records (one per direction) with matching
  weight and type. Algorithms therefore never special-case undirectedness beyond honoring
  [`EdgeType`] where an algorithm explicitly asks for it.

# Examples
```
use graphtrace::prelude::*;

let mut graph = GraphSnapshot::new();
graph.add_edge(1, 2, 4.0, EdgeType::Undirected);
graph.add_edge(2, 3, 1.0, EdgeType::Directed);

assert_eq!(graph.number_of_nodes(), 3);
assert_eq!(graph.number_of_edges(), 3);
assert_eq!(graph.edges_of(2).len(), 2);
assert!(!graph.is_all_undirected());
```
*/

use fxhash::FxHashMap;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::{edge::*, node::*};

/// Adjacency list of a single node. Most drawn graphs have a handful of neighbors per node.
pub type Neighborhood = SmallVec<[EdgeInfo; 4]>;

/// Immutable-per-run adjacency representation of a drawn graph
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    order: Vec<NodeId>,
    adjacency: FxHashMap<NodeId, Neighborhood>,
}

impl GraphSnapshot {
    /// Creates an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot with the given isolated nodes
    pub fn with_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut graph = Self::new();
        for u in nodes {
            graph.add_node(u);
        }
        graph
    }

    /// Creates a snapshot from a node list and a list of `(from, to, weight)` triples that all
    /// share the same [`EdgeType`].
    /// Endpoints not listed in `nodes` are added in order of first appearance.
    pub fn from_edges<N, E>(nodes: N, edges: E, edge_type: EdgeType) -> Self
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = (NodeId, NodeId, Weight)>,
    {
        let mut graph = Self::with_nodes(nodes);
        for (u, v, w) in edges {
            graph.add_edge(u, v, w, edge_type);
        }
        graph
    }

    /// Adds an isolated node and returns *true* if it was not present before
    pub fn add_node(&mut self, u: NodeId) -> bool {
        debug_assert_ne!(u, NO_PREDECESSOR, "-1 is reserved as sentinel");
        if self.adjacency.contains_key(&u) {
            return false;
        }

        self.adjacency.insert(u, Neighborhood::new());
        self.order.push(u);
        true
    }

    /// Adds a logical edge. Missing endpoints are added as nodes.
    ///
    /// An [`EdgeType::Undirected`] edge is stored as two records, `from -> to` and `to -> from`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight, edge_type: EdgeType) {
        self.add_node(from);
        self.add_node(to);

        let info = EdgeInfo::new(from, to, weight, edge_type);
        self.push_record(info);
        if edge_type.is_undirected() {
            self.push_record(info.reverse());
        }
    }

    /// Adds many logical edges of the same type with [`DEFAULT_WEIGHT`]
    pub fn add_unweighted_edges<I, E>(&mut self, edges: I, edge_type: EdgeType)
    where
        I: IntoIterator<Item = E>,
        E: Into<EdgeRef>,
    {
        for e in edges {
            let EdgeRef { from, to } = e.into();
            self.add_edge(from, to, DEFAULT_WEIGHT, edge_type);
        }
    }

    fn push_record(&mut self, info: EdgeInfo) {
        if let Some(neighborhood) = self.adjacency.get_mut(&info.from) {
            neighborhood.push(info);
        }
    }

    /// Returns the number of nodes
    pub fn number_of_nodes(&self) -> usize {
        self.order.len()
    }

    /// Returns the number of stored adjacency records (undirected edges count twice)
    pub fn number_of_edges(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum()
    }

    /// Returns *true* if the snapshot has no nodes
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns all nodes in insertion order
    pub fn nodes(&self) -> &[NodeId] {
        &self.order
    }

    /// Returns *true* if `u` is a node of the snapshot
    pub fn contains_node(&self, u: NodeId) -> bool {
        self.adjacency.contains_key(&u)
    }

    /// Returns the outgoing adjacency entries of `u` in insertion order.
    /// Unknown nodes have no edges.
    pub fn edges_of(&self, u: NodeId) -> &[EdgeInfo] {
        self.adjacency
            .get(&u)
            .map(|n| n.as_slice())
            .unwrap_or_default()
    }

    /// Returns an iterator over the out-neighbors of `u`
    pub fn neighbors_of(&self, u: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges_of(u).iter().map(|e| e.to)
    }

    /// Returns all adjacency records, flattened in node order
    pub fn edges(&self) -> impl Iterator<Item = &EdgeInfo> + '_ {
        self.order.iter().flat_map(|&u| self.edges_of(u).iter())
    }

    /// Returns the smallest weight among the `from -> to` records, if any
    pub fn weight_of(&self, from: NodeId, to: NodeId) -> Option<Weight> {
        self.edges_of(from)
            .iter()
            .filter(|e| e.to == to)
            .map(|e| e.weight)
            .reduce(Weight::min)
    }

    /// Returns *true* if every stored record is [`EdgeType::Undirected`].
    /// A snapshot without edges is trivially undirected.
    pub fn is_all_undirected(&self) -> bool {
        self.edges().all(|e| e.edge_type.is_undirected())
    }

    /// Returns *true* if some edge carries a weight other than [`DEFAULT_WEIGHT`]
    pub fn is_weighted(&self) -> bool {
        self.edges().any(|e| e.weight != DEFAULT_WEIGHT)
    }

    /// Returns *true* if some edge has a negative weight
    pub fn has_negative_weights(&self) -> bool {
        self.edges().any(|e| e.weight < 0.0)
    }

    /// Returns the distinct `(from, to)` pairs of all records in node order
    pub fn edge_refs(&self) -> Vec<EdgeRef> {
        self.edges().map(EdgeInfo::edge_ref).unique().collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_kept() {
        let mut graph = GraphSnapshot::with_nodes([5, 3, 9]);
        graph.add_edge(9, 1, 2.0, EdgeType::Directed);
        graph.add_edge(5, 9, 1.0, EdgeType::Directed);
        graph.add_edge(5, 3, 1.0, EdgeType::Directed);

        assert_eq!(graph.nodes(), &[5, 3, 9, 1]);
        assert_eq!(graph.neighbors_of(5).collect_vec(), vec![9, 3]);
        assert_eq!(
            graph.edge_refs(),
            vec![EdgeRef::new(5, 9), EdgeRef::new(5, 3), EdgeRef::new(9, 1)]
        );
    }

    #[test]
    fn undirected_edges_are_stored_twice() {
        let mut graph = GraphSnapshot::new();
        graph.add_edge(1, 2, 7.0, EdgeType::Undirected);

        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.weight_of(1, 2), Some(7.0));
        assert_eq!(graph.weight_of(2, 1), Some(7.0));
        assert!(graph.is_all_undirected());
        assert!(graph.is_weighted());
        assert!(!graph.has_negative_weights());
    }

    #[test]
    fn unknown_nodes_have_no_edges() {
        let graph = GraphSnapshot::with_nodes([1]);
        assert!(graph.edges_of(42).is_empty());
        assert!(!graph.contains_node(42));
        assert!(graph.contains_node(1));
        assert!(graph.is_all_undirected());
        assert!(!graph.is_weighted());
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut graph = GraphSnapshot::new();
        assert!(graph.add_node(1));
        assert!(!graph.add_node(1));
        assert_eq!(graph.number_of_nodes(), 1);

        graph.add_unweighted_edges([(1, 2), (2, 3)], EdgeType::Directed);
        assert_eq!(graph.nodes(), &[1, 2, 3]);
        assert_eq!(graph.weight_of(2, 3), Some(DEFAULT_WEIGHT));
    }
}
