/*!
# Substructure Generators

Deterministic **paths**, **cycles** and **cliques** added to an existing [`GraphSnapshot`].
All edges get [`DEFAULT_WEIGHT`]; missing endpoints are added to the snapshot in order of
first appearance.

# Example

```rust
use graphtrace::{prelude::*, gens::*};

let mut g = GraphSnapshot::new();
g.connect_path([1, 2, 3], EdgeType::Directed);
g.connect_cycle([3, 4, 5], EdgeType::Undirected);

assert_eq!(g.nodes(), &[1, 2, 3, 4, 5]);
assert_eq!(g.neighbors_of(3).collect::<Vec<_>>(), vec![4, 5]);
```
*/

use itertools::Itertools;

use super::*;

/// Trait for creating additional **substructures** (paths, cycles, cliques)
/// inside an already existing snapshot.
pub trait GeneratorSubstructures {
    /// Connects the given nodes in order with a **simple path**.
    fn connect_path<P>(&mut self, nodes_on_path: P, edge_type: EdgeType)
    where
        P: IntoIterator<Item = NodeId>;

    /// Connects the given nodes with a **cycle**: consecutive nodes are connected, and the
    /// last node is connected back to the first. A single node gets a self-loop.
    fn connect_cycle<C>(&mut self, nodes_in_cycle: C, edge_type: EdgeType)
    where
        C: IntoIterator<Item = NodeId>;

    /// Connects all given nodes into a **clique** without self-loops.
    /// Directed cliques get both orientations of every pair.
    fn connect_clique(&mut self, nodes: &[NodeId], edge_type: EdgeType);
}

impl GeneratorSubstructures for GraphSnapshot {
    fn connect_path<P>(&mut self, nodes_on_path: P, edge_type: EdgeType)
    where
        P: IntoIterator<Item = NodeId>,
    {
        for (u, v) in nodes_on_path.into_iter().tuple_windows() {
            self.add_edge(u, v, DEFAULT_WEIGHT, edge_type);
        }
    }

    fn connect_cycle<C>(&mut self, nodes_in_cycle: C, edge_type: EdgeType)
    where
        C: IntoIterator<Item = NodeId>,
    {
        let mut iter = nodes_in_cycle.into_iter();

        if let Some(first) = iter.next() {
            let mut prev = first;
            for cur in iter {
                self.add_edge(prev, cur, DEFAULT_WEIGHT, edge_type);
                prev = cur;
            }

            self.add_edge(prev, first, DEFAULT_WEIGHT, edge_type);
        }
    }

    fn connect_clique(&mut self, nodes: &[NodeId], edge_type: EdgeType) {
        for (i, &u) in nodes.iter().enumerate() {
            for (j, &v) in nodes.iter().enumerate() {
                if i == j || (edge_type.is_undirected() && j < i) {
                    continue;
                }
                self.add_edge(u, v, DEFAULT_WEIGHT, edge_type);
            }
        }
    }
}
