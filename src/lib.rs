/*!
`graphtrace` runs classical graph algorithms as sequences of discrete, replayable steps so that
their progress can be visualized and inspected step by step.

# Representation

Nodes are identified by arbitrary `i64` ids ([`NodeId`](crate::node::NodeId)); the value `-1`
is reserved for the synthetic predecessor of a start node. Algorithms work on an immutable
[`GraphSnapshot`](crate::snapshot::GraphSnapshot) that keeps nodes in insertion order and
neighbors in edge insertion order, which makes every run deterministic.

An undirected edge is stored once per direction; a directed edge only in its orientation.

# Design

Every algorithm is an [`AlgorithmAdapter`](crate::algo::AlgorithmAdapter) offering two views of
the same run:
- `generator` returns a lazy iterator of [`AlgorithmStep`](crate::algo::AlgorithmStep)s,
- `execute` drains that iterator into an [`AlgorithmResult`](crate::algo::AlgorithmResult).

Both views always agree. Failures are values, never panics.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges and the graph snapshot,
- [`algo`] includes the adapters (BFS, DFS, BFS/DFS pathfinding, Dijkstra, Bellman-Ford, Prim,
  cycle detection) and the step model,
- [`replay`] turns steps into per-node and per-edge annotations, in auto mode or step by step,
- [`registry`] lists the available adapters for selectors.

[`gens`] generates random and deterministic snapshots for tests and demos.

In most use-cases, `use graphtrace::{prelude::*, algo::*, replay::*};` suffices for your needs.

```
use std::sync::Arc;
use graphtrace::{prelude::*, algo::*};

let mut graph = GraphSnapshot::new();
graph.add_edge(1, 2, 4.0, EdgeType::Undirected);
graph.add_edge(1, 3, 1.0, EdgeType::Undirected);
graph.add_edge(3, 2, 1.0, EdgeType::Undirected);

let input = AlgorithmInput::new(Arc::new(graph), 1).with_end_node(2);
let result = DijkstraAdapter.execute(&input);

assert!(result.is_ok());
assert_eq!(result.path_nodes(), vec![1, 3, 2]);
```
*/

pub mod algo;
pub mod edge;
pub mod gens;
pub mod node;
pub mod registry;
pub mod replay;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testing;

pub mod prelude {
    pub use super::{edge::*, node::*, snapshot::*};
}
