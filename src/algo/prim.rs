/*!
Prim's algorithm for minimum spanning trees of undirected graphs.

The tree grows from the start node; each round adds the outside node with the smallest key,
i.e. the lightest edge connecting it to the tree. Tree membership *is* the visit sequence:
there is no separate result phase. If the tree stops growing before every node joined, the
graph is disconnected and the run fails with [`AlgorithmError::NotConnected`].
*/

use std::sync::Arc;

use fxhash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::*;

/// Spanning tree step generator
pub struct Prim {
    graph: Arc<GraphSnapshot>,
    order: Vec<NodeId>,
    key: FxHashMap<NodeId, Weight>,
    parent: FxHashMap<NodeId, NodeId>,
    outside: FxHashSet<NodeId>,
    tree_size: usize,
    rounds_left: usize,
}

impl Prim {
    /// Creates a new spanning tree search rooted at `start`
    pub fn new(graph: Arc<GraphSnapshot>, start: NodeId) -> Self {
        let order = node_universe(&graph, [start]);
        let outside = order.iter().copied().collect();

        let mut key = FxHashMap::default();
        key.insert(start, 0.0);

        Self {
            graph,
            rounds_left: order.len(),
            order,
            key,
            parent: FxHashMap::default(),
            outside,
            tree_size: 0,
        }
    }

    /// Number of nodes in the tree so far
    pub fn tree_size(&self) -> usize {
        self.tree_size
    }

    /// Returns *true* if every node joined the tree
    pub fn spans_all_nodes(&self) -> bool {
        self.tree_size == self.order.len()
    }
}

impl Iterator for Prim {
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rounds_left == 0 {
            return None;
        }
        self.rounds_left -= 1;

        let Some(u) = min_finite_in(&self.order, &self.outside, &self.key) else {
            self.rounds_left = 0;
            return None;
        };

        self.outside.remove(&u);
        self.tree_size += 1;

        let mut updated: SmallVec<[NodeId; 8]> = SmallVec::new();
        for e in self.graph.edges_of(u) {
            if self.outside.contains(&e.to) && e.weight < distance_of(&self.key, e.to) {
                self.key.insert(e.to, e.weight);
                self.parent.insert(e.to, u);
                updated.push(e.to);
            }
        }

        let edge = EdgeRef::new(self.parent.get(&u).copied().unwrap_or(NO_PREDECESSOR), u);
        let mut narration = match edge.predecessor() {
            None => format!("Start the tree at node {u}"),
            Some(p) => format!(
                "Add edge {p} - {u} (weight {}) to the tree",
                format_weight(distance_of(&self.key, u))
            ),
        };
        if !updated.is_empty() {
            narration.push_str(&format!(", update keys of {}", format_nodes(&updated)));
        }

        let trace = StepTrace::new(
            narration,
            AuxiliaryData::Keys(table_entries(&self.order, &self.key, &self.parent)),
        );
        Some(AlgorithmStep::visit(edge).with_trace(trace))
    }
}

impl StepSource for Prim {
    fn outcome(&self) -> Result<(), AlgorithmError> {
        if self.spans_all_nodes() {
            Ok(())
        } else {
            Err(AlgorithmError::NotConnected)
        }
    }
}

/// Minimum spanning tree of a connected undirected graph
#[derive(Debug, Copy, Clone, Default)]
pub struct PrimAdapter;

impl PrimAdapter {
    pub const METADATA: AlgorithmMetadata = AlgorithmMetadata {
        id: "prim",
        name: "Prim's MST",
        category: Category::Tree,
        description: "Grows a minimum spanning tree from the start node.",
        start_hint: "Select the node to grow the tree from.",
        end_hint: None,
        requirements: Requirements {
            weighted: true,
            undirected_only: true,
            connected_only: true,
        },
        failure_message: "The graph must be connected and undirected to build a spanning tree.",
    };
}

impl AlgorithmAdapter for PrimAdapter {
    fn metadata(&self) -> &AlgorithmMetadata {
        &Self::METADATA
    }

    fn generator(&self, input: &AlgorithmInput) -> Result<BoxedSteps, AlgorithmError> {
        self.metadata().validate(input)?;
        Ok(Box::new(Prim::new(Arc::clone(&input.graph), input.start_node)))
    }
}
