/*!
Graph traversal algorithms.

This module provides:
- The [`NodeSequencer`] abstraction over the traversal frontier. A [`VecDeque`] yields
  breadth-first order, a [`Vec`] yields depth-first order.
- The generic [`TraversalSearch`] step generator, with the type aliases [`Bfs`] and [`Dfs`].
- The [`BfsAdapter`] and [`DfsAdapter`] adapters for the registry.

A traversal emits exactly one [`StepType::Visit`] step per reachable node. Nodes are marked as
seen when they are *pushed* onto the frontier, so no node is ever pushed twice. Unreachable
nodes never appear, and there is no result path since a traversal has no distinguished
terminal.
*/

use std::{collections::VecDeque, sync::Arc};

use fxhash::FxHashSet;
use smallvec::SmallVec;

use super::*;

/// Abstraction for the traversal frontier data structure.
///
/// A `NodeSequencer` is responsible for storing the "to be visited"
/// edges during a traversal. Different implementations determine
/// the traversal order:
///
/// - [`VecDeque`] -> queue semantics -> **BFS**
/// - [`Vec`] -> stack semantics -> **DFS**
pub trait NodeSequencer<T> {
    /// Name of the data structure used in narrations
    const NAME: &'static str;

    /// Creates a new sequencer initialized with a single item.
    fn init(u: T) -> Self;

    /// Pushes an item into the frontier.
    fn push(&mut self, item: T);

    /// Pushes the outgoing edges of a node, given in adjacency order, such that the first one
    /// is processed first among them.
    fn push_neighbors<I>(&mut self, items: I)
    where
        I: DoubleEndedIterator<Item = T>,
    {
        for item in items {
            self.push(item);
        }
    }

    /// Removes and returns the next item from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;

    /// Drops all pending items.
    fn clear(&mut self);

    /// Snapshot of the frontier for display
    fn snapshot(&self) -> AuxiliaryData;
}

impl NodeSequencer<EdgeRef> for VecDeque<EdgeRef> {
    const NAME: &'static str = "queue";

    fn init(u: EdgeRef) -> Self {
        Self::from(vec![u])
    }
    fn push(&mut self, u: EdgeRef) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<EdgeRef> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
    fn clear(&mut self) {
        VecDeque::clear(self)
    }
    fn snapshot(&self) -> AuxiliaryData {
        AuxiliaryData::Queue(self.iter().map(|e| e.to).collect())
    }
}

impl NodeSequencer<EdgeRef> for Vec<EdgeRef> {
    const NAME: &'static str = "stack";

    fn init(u: EdgeRef) -> Self {
        vec![u]
    }
    fn push(&mut self, u: EdgeRef) {
        Vec::push(self, u)
    }

    /// Pushes in reverse order so that the first-listed neighbor ends up on top
    fn push_neighbors<I>(&mut self, items: I)
    where
        I: DoubleEndedIterator<Item = EdgeRef>,
    {
        for item in items.rev() {
            Vec::push(self, item);
        }
    }

    fn pop(&mut self) -> Option<EdgeRef> {
        Vec::pop(self)
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
    fn clear(&mut self) {
        Vec::clear(self)
    }
    fn snapshot(&self) -> AuxiliaryData {
        AuxiliaryData::Stack(self.iter().map(|e| e.to).collect())
    }
}

/// Generic traversal step generator supporting BFS and DFS variants.
///
/// Maintains an explicit frontier (queue or stack) of `(from, to)` pairs, seeded with
/// `(-1, start)`, and a set of seen nodes. Every popped pair becomes the next
/// [`StepType::Visit`] step.
pub struct TraversalSearch<S>
where
    S: NodeSequencer<EdgeRef>,
{
    graph: Arc<GraphSnapshot>,
    seen: FxHashSet<NodeId>,
    sequencer: S,
    stop_at: Option<NodeId>,
}

/// A **breadth-first search** step generator using a queue (`VecDeque`).
pub type Bfs = TraversalSearch<VecDeque<EdgeRef>>;

/// A **depth-first search** step generator using a stack (`Vec`).
pub type Dfs = TraversalSearch<Vec<EdgeRef>>;

impl<S> TraversalSearch<S>
where
    S: NodeSequencer<EdgeRef>,
{
    /// Creates a new traversal starting from `start`.
    pub fn new(graph: Arc<GraphSnapshot>, start: NodeId) -> Self {
        let mut seen = FxHashSet::default();
        seen.insert(start);
        Self {
            graph,
            seen,
            sequencer: S::init(EdgeRef::root(start)),
            stop_at: None,
        }
    }

    /// Sets a stopper node. If this node is reached, the iterator returns its visit and
    /// afterwards only `None`.
    pub fn set_stop_at(&mut self, stopper: NodeId) {
        self.stop_at = Some(stopper);
    }

    /// Sets a stopper node. If this node is reached, the iterator returns its visit and
    /// afterwards only `None`.
    pub fn stop_at(mut self, stopper: NodeId) -> Self {
        self.set_stop_at(stopper);
        self
    }

    /// Returns *true* if `u` has been pushed onto the frontier at some point
    pub fn did_see_node(&self, u: NodeId) -> bool {
        self.seen.contains(&u)
    }

    /// Returns the current frontier
    pub fn frontier(&self) -> AuxiliaryData {
        self.sequencer.snapshot()
    }

    fn narration(&self, edge: &EdgeRef, discovered: &[NodeId]) -> String {
        let mut text = match edge.predecessor() {
            None => format!("Start at node {}", edge.to),
            Some(p) => format!("Visit node {} from node {p}", edge.to),
        };
        if !discovered.is_empty() {
            text.push_str(&format!(
                ", push {} onto the {}",
                format_nodes(discovered),
                S::NAME
            ));
        }
        text
    }
}

impl<S> Iterator for TraversalSearch<S>
where
    S: NodeSequencer<EdgeRef>,
{
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<Self::Item> {
        let popped = self.sequencer.pop()?;
        let u = popped.to;

        let mut discovered: SmallVec<[EdgeRef; 8]> = SmallVec::new();
        if self.stop_at == Some(u) {
            self.sequencer.clear();
        } else {
            for e in self.graph.edges_of(u) {
                if self.seen.insert(e.to) {
                    discovered.push(EdgeRef::new(u, e.to));
                }
            }
            self.sequencer.push_neighbors(discovered.iter().copied());
        }

        let discovered_nodes: SmallVec<[NodeId; 8]> = discovered.iter().map(|e| e.to).collect();
        let trace = StepTrace::new(
            self.narration(&popped, &discovered_nodes),
            self.sequencer.snapshot(),
        );

        Some(AlgorithmStep::visit(popped).with_trace(trace))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // a stopper may drop the remaining frontier
        let lower = match self.stop_at {
            Some(_) => self.sequencer.cardinality().min(1),
            None => self.sequencer.cardinality(),
        };
        (
            lower,
            Some(
                self.graph
                    .number_of_nodes()
                    .saturating_sub(self.seen.len())
                    + self.sequencer.cardinality()
                    + 1,
            ),
        )
    }
}

impl<S> StepSource for TraversalSearch<S>
where
    S: NodeSequencer<EdgeRef>,
{
    fn outcome(&self) -> Result<(), AlgorithmError> {
        Ok(())
    }
}

/// Breadth-first traversal from the start node
#[derive(Debug, Copy, Clone, Default)]
pub struct BfsAdapter;

/// Depth-first traversal from the start node
#[derive(Debug, Copy, Clone, Default)]
pub struct DfsAdapter;

impl BfsAdapter {
    pub const METADATA: AlgorithmMetadata = AlgorithmMetadata {
        id: "bfs",
        name: "Breadth-First Search",
        category: Category::Traversal,
        description: "Visits nodes level by level, closest to the start node first.",
        start_hint: "Select the node to start the traversal from.",
        end_hint: None,
        requirements: Requirements {
            weighted: false,
            undirected_only: false,
            connected_only: false,
        },
        failure_message: "The traversal could not be completed.",
    };
}

impl DfsAdapter {
    pub const METADATA: AlgorithmMetadata = AlgorithmMetadata {
        id: "dfs",
        name: "Depth-First Search",
        category: Category::Traversal,
        description: "Follows each branch as deep as possible before backtracking.",
        start_hint: "Select the node to start the traversal from.",
        end_hint: None,
        requirements: Requirements {
            weighted: false,
            undirected_only: false,
            connected_only: false,
        },
        failure_message: "The traversal could not be completed.",
    };
}

impl AlgorithmAdapter for BfsAdapter {
    fn metadata(&self) -> &AlgorithmMetadata {
        &Self::METADATA
    }

    fn generator(&self, input: &AlgorithmInput) -> Result<BoxedSteps, AlgorithmError> {
        self.metadata().validate(input)?;
        Ok(Box::new(Bfs::new(Arc::clone(&input.graph), input.start_node)))
    }
}

impl AlgorithmAdapter for DfsAdapter {
    fn metadata(&self) -> &AlgorithmMetadata {
        &Self::METADATA
    }

    fn generator(&self, input: &AlgorithmInput) -> Result<BoxedSteps, AlgorithmError> {
        self.metadata().validate(input)?;
        Ok(Box::new(Dfs::new(Arc::clone(&input.graph), input.start_node)))
    }
}
