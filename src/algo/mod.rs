/*!
# Graph Algorithms

This module defines the contract every algorithm adapter implements, and provides the
adapters themselves:

| Adapter | Category | Step kinds |
|---|---|---|
| [`BfsAdapter`], [`DfsAdapter`] | Traversal | `Visit` |
| [`BfsPathAdapter`], [`DfsPathAdapter`] | Pathfinding | `Visit`, `Result` |
| [`DijkstraAdapter`], [`BellmanFordAdapter`] | Pathfinding | `Visit`, `Result` |
| [`PrimAdapter`] | Tree | `Visit` |
| [`CycleDetectionAdapter`] | Traversal | `Visit`, `Cycle` |

All algorithms are written once, as explicit state machines implementing [`StepSource`]
(an [`Iterator`] over [`AlgorithmStep`]s). They can be consumed lazily (auto mode animation)
or drained eagerly ([`AlgorithmAdapter::execute`], step-through history). Since `execute` is
nothing but draining the generator and bucketing by step type, both forms can never diverge.

```
use std::sync::Arc;
use graphtrace::{prelude::*, algo::*};

let mut graph = GraphSnapshot::new();
graph.add_edge(1, 2, 2.0, EdgeType::Directed);
graph.add_edge(2, 3, 3.0, EdgeType::Directed);
graph.add_edge(1, 3, 10.0, EdgeType::Directed);

let input = AlgorithmInput::new(Arc::new(graph), 1).with_end_node(3);
let result = DijkstraAdapter.execute(&input);

assert!(result.error.is_none());
assert_eq!(result.path_nodes(), vec![1, 2, 3]);
```
*/

mod bellman_ford;
mod cycle;
mod dijkstra;
mod error;
mod path;
mod pathfinding;
mod prim;
mod step;
mod traversal;

use std::sync::Arc;

use fxhash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::prelude::*;

pub use bellman_ford::*;
pub use cycle::*;
pub use dijkstra::*;
pub use error::*;
pub use path::*;
pub use pathfinding::*;
pub use prim::*;
pub use step::*;
pub use traversal::*;

/// Coarse grouping used by UI selectors
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Traversal,
    Pathfinding,
    Tree,
}

/// Graph properties an algorithm expects
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Requirements {
    /// Weights influence the outcome
    pub weighted: bool,
    /// Directed edges are rejected before the run
    pub undirected_only: bool,
    /// Disconnected graphs make the run fail
    pub connected_only: bool,
}

/// Static description of an adapter
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmMetadata {
    /// Unique registry key
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    pub category: Category,
    /// One-line description shown next to the selector
    pub description: &'static str,
    /// Hint shown while the user picks the start node
    pub start_hint: &'static str,
    /// Hint shown while the user picks the end node (pathfinding only)
    pub end_hint: Option<&'static str>,
    pub requirements: Requirements,
    /// Message shown when a run fails without a more specific error
    pub failure_message: &'static str,
}

impl AlgorithmMetadata {
    /// Returns *true* if the adapter needs an end node
    pub fn needs_end_node(&self) -> bool {
        self.category == Category::Pathfinding
    }

    /// Checks the configuration errors that must be reported before any step is produced.
    ///
    /// # Errors
    /// - [`AlgorithmError::MissingEndNode`] for pathfinding adapters without end node,
    /// - [`AlgorithmError::RequiresUndirected`] if the adapter only supports undirected
    ///   graphs but the snapshot contains a directed edge.
    pub fn validate(&self, input: &AlgorithmInput) -> Result<(), AlgorithmError> {
        if self.needs_end_node() && input.end_node.is_none() {
            return Err(AlgorithmError::MissingEndNode {
                algorithm: self.name,
            });
        }

        if self.requirements.undirected_only && !input.graph.is_all_undirected() {
            return Err(AlgorithmError::RequiresUndirected {
                algorithm: self.name,
            });
        }

        Ok(())
    }
}

/// Everything an algorithm run gets to see
#[derive(Debug, Clone)]
pub struct AlgorithmInput {
    pub graph: Arc<GraphSnapshot>,
    pub start_node: NodeId,
    pub end_node: Option<NodeId>,
}

impl AlgorithmInput {
    /// Creates an input without end node
    pub fn new(graph: Arc<GraphSnapshot>, start_node: NodeId) -> Self {
        Self {
            graph,
            start_node,
            end_node: None,
        }
    }

    /// Sets the end node
    pub fn set_end_node(&mut self, end_node: NodeId) {
        self.end_node = Some(end_node);
    }

    /// Sets the end node
    pub fn with_end_node(mut self, end_node: NodeId) -> Self {
        self.set_end_node(end_node);
        self
    }

    /// Returns the end node or a configuration error naming `algorithm`
    pub fn require_end_node(&self, algorithm: &'static str) -> Result<NodeId, AlgorithmError> {
        self.end_node
            .ok_or(AlgorithmError::MissingEndNode { algorithm })
    }
}

/// Returns the snapshot's nodes in order, followed by every node of `extra` the snapshot does
/// not know
pub(crate) fn node_universe<I>(graph: &GraphSnapshot, extra: I) -> Vec<NodeId>
where
    I: IntoIterator<Item = NodeId>,
{
    let mut nodes = graph.nodes().to_vec();
    for u in extra {
        if !graph.contains_node(u) && !nodes.contains(&u) {
            nodes.push(u);
        }
    }
    nodes
}

/// A lazily evaluated, finite sequence of steps.
///
/// Once the iterator is exhausted, [`StepSource::outcome`] reports whether the run succeeded.
/// Failures are never signalled by panicking: a failed run simply yields no
/// [`StepType::Result`] or [`StepType::Cycle`] steps and reports the reason afterwards.
pub trait StepSource: Iterator<Item = AlgorithmStep> {
    /// Reports the outcome of the run.
    ///
    /// Only meaningful after the iterator returned `None`; before that it describes the state
    /// reached so far.
    fn outcome(&self) -> Result<(), AlgorithmError>;
}

/// Type-erased step generator as returned by [`AlgorithmAdapter::generator`]
pub type BoxedSteps = Box<dyn StepSource>;

/// Fully materialized outcome of a run
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlgorithmResult {
    /// Edges of all [`StepType::Visit`] steps in order
    pub visited_edges: Vec<EdgeRef>,
    /// Edges of all [`StepType::Result`] or [`StepType::Cycle`] steps in order
    pub result_edges: Vec<EdgeRef>,
    /// `Some(StepType::Cycle)` if `result_edges` describe a cycle
    pub result_step_type: Option<StepType>,
    pub error: Option<AlgorithmError>,
}

impl AlgorithmResult {
    /// A run that failed before producing any step
    pub fn failed(error: AlgorithmError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    /// Buckets steps by their type
    pub fn from_steps<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = AlgorithmStep>,
    {
        let mut result = Self::default();
        for step in steps {
            match step.step_type {
                StepType::Visit => result.visited_edges.push(step.edge),
                StepType::Result => result.result_edges.push(step.edge),
                StepType::Cycle => {
                    result.result_edges.push(step.edge);
                    result.result_step_type = Some(StepType::Cycle);
                }
            }
        }
        result
    }

    /// Returns *true* if the run did not fail
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the nodes along `result_edges`, e.g. `[1, 2, 3]` for `(-1,1), (1,2), (2,3)`.
    /// Cycles list their first node once.
    pub fn path_nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.result_edges.len() + 1);
        for (i, e) in self.result_edges.iter().enumerate() {
            if i == 0 && !e.is_root() {
                nodes.push(e.from);
            }
            if !(self.result_step_type == Some(StepType::Cycle) && nodes.first() == Some(&e.to))
            {
                nodes.push(e.to);
            }
        }
        nodes
    }

    /// Sums the (smallest) weights of all non-synthetic result edges
    pub fn path_weight(&self, graph: &GraphSnapshot) -> Weight {
        self.result_edges
            .iter()
            .filter(|e| !e.is_root())
            .filter_map(|e| graph.weight_of(e.from, e.to))
            .sum()
    }

    /// Sums the weights of all non-synthetic visited edges, e.g. the weight of a spanning tree
    pub fn visited_weight(&self, graph: &GraphSnapshot) -> Weight {
        self.visited_edges
            .iter()
            .filter(|e| !e.is_root())
            .filter_map(|e| graph.weight_of(e.from, e.to))
            .sum()
    }
}

/// One algorithm's implementation of the shared execute/generator contract
pub trait AlgorithmAdapter: Send + Sync {
    /// Static description used by registries and selectors
    fn metadata(&self) -> &AlgorithmMetadata;

    /// Returns a lazy step generator for `input`.
    ///
    /// # Errors
    /// Configuration errors (see [`AlgorithmMetadata::validate`]) are reported here, before
    /// any step exists.
    fn generator(&self, input: &AlgorithmInput) -> Result<BoxedSteps, AlgorithmError>;

    /// Runs the algorithm to completion.
    ///
    /// Never panics; failures are reported via [`AlgorithmResult::error`].
    fn execute(&self, input: &AlgorithmInput) -> AlgorithmResult {
        match self.generator(input) {
            Err(error) => AlgorithmResult::failed(error),
            Ok(mut steps) => {
                let mut result = AlgorithmResult::from_steps(steps.by_ref());
                result.error = steps.outcome().err();
                result
            }
        }
    }

    /// Shorthand for `self.metadata().id`
    fn id(&self) -> &'static str {
        self.metadata().id
    }
}

/// Distance-like table keyed by node where missing entries are infinite
pub(crate) fn distance_of(table: &FxHashMap<NodeId, Weight>, u: NodeId) -> Weight {
    table.get(&u).copied().unwrap_or(Weight::INFINITY)
}

/// Returns the first node of `order` that is contained in `candidates` and has the smallest
/// finite value in `table`. Ties go to the node listed first.
pub(crate) fn min_finite_in<'a, I>(
    order: I,
    candidates: &FxHashSet<NodeId>,
    table: &FxHashMap<NodeId, Weight>,
) -> Option<NodeId>
where
    I: IntoIterator<Item = &'a NodeId>,
{
    let mut best: Option<(NodeId, Weight)> = None;
    for &u in order {
        if !candidates.contains(&u) {
            continue;
        }
        let d = distance_of(table, u);
        if d.is_finite() && best.is_none_or(|(_, b)| d < b) {
            best = Some((u, d));
        }
    }
    best.map(|(u, _)| u)
}

/// Builds table rows for `order` from a value table and a predecessor table
pub(crate) fn table_entries<'a, I>(
    order: I,
    values: &FxHashMap<NodeId, Weight>,
    via: &FxHashMap<NodeId, NodeId>,
) -> Vec<TableEntry>
where
    I: IntoIterator<Item = &'a NodeId>,
{
    order
        .into_iter()
        .map(|&u| TableEntry::new(u, distance_of(values, u), via.get(&u).copied()))
        .collect()
}
