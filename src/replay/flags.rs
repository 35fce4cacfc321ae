/*!
Per-node and per-edge annotations derived from a prefix of the step log.

[`TraceFlags`] is a pure projection: applying the same steps in the same order always yields
the same flags, and applying a step twice has no further effect. Moving backwards through a
history is therefore done by recomputing from scratch via [`TraceFlags::from_steps`], never by
undoing individual steps.
*/

use fxhash::FxHashMap;
use serde::Serialize;

use crate::{algo::*, prelude::*};

/// Annotations of a single node
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct NodeFlags {
    pub is_visited: bool,
    pub is_in_shortest_path: bool,
    pub is_in_cycle: bool,
}

/// Annotations of a single edge, keyed by `"from-to"`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct EdgeFlags {
    pub is_used_in_traversal: bool,
    pub is_used_in_shortest_path: bool,
    pub is_used_in_cycle: bool,
}

/// All annotations of a graph at one point of a replay
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TraceFlags {
    nodes: FxHashMap<NodeId, NodeFlags>,
    edges: FxHashMap<String, EdgeFlags>,
}

impl TraceFlags {
    /// Creates empty flags
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `steps` in order into fresh flags
    pub fn from_steps<'a, I>(steps: I) -> Self
    where
        I: IntoIterator<Item = &'a AlgorithmStep>,
    {
        let mut flags = Self::new();
        for step in steps {
            flags.apply(step);
        }
        flags
    }

    /// Applies the annotation of a single step:
    /// - `Visit` marks the node visited and the edge used in the traversal,
    /// - `Result` marks node and edge as part of the shortest path,
    /// - `Cycle` marks both endpoints and the edge as part of the cycle.
    ///
    /// The synthetic root edge `(-1, s)` only annotates `s`.
    pub fn apply(&mut self, step: &AlgorithmStep) {
        let edge = step.edge;

        match step.step_type {
            StepType::Visit => self.node_mut(edge.to).is_visited = true,
            StepType::Result => self.node_mut(edge.to).is_in_shortest_path = true,
            StepType::Cycle => {
                self.node_mut(edge.to).is_in_cycle = true;
                if let Some(from) = edge.predecessor() {
                    self.node_mut(from).is_in_cycle = true;
                }
            }
        }

        if edge.is_root() {
            return;
        }

        let flags = self.edges.entry(edge.key()).or_default();
        match step.step_type {
            StepType::Visit => flags.is_used_in_traversal = true,
            StepType::Result => flags.is_used_in_shortest_path = true,
            StepType::Cycle => flags.is_used_in_cycle = true,
        }
    }

    fn node_mut(&mut self, u: NodeId) -> &mut NodeFlags {
        self.nodes.entry(u).or_default()
    }

    /// Flags of node `u`; all unset if `u` was never annotated
    pub fn node(&self, u: NodeId) -> NodeFlags {
        self.nodes.get(&u).copied().unwrap_or_default()
    }

    /// Flags of the edge `from -> to`
    pub fn edge(&self, edge: EdgeRef) -> EdgeFlags {
        self.edge_by_key(&edge.key())
    }

    /// Flags of the edge with key `"from-to"`
    pub fn edge_by_key(&self, key: &str) -> EdgeFlags {
        self.edges.get(key).copied().unwrap_or_default()
    }

    /// Annotated nodes and their flags, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, NodeFlags)> + '_ {
        self.nodes.iter().map(|(&u, &f)| (u, f))
    }

    /// Annotated edges and their flags, in no particular order
    pub fn edges(&self) -> impl Iterator<Item = (&str, EdgeFlags)> + '_ {
        self.edges.iter().map(|(k, &f)| (k.as_str(), f))
    }

    /// Returns *true* if nothing is annotated
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Removes all annotations
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
