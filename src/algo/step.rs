/*!
# Algorithm Steps

An [`AlgorithmStep`] is one atomic, ordered unit of algorithm progress. Steps are produced in a
strict, algorithm-defined order and are never modified once yielded.

Each step may carry a [`StepTrace`]: a human-readable narration together with a snapshot of the
auxiliary data structure of the algorithm (queue, stack, distance table, ...). Traces exist for
display only; replay logic never looks at them.
*/

use itertools::Itertools;
use serde::Serialize;

use crate::{edge::*, node::*};

/// Kind of a step and hence the annotation it causes when replayed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum StepType {
    /// A node was visited via the given edge
    Visit,
    /// The edge is part of the final path
    Result,
    /// The edge is part of a detected cycle
    Cycle,
}

/// One unit of algorithm progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmStep {
    pub step_type: StepType,
    pub edge: EdgeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<StepTrace>,
}

impl AlgorithmStep {
    /// Creates a step without trace
    pub const fn new(step_type: StepType, edge: EdgeRef) -> Self {
        Self {
            step_type,
            edge,
            trace: None,
        }
    }

    /// Shorthand for a [`StepType::Visit`] step
    pub const fn visit(edge: EdgeRef) -> Self {
        Self::new(StepType::Visit, edge)
    }

    /// Shorthand for a [`StepType::Result`] step
    pub const fn result(edge: EdgeRef) -> Self {
        Self::new(StepType::Result, edge)
    }

    /// Shorthand for a [`StepType::Cycle`] step
    pub const fn cycle(edge: EdgeRef) -> Self {
        Self::new(StepType::Cycle, edge)
    }

    /// Attaches a trace
    pub fn with_trace(mut self, trace: StepTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// The node this step highlights, i.e. the head of its edge
    pub const fn node(&self) -> NodeId {
        self.edge.to
    }

    /// Returns *true* for [`StepType::Visit`]
    pub fn is_visit(&self) -> bool {
        self.step_type == StepType::Visit
    }
}

/// Narration and data-structure snapshot attached to a step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepTrace {
    pub narration: String,
    pub data: AuxiliaryData,
}

impl StepTrace {
    /// Creates a new trace
    pub fn new<S: Into<String>>(narration: S, data: AuxiliaryData) -> Self {
        Self {
            narration: narration.into(),
            data,
        }
    }
}

/// One row of a distance or key table
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct TableEntry {
    pub node: NodeId,
    /// `None` stands for infinity
    pub value: Option<Weight>,
    /// Predecessor that realizes `value`
    pub via: Option<NodeId>,
}

impl TableEntry {
    /// Creates a new row; infinite values are stored as `None`
    pub fn new(node: NodeId, value: Weight, via: Option<NodeId>) -> Self {
        Self {
            node,
            value: value.is_finite().then_some(value),
            via,
        }
    }
}

/// Snapshot of the auxiliary data structure an algorithm works on
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum AuxiliaryData {
    /// FIFO frontier, front first
    Queue(Vec<NodeId>),
    /// LIFO frontier, bottom first
    Stack(Vec<NodeId>),
    /// Gray nodes of a recursive search, outermost first
    RecursionStack(Vec<NodeId>),
    /// Unsettled nodes with finite distance, closest first
    PriorityQueue(Vec<TableEntry>),
    /// Full distance table in node order
    Distances(Vec<TableEntry>),
    /// Key table of a spanning tree search in node order
    Keys(Vec<TableEntry>),
    /// Nodes of a reconstructed path or cycle in order
    Path(Vec<NodeId>),
}

/// Renders a list of nodes as `[a, b, c]`
pub(crate) fn format_nodes(nodes: &[NodeId]) -> String {
    format!("[{}]", nodes.iter().join(", "))
}

/// Renders a weight, using `∞` for infinite values
pub(crate) fn format_weight(w: Weight) -> String {
    if w.is_finite() {
        format!("{w}")
    } else {
        "∞".to_string()
    }
}
