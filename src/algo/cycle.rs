/*!
Cycle detection by depth-first search with a three-coloring of the nodes.

- **White**: not visited yet
- **Gray**: on the current recursion stack
- **Black**: fully processed

An edge to a gray node is a back edge and closes a cycle, unless it is an undirected edge
leading straight back to the parent (walking an undirected edge there and back is no cycle).
The search starts at the start node and afterwards restarts from every remaining white node in
snapshot order, so every component is checked. The first cycle found ends the search.

The recursion is unrolled into an explicit stack of frames so the search can be suspended after
every visit.
*/

use std::sync::Arc;

use fxhash::FxHashMap;

use super::*;

/// State of a node during the search
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    White,
    Gray,
    Black,
}

#[derive(Debug, Copy, Clone)]
struct Frame {
    node: NodeId,
    cursor: usize,
}

/// Cycle detection step generator.
///
/// Emits one [`StepType::Visit`] per entered node. If a cycle is found, its edges (including
/// the closing back edge) follow as [`StepType::Cycle`] steps.
pub struct CycleDetection {
    graph: Arc<GraphSnapshot>,
    roots: Vec<NodeId>,
    next_root: usize,
    colors: FxHashMap<NodeId, Color>,
    parents: FxHashMap<NodeId, NodeId>,
    stack: Vec<Frame>,
    report: Option<PathReport>,
    finished: bool,
}

impl CycleDetection {
    /// Creates a new search starting at `start`
    pub fn new(graph: Arc<GraphSnapshot>, start: NodeId) -> Self {
        let mut roots = Vec::with_capacity(graph.number_of_nodes() + 1);
        roots.push(start);
        roots.extend_from_slice(graph.nodes());

        Self {
            graph,
            roots,
            next_root: 0,
            colors: FxHashMap::default(),
            parents: FxHashMap::default(),
            stack: Vec::new(),
            report: None,
            finished: false,
        }
    }

    /// Color of `u`
    pub fn color(&self, u: NodeId) -> Color {
        self.colors.get(&u).copied().unwrap_or_default()
    }

    /// Returns *true* once a cycle was found
    pub fn found_cycle(&self) -> bool {
        self.report.is_some()
    }

    /// Marks `u` gray, pushes its frame and returns its visit
    fn enter(&mut self, u: NodeId, parent: NodeId) -> AlgorithmStep {
        self.colors.insert(u, Color::Gray);
        self.parents.insert(u, parent);
        self.stack.push(Frame { node: u, cursor: 0 });

        let recursion_stack = self.stack.iter().map(|f| f.node).collect::<Vec<_>>();
        let narration = match predecessor(parent) {
            None => format!("Start a depth-first search at node {u}"),
            Some(p) => format!("Visit node {u} from node {p}"),
        };

        AlgorithmStep::visit(EdgeRef::new(parent, u)).with_trace(StepTrace::new(
            narration,
            AuxiliaryData::RecursionStack(recursion_stack),
        ))
    }

    /// Returns the next unvisited root, if any
    fn next_white_root(&mut self) -> Option<NodeId> {
        while let Some(&root) = self.roots.get(self.next_root) {
            self.next_root += 1;
            if self.color(root) == Color::White {
                return Some(root);
            }
        }
        None
    }
}

impl Iterator for CycleDetection {
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(report) = self.report.as_mut() {
                return report.next();
            }
            if self.finished {
                return None;
            }

            let Some(&Frame { node: u, cursor }) = self.stack.last() else {
                match self.next_white_root() {
                    Some(root) => return Some(self.enter(root, NO_PREDECESSOR)),
                    None => {
                        self.finished = true;
                        return None;
                    }
                }
            };

            let Some(e) = self.graph.edges_of(u).get(cursor).copied() else {
                self.colors.insert(u, Color::Black);
                self.stack.pop();
                continue;
            };
            if let Some(frame) = self.stack.last_mut() {
                frame.cursor += 1;
            }

            match self.color(e.to) {
                Color::White => return Some(self.enter(e.to, u)),
                Color::Gray => {
                    if e.edge_type.is_undirected() && self.parents.get(&u) == Some(&e.to) {
                        continue;
                    }

                    let cycle = ancestor_chain(&self.parents, e.to, u);
                    self.report = Some(PathReport::cycle(cycle));
                    self.finished = true;
                }
                Color::Black => {}
            }
        }
    }
}

impl StepSource for CycleDetection {
    fn outcome(&self) -> Result<(), AlgorithmError> {
        if self.found_cycle() {
            Ok(())
        } else {
            Err(AlgorithmError::NoCycleFound)
        }
    }
}

/// Finds a cycle in any component of the graph
#[derive(Debug, Copy, Clone, Default)]
pub struct CycleDetectionAdapter;

impl CycleDetectionAdapter {
    pub const METADATA: AlgorithmMetadata = AlgorithmMetadata {
        id: "cycle-detection",
        name: "Cycle Detection",
        category: Category::Traversal,
        description: "Searches the graph depth-first for a cycle.",
        start_hint: "Select the node to start the search from.",
        end_hint: None,
        requirements: Requirements {
            weighted: false,
            undirected_only: false,
            connected_only: false,
        },
        failure_message: "No cycle found in the graph.",
    };
}

impl AlgorithmAdapter for CycleDetectionAdapter {
    fn metadata(&self) -> &AlgorithmMetadata {
        &Self::METADATA
    }

    fn generator(&self, input: &AlgorithmInput) -> Result<BoxedSteps, AlgorithmError> {
        self.metadata().validate(input)?;
        Ok(Box::new(CycleDetection::new(
            Arc::clone(&input.graph),
            input.start_node,
        )))
    }
}
