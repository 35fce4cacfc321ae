/*!
Path reconstruction shared by all algorithms that report a path or a cycle.

Searches record a predecessor per node. Once the target is settled, the path is obtained by
walking the predecessors backwards and is then reported as a sequence of
[`StepType::Result`] (or [`StepType::Cycle`]) steps in forward order.
*/

use std::collections::VecDeque;

use fxhash::FxHashMap;

use super::*;

/// Walks `parents` backwards from `end` to `start` and returns the path as edges in
/// forward order, starting with the synthetic edge `(-1, start)`.
///
/// The walk stops early if it reaches the [`NO_PREDECESSOR`] sentinel or a node without
/// parent, so a broken chain yields a partial path instead of looping.
///
/// # Examples
/// ```
/// use fxhash::FxHashMap;
/// use graphtrace::{prelude::*, algo::*};
///
/// let parents: FxHashMap<NodeId, NodeId> = [(2, 1), (3, 2)].into_iter().collect();
/// assert_eq!(
///     reconstruct_path(&parents, 1, 3),
///     vec![EdgeRef::root(1), EdgeRef::new(1, 2), EdgeRef::new(2, 3)]
/// );
/// ```
pub fn reconstruct_path(
    parents: &FxHashMap<NodeId, NodeId>,
    start: NodeId,
    end: NodeId,
) -> Vec<EdgeRef> {
    let mut path = Vec::new();
    let mut node = end;

    // every node appears at most once on a well-formed chain
    let mut budget = parents.len() + 1;
    while node != start && budget > 0 {
        budget -= 1;
        match parents.get(&node).copied().and_then(predecessor) {
            Some(p) => {
                path.push(EdgeRef::new(p, node));
                node = p;
            }
            None => break,
        }
    }

    path.push(EdgeRef::root(start));
    path.reverse();
    path
}

/// Walks `parents` backwards from `tail` until `head` is reached and returns the nodes
/// `head, ..., tail` in forward order
pub fn ancestor_chain(
    parents: &FxHashMap<NodeId, NodeId>,
    head: NodeId,
    tail: NodeId,
) -> Vec<NodeId> {
    let mut chain = vec![tail];
    let mut node = tail;

    let mut budget = parents.len() + 1;
    while node != head && budget > 0 {
        budget -= 1;
        match parents.get(&node).copied().and_then(predecessor) {
            Some(p) => {
                chain.push(p);
                node = p;
            }
            None => break,
        }
    }

    chain.reverse();
    chain
}

/// Emits a reconstructed path (or cycle) one edge per step
#[derive(Debug, Clone)]
pub struct PathReport {
    step_type: StepType,
    edges: VecDeque<EdgeRef>,
    nodes: Vec<NodeId>,
}

impl PathReport {
    /// Reports `edges` as [`StepType::Result`] steps
    pub fn path(edges: Vec<EdgeRef>) -> Self {
        let nodes = edges.iter().map(|e| e.to).collect();
        Self {
            step_type: StepType::Result,
            edges: edges.into(),
            nodes,
        }
    }

    /// Reports the cycle through `nodes` (in traversal order) as [`StepType::Cycle`] steps,
    /// including the closing edge from the last node back to the first.
    pub fn cycle(nodes: Vec<NodeId>) -> Self {
        let mut edges: VecDeque<EdgeRef> = nodes
            .windows(2)
            .map(|w| EdgeRef::new(w[0], w[1]))
            .collect();
        if let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) {
            edges.push_back(EdgeRef::new(last, first));
        }

        Self {
            step_type: StepType::Cycle,
            edges,
            nodes,
        }
    }

    /// Number of steps left
    pub fn remaining(&self) -> usize {
        self.edges.len()
    }

    fn narration(&self, edge: &EdgeRef) -> String {
        match (self.step_type, edge.predecessor()) {
            (StepType::Cycle, _) => format!(
                "Cycle edge {} -> {} of cycle {}",
                edge.from,
                edge.to,
                format_nodes(&self.nodes)
            ),
            (_, None) => format!("Path starts at node {}", edge.to),
            (_, Some(p)) => format!("Path continues from node {p} to node {}", edge.to),
        }
    }
}

impl Iterator for PathReport {
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.edges.pop_front()?;
        let trace = StepTrace::new(self.narration(&edge), AuxiliaryData::Path(self.nodes.clone()));
        Some(AlgorithmStep::new(self.step_type, edge).with_trace(trace))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.edges.len(), Some(self.edges.len()))
    }
}

/// Generator for pathfinding runs with `start == end`: a single visit of the start node
/// followed by the single-node path, without running any search
#[derive(Debug, Clone)]
pub struct SameNodePath {
    node: NodeId,
    emitted: u8,
}

impl SameNodePath {
    /// Creates the short-circuit generator for `node`
    pub fn new(node: NodeId) -> Self {
        Self { node, emitted: 0 }
    }
}

impl Iterator for SameNodePath {
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = EdgeRef::root(self.node);
        let step = match self.emitted {
            0 => AlgorithmStep::visit(edge).with_trace(StepTrace::new(
                format!("Start node {} is also the end node", self.node),
                AuxiliaryData::Path(vec![self.node]),
            )),
            1 => AlgorithmStep::result(edge).with_trace(StepTrace::new(
                format!("Path consists of node {} only", self.node),
                AuxiliaryData::Path(vec![self.node]),
            )),
            _ => return None,
        };
        self.emitted += 1;
        Some(step)
    }
}

impl StepSource for SameNodePath {
    fn outcome(&self) -> Result<(), AlgorithmError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn parents(pairs: &[(NodeId, NodeId)]) -> FxHashMap<NodeId, NodeId> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn path_in_forward_order() {
        let p = parents(&[(1, NO_PREDECESSOR), (2, 1), (4, 2), (3, 1)]);
        assert_eq!(
            reconstruct_path(&p, 1, 4),
            vec![EdgeRef::root(1), EdgeRef::new(1, 2), EdgeRef::new(2, 4)]
        );
        assert_eq!(reconstruct_path(&p, 1, 1), vec![EdgeRef::root(1)]);
    }

    #[test]
    fn broken_chain_stops() {
        // 5 has no parent entry
        let p = parents(&[(6, 5), (7, 6)]);
        assert_eq!(
            reconstruct_path(&p, 1, 7),
            vec![EdgeRef::root(1), EdgeRef::new(5, 6), EdgeRef::new(6, 7)]
        );

        // a loop in the parent map must not hang
        let p = parents(&[(2, 3), (3, 2)]);
        assert!(reconstruct_path(&p, 1, 2).len() <= 4);
    }

    #[test]
    fn chain_of_ancestors() {
        let p = parents(&[(1, NO_PREDECESSOR), (2, 1), (3, 2), (4, 3)]);
        assert_eq!(ancestor_chain(&p, 2, 4), vec![2, 3, 4]);
        assert_eq!(ancestor_chain(&p, 4, 4), vec![4]);
    }

    #[test]
    fn report_cycle_closes() {
        let steps = PathReport::cycle(vec![1, 2, 3]).collect_vec();
        assert_eq!(
            steps.iter().map(|s| s.edge).collect_vec(),
            vec![EdgeRef::new(1, 2), EdgeRef::new(2, 3), EdgeRef::new(3, 1)]
        );
        assert!(steps.iter().all(|s| s.step_type == StepType::Cycle));

        let steps = PathReport::cycle(vec![5]).collect_vec();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].edge, EdgeRef::new(5, 5));
    }

    #[test]
    fn same_node_path() {
        let mut source = SameNodePath::new(3);
        let steps = source.by_ref().collect_vec();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].step_type, StepType::Visit);
        assert_eq!(steps[1].step_type, StepType::Result);
        assert!(steps.iter().all(|s| s.edge == EdgeRef::root(3)));
        assert!(source.outcome().is_ok());
    }
}
