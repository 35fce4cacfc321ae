/*!
Dijkstra's algorithm for weighted shortest paths with non-negative weights.

The priority queue is a linear scan over the unsettled nodes in snapshot order: drawn graphs
are small, and the scan makes tie-breaking deterministic (the node listed first wins).
*/

use std::sync::Arc;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use smallvec::SmallVec;

use super::*;

/// Weighted shortest path step generator.
///
/// Every settled node yields one [`StepType::Visit`] step via the edge from its predecessor.
/// The step is emitted *after* the outgoing edges of the node were relaxed, so its trace shows
/// the updated priority queue. Once the end node is settled, the path follows as
/// [`StepType::Result`] steps.
pub struct Dijkstra {
    graph: Arc<GraphSnapshot>,
    start: NodeId,
    end: NodeId,
    order: Vec<NodeId>,
    distances: FxHashMap<NodeId, Weight>,
    previous: FxHashMap<NodeId, NodeId>,
    unvisited: FxHashSet<NodeId>,
    report: Option<PathReport>,
    exhausted: bool,
}

impl Dijkstra {
    /// Creates a new search for a shortest path from `start` to `end`.
    /// Both nodes take part even if the snapshot does not know them.
    pub fn new(graph: Arc<GraphSnapshot>, start: NodeId, end: NodeId) -> Self {
        let order = node_universe(&graph, [start, end]);
        let unvisited = order.iter().copied().collect();

        let mut distances = FxHashMap::default();
        distances.insert(start, 0.0);

        Self {
            graph,
            start,
            end,
            order,
            distances,
            previous: FxHashMap::default(),
            unvisited,
            report: None,
            exhausted: false,
        }
    }

    /// Current tentative distance of `u`
    pub fn distance(&self, u: NodeId) -> Weight {
        distance_of(&self.distances, u)
    }

    /// Unsettled nodes with finite distance, closest first
    fn priority_queue(&self) -> Vec<TableEntry> {
        self.order
            .iter()
            .filter(|u| self.unvisited.contains(u))
            .map(|&u| TableEntry::new(u, self.distance(u), self.previous.get(&u).copied()))
            .filter(|e| e.value.is_some())
            .sorted_by(|a, b| a.value.unwrap_or_default().total_cmp(&b.value.unwrap_or_default()))
            .collect()
    }

    /// Settles `u` and relaxes its edges towards unsettled nodes; returns the improved nodes
    fn settle(&mut self, u: NodeId) -> SmallVec<[NodeId; 8]> {
        self.unvisited.remove(&u);
        let du = self.distance(u);

        let mut improved = SmallVec::new();
        for e in self.graph.edges_of(u) {
            if !self.unvisited.contains(&e.to) {
                continue;
            }

            let candidate = du + e.weight;
            if candidate < self.distance(e.to) {
                self.distances.insert(e.to, candidate);
                self.previous.insert(e.to, u);
                improved.push(e.to);
            }
        }
        improved
    }
}

impl Iterator for Dijkstra {
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(report) = self.report.as_mut() {
            return report.next();
        }
        if self.exhausted {
            return None;
        }

        let Some(u) = min_finite_in(&self.order, &self.unvisited, &self.distances) else {
            self.exhausted = true;
            return None;
        };

        let improved = self.settle(u);
        let edge = EdgeRef::new(
            self.previous.get(&u).copied().unwrap_or(NO_PREDECESSOR),
            u,
        );

        let mut narration = format!(
            "Settle node {u} at distance {}",
            format_weight(self.distance(u))
        );
        if !improved.is_empty() {
            narration.push_str(&format!(", update distances of {}", format_nodes(&improved)));
        }

        if u == self.end {
            self.exhausted = true;
            self.report = Some(PathReport::path(reconstruct_path(
                &self.previous,
                self.start,
                self.end,
            )));
        }

        let trace = StepTrace::new(narration, AuxiliaryData::PriorityQueue(self.priority_queue()));
        Some(AlgorithmStep::visit(edge).with_trace(trace))
    }
}

impl StepSource for Dijkstra {
    fn outcome(&self) -> Result<(), AlgorithmError> {
        match self.report {
            Some(_) => Ok(()),
            None => Err(AlgorithmError::NoPathFound),
        }
    }
}

/// Weighted shortest path for graphs without negative weights
#[derive(Debug, Copy, Clone, Default)]
pub struct DijkstraAdapter;

impl DijkstraAdapter {
    pub const METADATA: AlgorithmMetadata = AlgorithmMetadata {
        id: "dijkstra",
        name: "Dijkstra",
        category: Category::Pathfinding,
        description: "Finds the shortest weighted path, assuming all weights are non-negative.",
        start_hint: "Select the start node.",
        end_hint: Some("Select the destination node."),
        requirements: Requirements {
            weighted: true,
            undirected_only: false,
            connected_only: false,
        },
        failure_message: "No path exists between the selected nodes.",
    };
}

impl AlgorithmAdapter for DijkstraAdapter {
    fn metadata(&self) -> &AlgorithmMetadata {
        &Self::METADATA
    }

    fn generator(&self, input: &AlgorithmInput) -> Result<BoxedSteps, AlgorithmError> {
        self.metadata().validate(input)?;
        let end = input.require_end_node(self.metadata().name)?;

        if input.start_node == end {
            return Ok(Box::new(SameNodePath::new(end)));
        }

        Ok(Box::new(Dijkstra::new(
            Arc::clone(&input.graph),
            input.start_node,
            end,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gens::*, testing::*};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    test_adapter_contract!(dijkstra_contract, DijkstraAdapter, pathfinding);

    fn weighted(edges: &[(NodeId, NodeId, Weight)]) -> Arc<GraphSnapshot> {
        Arc::new(GraphSnapshot::from_edges(
            [],
            edges.iter().copied(),
            EdgeType::Directed,
        ))
    }

    #[test]
    fn prefers_lighter_detour() {
        let graph = weighted(&[(1, 2, 2.0), (2, 3, 3.0), (1, 3, 10.0)]);
        let input = AlgorithmInput::new(graph.clone(), 1).with_end_node(3);
        let result = DijkstraAdapter.execute(&input);

        assert!(result.is_ok());
        assert_eq!(result.path_nodes(), vec![1, 2, 3]);
        assert_eq!(result.path_weight(&graph), 5.0);
        assert_eq!(
            result.visited_edges,
            vec![EdgeRef::root(1), EdgeRef::new(1, 2), EdgeRef::new(2, 3)]
        );
    }

    #[test]
    fn visit_trace_is_post_relaxation() {
        let graph = weighted(&[(1, 2, 2.0), (2, 3, 3.0), (1, 3, 10.0)]);
        let steps = Dijkstra::new(graph, 1, 3).collect_vec();

        let first = steps[0].trace.as_ref().unwrap();
        assert_eq!(
            first.data,
            AuxiliaryData::PriorityQueue(vec![
                TableEntry::new(2, 2.0, Some(1)),
                TableEntry::new(3, 10.0, Some(1)),
            ])
        );
        assert_eq!(
            first.narration,
            "Settle node 1 at distance 0, update distances of [2, 3]"
        );

        let second = steps[1].trace.as_ref().unwrap();
        assert_eq!(
            second.data,
            AuxiliaryData::PriorityQueue(vec![TableEntry::new(3, 5.0, Some(2))])
        );
    }

    #[test]
    fn ties_go_to_first_listed_node() {
        // 2 and 3 are both at distance 1; 2 is listed first
        let graph = weighted(&[(1, 2, 1.0), (1, 3, 1.0), (2, 4, 1.0), (3, 4, 1.0)]);
        let result = DijkstraAdapter.execute(&AlgorithmInput::new(graph, 1).with_end_node(4));

        assert_eq!(result.path_nodes(), vec![1, 2, 4]);
    }

    #[test]
    fn unreachable_end_node() {
        let graph = weighted(&[(1, 2, 1.0), (3, 4, 1.0)]);
        let result = DijkstraAdapter.execute(&AlgorithmInput::new(graph, 1).with_end_node(4));

        assert_eq!(result.error, Some(AlgorithmError::NoPathFound));
        assert_eq!(result.visited_edges, vec![EdgeRef::root(1), EdgeRef::new(1, 2)]);
        assert!(result.result_edges.is_empty());
    }

    #[test]
    fn unknown_start_node() {
        let graph = weighted(&[(1, 2, 1.0)]);
        let result = DijkstraAdapter.execute(&AlgorithmInput::new(graph, 9).with_end_node(2));

        assert_eq!(result.error, Some(AlgorithmError::NoPathFound));
        assert_eq!(result.visited_edges, vec![EdgeRef::root(9)]);
    }

    #[test]
    fn matches_reference_distances() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for n in [4, 8, 16] {
            for _ in 0..25 {
                let graph = Arc::new(
                    RandomSnapshot::new()
                        .nodes(n)
                        .prob(0.25)
                        .weights(0, 9)
                        .directed(true)
                        .generate(rng),
                );
                let reference = all_pairs_distances(&graph);

                for end in 2..=(n as NodeId) {
                    let result = DijkstraAdapter
                        .execute(&AlgorithmInput::new(graph.clone(), 1).with_end_node(end));
                    let expected = reference[&(1, end)];

                    if expected.is_finite() {
                        assert!(result.is_ok());
                        assert_eq!(result.path_weight(&graph), expected);
                        assert_path_is_walkable(&graph, &result.result_edges);
                    } else {
                        assert_eq!(result.error, Some(AlgorithmError::NoPathFound));
                    }
                }
            }
        }
    }
}
