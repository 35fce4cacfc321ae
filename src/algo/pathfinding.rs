/*!
Unweighted pathfinding on top of the traversal iterators.

[`PathSearch`] explores exactly like [`TraversalSearch`], additionally records the parent of
every node at the moment it is popped, and stops as soon as the end node is popped. The visit of
the end node is emitted first, followed by the reconstructed path as [`StepType::Result`] steps.

- BFS-pathfinding returns a path with the minimum number of edges.
- DFS-pathfinding returns *some* path, which may be longer.
*/

use std::{collections::VecDeque, sync::Arc};

use fxhash::FxHashMap;

use super::*;

/// Pathfinding step generator parameterized by the frontier type
pub struct PathSearch<S>
where
    S: NodeSequencer<EdgeRef>,
{
    search: TraversalSearch<S>,
    start: NodeId,
    end: NodeId,
    parents: FxHashMap<NodeId, NodeId>,
    report: Option<PathReport>,
}

/// BFS-pathfinding: shortest path by edge count
pub type BfsPath = PathSearch<VecDeque<EdgeRef>>;

/// DFS-pathfinding: any path
pub type DfsPath = PathSearch<Vec<EdgeRef>>;

impl<S> PathSearch<S>
where
    S: NodeSequencer<EdgeRef>,
{
    /// Creates a new search for a path from `start` to `end`
    pub fn new(graph: Arc<GraphSnapshot>, start: NodeId, end: NodeId) -> Self {
        Self {
            search: TraversalSearch::new(graph, start).stop_at(end),
            start,
            end,
            parents: FxHashMap::default(),
            report: None,
        }
    }

    /// Returns *true* once the end node has been reached
    pub fn found(&self) -> bool {
        self.report.is_some()
    }
}

impl<S> Iterator for PathSearch<S>
where
    S: NodeSequencer<EdgeRef>,
{
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(report) = self.report.as_mut() {
            return report.next();
        }

        let step = self.search.next()?;
        self.parents.insert(step.edge.to, step.edge.from);

        if step.edge.to == self.end {
            self.report = Some(PathReport::path(reconstruct_path(
                &self.parents,
                self.start,
                self.end,
            )));
        }

        Some(step)
    }
}

impl<S> StepSource for PathSearch<S>
where
    S: NodeSequencer<EdgeRef>,
{
    fn outcome(&self) -> Result<(), AlgorithmError> {
        if self.found() {
            Ok(())
        } else {
            Err(AlgorithmError::NoPathFound)
        }
    }
}

/// Shortest path by edge count using breadth-first search
#[derive(Debug, Copy, Clone, Default)]
pub struct BfsPathAdapter;

/// Some path using depth-first search
#[derive(Debug, Copy, Clone, Default)]
pub struct DfsPathAdapter;

impl BfsPathAdapter {
    pub const METADATA: AlgorithmMetadata = AlgorithmMetadata {
        id: "bfs-pathfinding",
        name: "BFS Pathfinding",
        category: Category::Pathfinding,
        description: "Finds a path with the fewest edges between two nodes.",
        start_hint: "Select the start node.",
        end_hint: Some("Select the node to find a path to."),
        requirements: Requirements {
            weighted: false,
            undirected_only: false,
            connected_only: false,
        },
        failure_message: "No path exists between the selected nodes.",
    };
}

impl DfsPathAdapter {
    pub const METADATA: AlgorithmMetadata = AlgorithmMetadata {
        id: "dfs-pathfinding",
        name: "DFS Pathfinding",
        category: Category::Pathfinding,
        description: "Finds a path between two nodes by exploring deep branches first.",
        start_hint: "Select the start node.",
        end_hint: Some("Select the node to find a path to."),
        requirements: Requirements {
            weighted: false,
            undirected_only: false,
            connected_only: false,
        },
        failure_message: "No path exists between the selected nodes.",
    };
}

/// Shared generator construction for pathfinding adapters
fn path_generator<S>(
    metadata: &AlgorithmMetadata,
    input: &AlgorithmInput,
) -> Result<BoxedSteps, AlgorithmError>
where
    S: NodeSequencer<EdgeRef> + 'static,
{
    metadata.validate(input)?;
    let end = input.require_end_node(metadata.name)?;

    if input.start_node == end {
        return Ok(Box::new(SameNodePath::new(end)));
    }

    Ok(Box::new(PathSearch::<S>::new(
        Arc::clone(&input.graph),
        input.start_node,
        end,
    )))
}

impl AlgorithmAdapter for BfsPathAdapter {
    fn metadata(&self) -> &AlgorithmMetadata {
        &Self::METADATA
    }

    fn generator(&self, input: &AlgorithmInput) -> Result<BoxedSteps, AlgorithmError> {
        path_generator::<VecDeque<EdgeRef>>(self.metadata(), input)
    }
}

impl AlgorithmAdapter for DfsPathAdapter {
    fn metadata(&self) -> &AlgorithmMetadata {
        &Self::METADATA
    }

    fn generator(&self, input: &AlgorithmInput) -> Result<BoxedSteps, AlgorithmError> {
        path_generator::<Vec<EdgeRef>>(self.metadata(), input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gens::*, testing::*};
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    test_adapter_contract!(bfs_path_contract, BfsPathAdapter, pathfinding);
    test_adapter_contract!(dfs_path_contract, DfsPathAdapter, pathfinding);

    #[test]
    fn bfs_finds_fewest_edges() {
        // 1 - 2 - 3 - 4
        //  \_________/
        let graph = Arc::new(undirected(&[(1, 2), (2, 3), (3, 4), (1, 4)]));
        let result = BfsPathAdapter.execute(&AlgorithmInput::new(graph, 1).with_end_node(3));

        assert!(result.is_ok());
        assert_eq!(result.path_nodes().len(), 3);
        assert_eq!(result.result_edges[0], EdgeRef::root(1));
        assert_eq!(result.visited_edges.last().unwrap().to, 3);
    }

    #[test]
    fn dfs_may_take_a_detour() {
        // 1 -> 2 -> 4 -> 5
        //  \-> 3 ------/
        let graph = Arc::new(directed(&[(1, 2), (1, 3), (2, 4), (4, 5), (3, 5)]));
        let input = AlgorithmInput::new(graph, 1).with_end_node(5);

        let dfs = DfsPathAdapter.execute(&input);
        assert!(dfs.is_ok());
        assert_eq!(dfs.path_nodes(), vec![1, 2, 4, 5]);

        let bfs = BfsPathAdapter.execute(&input);
        assert_eq!(bfs.path_nodes(), vec![1, 3, 5]);
    }

    #[test]
    fn stops_at_end_node() {
        let graph = Arc::new(directed(&[(1, 2), (1, 3), (2, 4), (3, 5)]));
        let steps = BfsPath::new(graph, 1, 3).collect_vec();

        assert_eq!(
            steps.iter().map(|s| (s.step_type, s.edge)).collect_vec(),
            vec![
                (StepType::Visit, EdgeRef::root(1)),
                (StepType::Visit, EdgeRef::new(1, 2)),
                (StepType::Visit, EdgeRef::new(1, 3)),
                (StepType::Result, EdgeRef::root(1)),
                (StepType::Result, EdgeRef::new(1, 3)),
            ]
        );
    }

    #[test]
    fn unreachable_end_node() {
        let mut graph = directed(&[(1, 2), (3, 1)]);
        graph.add_node(4);
        let input = AlgorithmInput::new(Arc::new(graph), 1).with_end_node(3);

        for adapter in [&BfsPathAdapter as &dyn AlgorithmAdapter, &DfsPathAdapter] {
            let result = adapter.execute(&input);
            assert_eq!(result.error, Some(AlgorithmError::NoPathFound));
            assert!(result.result_edges.is_empty());
            assert_eq!(result.visited_edges.len(), 2);
        }
    }

    #[test]
    fn bfs_path_is_shortest() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for n in [4, 8, 16] {
            for _ in 0..25 {
                let graph = Arc::new(
                    RandomSnapshot::new()
                        .nodes(n)
                        .prob(0.15)
                        .directed(true)
                        .generate(rng),
                );
                let hops = hop_distances(&graph, 1);
                let end = n as NodeId;

                let input = AlgorithmInput::new(graph.clone(), 1).with_end_node(end);
                let result = BfsPathAdapter.execute(&input);

                match hops.get(&end) {
                    Some(&h) => {
                        assert!(result.is_ok());
                        // path includes the synthetic root edge
                        assert_eq!(result.result_edges.len(), h + 1);
                        assert_path_is_walkable(&graph, &result.result_edges);
                    }
                    None => assert_eq!(result.error, Some(AlgorithmError::NoPathFound)),
                }

                let dfs = DfsPathAdapter.execute(&input);
                assert_eq!(dfs.is_ok(), hops.contains_key(&end));
                if dfs.is_ok() {
                    assert!(dfs.result_edges.len() >= result.result_edges.len());
                    assert_path_is_walkable(&graph, &dfs.result_edges);
                }
            }
        }
    }
}
