use std::collections::VecDeque;

use fxhash::FxHashMap;
use itertools::Itertools;
use rand::Rng;

use crate::{algo::*, gens::*, prelude::*};

/// Builds a directed unweighted snapshot; nodes appear in order of first mention
pub(crate) fn directed(edges: &[(NodeId, NodeId)]) -> GraphSnapshot {
    let mut graph = GraphSnapshot::new();
    graph.add_unweighted_edges(edges, EdgeType::Directed);
    graph
}

/// Builds an undirected unweighted snapshot; nodes appear in order of first mention
pub(crate) fn undirected(edges: &[(NodeId, NodeId)]) -> GraphSnapshot {
    let mut graph = GraphSnapshot::new();
    graph.add_unweighted_edges(edges, EdgeType::Undirected);
    graph
}

/// Hop distances of all nodes reachable from `start`
pub(crate) fn hop_distances(graph: &GraphSnapshot, start: NodeId) -> FxHashMap<NodeId, usize> {
    let mut hops = FxHashMap::default();
    hops.insert(start, 0);

    let mut queue = VecDeque::from([start]);
    while let Some(u) = queue.pop_front() {
        let d = hops[&u];
        for v in graph.neighbors_of(u) {
            if !hops.contains_key(&v) {
                hops.insert(v, d + 1);
                queue.push_back(v);
            }
        }
    }
    hops
}

/// Floyd-Warshall over all nodes of `graph`; unreachable pairs are infinite
pub(crate) fn all_pairs_distances(graph: &GraphSnapshot) -> FxHashMap<(NodeId, NodeId), Weight> {
    let nodes = graph.nodes();
    let mut dist: FxHashMap<(NodeId, NodeId), Weight> = nodes
        .iter()
        .cartesian_product(nodes.iter())
        .map(|(&u, &v)| ((u, v), if u == v { 0.0 } else { Weight::INFINITY }))
        .collect();

    for e in graph.edges() {
        let d = dist.entry((e.from, e.to)).or_insert(Weight::INFINITY);
        *d = d.min(e.weight);
    }

    for &k in nodes {
        for &i in nodes {
            for &j in nodes {
                let through = dist[&(i, k)] + dist[&(k, j)];
                if through < dist[&(i, j)] {
                    dist.insert((i, j), through);
                }
            }
        }
    }
    dist
}

/// Weight of a minimum spanning forest computed with Kruskal's algorithm
pub(crate) fn kruskal_weight(graph: &GraphSnapshot) -> Weight {
    fn find(parent: &mut FxHashMap<NodeId, NodeId>, u: NodeId) -> NodeId {
        let p = *parent.get(&u).unwrap_or(&u);
        if p == u {
            return u;
        }
        let root = find(parent, p);
        parent.insert(u, root);
        root
    }

    let mut parent = FxHashMap::default();
    let mut total = 0.0;

    for e in graph
        .edges()
        .sorted_by(|a, b| a.weight.total_cmp(&b.weight))
    {
        let (ru, rv) = (find(&mut parent, e.from), find(&mut parent, e.to));
        if ru != rv {
            parent.insert(ru, rv);
            total += e.weight;
        }
    }
    total
}

/// Asserts that `edges` form a chain `(-1, s), (s, a), (a, b), ...` of existing edges
pub(crate) fn assert_path_is_walkable(graph: &GraphSnapshot, edges: &[EdgeRef]) {
    assert!(!edges.is_empty());
    assert!(edges[0].is_root(), "path must start with the root edge");

    for (a, b) in edges.iter().tuple_windows() {
        assert_eq!(a.to, b.from, "path is not contiguous at {a} -> {b}");
        assert!(
            graph.weight_of(b.from, b.to).is_some(),
            "path uses missing edge {b}"
        );
    }
}

/// A mix of small random inputs: directed and undirected, weighted and unweighted,
/// connected or not, with end nodes spread over the graph
pub(crate) fn random_inputs<R: Rng>(rng: &mut R) -> Vec<AlgorithmInput> {
    let mut inputs = Vec::new();

    for n in [1, 2, 5, 9] {
        for directed in [false, true] {
            for connected in [false, true] {
                let graph = std::sync::Arc::new(
                    RandomSnapshot::new()
                        .nodes(n)
                        .prob(0.25)
                        .weights(0, 9)
                        .directed(directed)
                        .connected(connected)
                        .generate(rng),
                );

                let end = rng.random_range(1..=n as NodeId);
                inputs.push(AlgorithmInput::new(graph.clone(), 1).with_end_node(end));
                inputs.push(AlgorithmInput::new(graph, 1).with_end_node(n as NodeId));
            }
        }
    }

    inputs
}

/// Asserts that `execute` is exactly the partition of the drained generator
pub(crate) fn assert_execute_matches_generator(
    adapter: &dyn AlgorithmAdapter,
    input: &AlgorithmInput,
) {
    let result = adapter.execute(input);

    match adapter.generator(input) {
        Err(error) => assert_eq!(result, AlgorithmResult::failed(error)),
        Ok(mut steps) => {
            let drained = steps.by_ref().collect_vec();

            assert_eq!(
                result.visited_edges,
                drained
                    .iter()
                    .filter(|s| s.is_visit())
                    .map(|s| s.edge)
                    .collect_vec()
            );
            assert_eq!(
                result.result_edges,
                drained
                    .iter()
                    .filter(|s| !s.is_visit())
                    .map(|s| s.edge)
                    .collect_vec()
            );
            assert_eq!(result.error, steps.outcome().err());

            // failures never come with a result
            if !result.is_ok() {
                assert!(result.result_edges.is_empty());
            }
        }
    }
}

/// Stamps out contract tests every adapter must pass.
///
/// The third argument selects additional tests for the adapter's category:
/// `traversal`, `pathfinding` or `tree`.
macro_rules! test_adapter_contract {
    ($env:ident, $adapter:expr, $kind:ident) => {
        #[cfg(test)]
        mod $env {
            use std::sync::Arc;

            use crate::{algo::*, testing::*, testing::test_adapter_contract};
            use rand::SeedableRng;
            use rand_pcg::Pcg64Mcg;

            #[test]
            fn execute_drains_generator() {
                let rng = &mut Pcg64Mcg::seed_from_u64(42);

                for _ in 0..5 {
                    for input in random_inputs(rng) {
                        assert_execute_matches_generator(&$adapter, &input);
                    }
                }
            }

            #[test]
            fn metadata_is_consistent() {
                let metadata = $adapter.metadata();
                assert!(!metadata.id.is_empty());
                assert_eq!(metadata.needs_end_node(), metadata.end_hint.is_some());
            }

            test_adapter_contract!(@$kind $adapter);
        }
    };
    (@traversal $adapter:expr) => {
        use crate::prelude::*;

        #[test]
        fn runs_without_end_node() {
            let graph = Arc::new(undirected(&[(1, 2), (2, 3)]));
            let result = $adapter.execute(&AlgorithmInput::new(graph, 1));

            assert_eq!(result.visited_edges.first(), Some(&EdgeRef::root(1)));
            assert_eq!(result.visited_edges.len(), 3);
        }
    };
    (@pathfinding $adapter:expr) => {
        use crate::prelude::*;
        use itertools::Itertools;

        #[test]
        fn same_start_and_end() {
            let rng = &mut Pcg64Mcg::seed_from_u64(43);

            for input in random_inputs(rng) {
                let node = input.end_node.unwrap_or(1);
                let input = AlgorithmInput::new(input.graph, node).with_end_node(node);

                let steps = $adapter
                    .generator(&input)
                    .unwrap()
                    .map(|s| (s.step_type, s.edge))
                    .collect_vec();
                assert_eq!(
                    steps,
                    vec![
                        (StepType::Visit, EdgeRef::root(node)),
                        (StepType::Result, EdgeRef::root(node)),
                    ]
                );
                assert!($adapter.execute(&input).is_ok());
            }
        }

        #[test]
        fn missing_end_node() {
            let graph = Arc::new(directed(&[(1, 2)]));
            let input = AlgorithmInput::new(graph, 1);

            assert!($adapter.generator(&input).is_err());

            let result = $adapter.execute(&input);
            assert_eq!(
                result.error,
                Some(AlgorithmError::MissingEndNode {
                    algorithm: $adapter.metadata().name
                })
            );
            assert!(result.visited_edges.is_empty());
            assert!(result.result_edges.is_empty());
        }
    };
    (@tree $adapter:expr) => {
        #[test]
        fn rejects_directed_edges() {
            let graph = Arc::new(directed(&[(1, 2)]));
            let result = $adapter.execute(&AlgorithmInput::new(graph, 1));

            assert_eq!(
                result.error,
                Some(AlgorithmError::RequiresUndirected {
                    algorithm: $adapter.metadata().name
                })
            );
            assert!(result.visited_edges.is_empty());
        }
    };
}

pub(crate) use test_adapter_contract;
