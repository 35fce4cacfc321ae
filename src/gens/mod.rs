/*!
# Snapshot Generators

Random and deterministic [`GraphSnapshot`]s for tests, demos and benchmarks.

[`RandomSnapshot`] is configured with the builder pattern before generating:

1. Create a generator with [`RandomSnapshot::new`].
2. Set parameters (`.nodes(n).prob(p).weights(lo, hi)`, ...).
3. Call [`RandomSnapshot::generate`] with any [`Rng`].

Nodes are numbered `1..=n` and inserted in increasing order, so node `1` is a natural start
node and node `n` a natural end node. Given the same seeded [`Rng`], the output is reproducible.

The [`GeneratorSubstructures`] trait adds deterministic paths, cycles and cliques to an
existing snapshot.

# Examples
```
use graphtrace::{prelude::*, gens::*};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

let rng = &mut Pcg64Mcg::seed_from_u64(1);
let graph = RandomSnapshot::new()
    .nodes(10)
    .prob(0.2)
    .weights(1, 5)
    .connected(true)
    .generate(rng);

assert_eq!(graph.number_of_nodes(), 10);
assert!(graph.is_all_undirected());
```
*/

use fxhash::FxHashSet;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Uniform};

use crate::prelude::*;

mod substructures;

pub use substructures::*;

/// Random snapshot generator in the spirit of `G(n,p)`: every possible edge is added
/// independently with probability `p`.
///
/// Optionally, a uniform random spanning tree is grown first so that the result is connected.
/// Undirected snapshots contain each unordered pair at most once, directed snapshots each
/// ordered pair at most once. Self-loops are never generated.
#[derive(Debug, Copy, Clone)]
pub struct RandomSnapshot {
    n: usize,
    coin: Option<Bernoulli>,
    weights: Option<Uniform<i64>>,
    edge_type: EdgeType,
    connected: bool,
}

impl Default for RandomSnapshot {
    fn default() -> Self {
        Self {
            n: 0,
            coin: None,
            weights: None,
            edge_type: EdgeType::Undirected,
            connected: false,
        }
    }
}

impl RandomSnapshot {
    /// Creates a new generator for an empty, undirected, unweighted snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of nodes
    pub fn set_nodes(&mut self, n: usize) {
        self.n = n;
    }

    /// Sets the number of nodes
    pub fn nodes(mut self, n: usize) -> Self {
        self.set_nodes(n);
        self
    }

    /// Sets the probability of each possible edge.
    ///
    /// # Panics
    /// Panics if `prob` is not in `[0, 1]`.
    pub fn set_prob(&mut self, prob: f64) {
        assert!(
            (0.0..=1.0).contains(&prob),
            "Edge probability must be in [0, 1], got {prob}"
        );
        self.coin = Bernoulli::new(prob).ok();
    }

    /// Sets the probability of each possible edge.
    ///
    /// # Panics
    /// Panics if `prob` is not in `[0, 1]`.
    pub fn prob(mut self, prob: f64) -> Self {
        self.set_prob(prob);
        self
    }

    /// Draws integral edge weights uniformly from `lo..=hi`.
    /// Without this setting, every edge gets [`DEFAULT_WEIGHT`].
    ///
    /// # Panics
    /// Panics if `lo > hi`.
    pub fn set_weights(&mut self, lo: i64, hi: i64) {
        assert!(lo <= hi, "Empty weight range {lo}..={hi}");
        self.weights = Uniform::new_inclusive(lo, hi).ok();
    }

    /// Draws integral edge weights uniformly from `lo..=hi`.
    ///
    /// # Panics
    /// Panics if `lo > hi`.
    pub fn weights(mut self, lo: i64, hi: i64) -> Self {
        self.set_weights(lo, hi);
        self
    }

    /// Generates directed instead of undirected edges
    pub fn set_directed(&mut self, directed: bool) {
        self.edge_type = if directed {
            EdgeType::Directed
        } else {
            EdgeType::Undirected
        };
    }

    /// Generates directed instead of undirected edges
    pub fn directed(mut self, directed: bool) -> Self {
        self.set_directed(directed);
        self
    }

    /// Grows a random spanning tree before adding random edges.
    /// In directed snapshots, the tree edges point away from node `1`.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Grows a random spanning tree before adding random edges.
    /// In directed snapshots, the tree edges point away from node `1`.
    pub fn connected(mut self, connected: bool) -> Self {
        self.set_connected(connected);
        self
    }

    /// Generates a snapshot with nodes `1..=n`
    pub fn generate<R: Rng>(&self, rng: &mut R) -> GraphSnapshot {
        let n = self.n as NodeId;
        let mut graph = GraphSnapshot::with_nodes(1..=n);
        let mut used: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();

        if self.connected && n > 1 {
            for (u, v) in self.spanning_tree(rng) {
                self.add_edge_once(&mut graph, &mut used, u, v, rng);
            }
        }

        if let Some(coin) = self.coin {
            for u in 1..=n {
                for v in 1..=n {
                    if u == v || (self.edge_type.is_undirected() && u > v) {
                        continue;
                    }
                    if coin.sample(rng) {
                        self.add_edge_once(&mut graph, &mut used, u, v, rng);
                    }
                }
            }
        }

        graph
    }

    /// Random walk on the complete graph; every first visit of a node attaches it to the
    /// node the walk came from, which yields a uniform random spanning tree.
    fn spanning_tree<R: Rng>(&self, rng: &mut R) -> Vec<(NodeId, NodeId)> {
        let n = self.n as NodeId;
        let mut connected: FxHashSet<NodeId> = FxHashSet::default();
        connected.insert(1);

        let mut tree = Vec::with_capacity(self.n.saturating_sub(1));
        let mut current = 1;
        while connected.len() < self.n {
            let next = rng.random_range(1..=n);
            if connected.insert(next) {
                tree.push((current, next));
            }
            current = next;
        }
        tree
    }

    fn add_edge_once<R: Rng>(
        &self,
        graph: &mut GraphSnapshot,
        used: &mut FxHashSet<(NodeId, NodeId)>,
        u: NodeId,
        v: NodeId,
        rng: &mut R,
    ) {
        let key = if self.edge_type.is_undirected() {
            (u.min(v), u.max(v))
        } else {
            (u, v)
        };
        if !used.insert(key) {
            return;
        }

        let weight = self
            .weights
            .map_or(DEFAULT_WEIGHT, |w| w.sample(rng) as Weight);
        graph.add_edge(u, v, weight, self.edge_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn node_numbering() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        let graph = RandomSnapshot::new().nodes(5).generate(rng);

        assert_eq!(graph.nodes(), &[1, 2, 3, 4, 5]);
        assert_eq!(graph.number_of_edges(), 0);
    }

    #[test]
    fn extreme_probabilities() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        let graph = RandomSnapshot::new().nodes(6).prob(1.0).generate(rng);
        // undirected edges are stored once per direction
        assert_eq!(graph.number_of_edges(), 6 * 5);
        assert!(graph.is_all_undirected());

        let graph = RandomSnapshot::new()
            .nodes(6)
            .prob(1.0)
            .directed(true)
            .generate(rng);
        assert_eq!(graph.number_of_edges(), 6 * 5);
        assert!(!graph.is_all_undirected());

        let graph = RandomSnapshot::new().nodes(6).prob(0.0).generate(rng);
        assert_eq!(graph.number_of_edges(), 0);
    }

    #[test]
    fn connected_snapshots() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [1, 2, 5, 20, 50] {
            for directed in [false, true] {
                let graph = RandomSnapshot::new()
                    .nodes(n)
                    .prob(0.05)
                    .directed(directed)
                    .connected(true)
                    .generate(rng);

                // tree edges point away from node 1, so everything is reachable from it
                assert_eq!(hop_distances(&graph, 1).len(), n);
            }
        }
    }

    #[test]
    fn weights_within_range() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        let graph = RandomSnapshot::new()
            .nodes(30)
            .prob(0.3)
            .weights(-3, 7)
            .directed(true)
            .generate(rng);

        assert!(graph.number_of_edges() > 0);
        assert!(graph.edges().all(|e| (-3.0..=7.0).contains(&e.weight)));
        assert!(graph.edges().all(|e| e.weight.fract() == 0.0));
        assert!(graph.edges().all(|e| !e.is_loop()));
    }

    #[test]
    fn reproducible() {
        let config = RandomSnapshot::new().nodes(12).prob(0.3).weights(1, 9);

        let a = config.generate(&mut Pcg64Mcg::seed_from_u64(5));
        let b = config.generate(&mut Pcg64Mcg::seed_from_u64(5));

        assert_eq!(
            a.edges().copied().collect::<Vec<_>>(),
            b.edges().copied().collect::<Vec<_>>()
        );
    }

    #[test]
    #[should_panic]
    fn invalid_probability() {
        let _ = RandomSnapshot::new().prob(1.5);
    }
}
