/*!
Bellman-Ford shortest paths, allowing negative edge weights.

The edge list is flattened once in snapshot order. The search performs up to `V - 1` passes
over it and stops early after a pass without any improvement. A final verification pass
detects negative cycles: if any edge leaving a node with finite distance can still be relaxed,
the run fails with [`AlgorithmError::NegativeCycle`] and no path is reported.

Negative cycles that cannot be reached from the start node never get a finite distance and are
therefore not reported.
*/

use std::sync::Arc;

use fxhash::FxHashMap;

use super::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    Relaxing {
        pass: usize,
        cursor: usize,
        improved: bool,
    },
    Verified,
}

/// Step generator emitting one [`StepType::Visit`] per successful relaxation, carrying the
/// edge that caused the improvement
pub struct BellmanFord {
    start: NodeId,
    end: NodeId,
    order: Vec<NodeId>,
    edges: Vec<EdgeInfo>,
    distances: FxHashMap<NodeId, Weight>,
    previous: FxHashMap<NodeId, NodeId>,
    phase: Phase,
    report: Option<PathReport>,
    failure: Option<AlgorithmError>,
}

impl BellmanFord {
    /// Creates a new search for a shortest path from `start` to `end`
    pub fn new(graph: Arc<GraphSnapshot>, start: NodeId, end: NodeId) -> Self {
        let order = node_universe(&graph, [start, end]);
        let edges = graph.edges().copied().collect();

        let mut distances = FxHashMap::default();
        distances.insert(start, 0.0);

        Self {
            start,
            end,
            order,
            edges,
            distances,
            previous: FxHashMap::default(),
            phase: Phase::Relaxing {
                pass: 0,
                cursor: 0,
                improved: false,
            },
            report: None,
            failure: None,
        }
    }

    /// Maximum number of relaxation passes, i.e. `V - 1`
    pub fn max_passes(&self) -> usize {
        self.order.len().saturating_sub(1)
    }

    /// Current tentative distance of `u`
    pub fn distance(&self, u: NodeId) -> Weight {
        distance_of(&self.distances, u)
    }

    fn can_relax(&self, e: &EdgeInfo) -> Option<Weight> {
        let du = self.distance(e.from);
        let candidate = du + e.weight;
        (du.is_finite() && candidate < self.distance(e.to)).then_some(candidate)
    }

    fn relax(&mut self, e: EdgeInfo) -> Option<AlgorithmStep> {
        let candidate = self.can_relax(&e)?;
        self.distances.insert(e.to, candidate);
        self.previous.insert(e.to, e.from);

        let trace = StepTrace::new(
            format!(
                "Relax edge {} -> {} (weight {}), distance of node {} drops to {}",
                e.from,
                e.to,
                format_weight(e.weight),
                e.to,
                format_weight(candidate)
            ),
            AuxiliaryData::Distances(table_entries(&self.order, &self.distances, &self.previous)),
        );
        Some(AlgorithmStep::visit(e.edge_ref()).with_trace(trace))
    }

    /// Runs the verification pass and decides the outcome
    fn verify(&mut self) {
        self.phase = Phase::Verified;

        if self.edges.iter().any(|e| self.can_relax(e).is_some()) {
            self.failure = Some(AlgorithmError::NegativeCycle);
        } else if !self.distance(self.end).is_finite() {
            self.failure = Some(AlgorithmError::NoPathFound);
        } else {
            self.report = Some(PathReport::path(reconstruct_path(
                &self.previous,
                self.start,
                self.end,
            )));
        }
    }
}

impl Iterator for BellmanFord {
    type Item = AlgorithmStep;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(report) = self.report.as_mut() {
                return report.next();
            }

            let Phase::Relaxing {
                pass,
                cursor,
                improved,
            } = self.phase
            else {
                return None;
            };

            if pass >= self.max_passes() {
                self.verify();
                continue;
            }

            let Some(&e) = self.edges.get(cursor) else {
                if improved {
                    self.phase = Phase::Relaxing {
                        pass: pass + 1,
                        cursor: 0,
                        improved: false,
                    };
                } else {
                    // converged
                    self.verify();
                }
                continue;
            };

            let step = self.relax(e);
            self.phase = Phase::Relaxing {
                pass,
                cursor: cursor + 1,
                improved: improved || step.is_some(),
            };

            if step.is_some() {
                return step;
            }
        }
    }
}

impl StepSource for BellmanFord {
    fn outcome(&self) -> Result<(), AlgorithmError> {
        match (&self.failure, &self.report) {
            (Some(error), _) => Err(error.clone()),
            (None, Some(_)) => Ok(()),
            (None, None) => Err(AlgorithmError::NoPathFound),
        }
    }
}

/// Weighted shortest path that tolerates negative weights
#[derive(Debug, Copy, Clone, Default)]
pub struct BellmanFordAdapter;

impl BellmanFordAdapter {
    pub const METADATA: AlgorithmMetadata = AlgorithmMetadata {
        id: "bellman-ford",
        name: "Bellman-Ford",
        category: Category::Pathfinding,
        description: "Finds the shortest weighted path, even with negative weights.",
        start_hint: "Select the start node.",
        end_hint: Some("Select the destination node."),
        requirements: Requirements {
            weighted: true,
            undirected_only: false,
            connected_only: false,
        },
        failure_message: "No path exists, or the graph contains a negative cycle.",
    };
}

impl AlgorithmAdapter for BellmanFordAdapter {
    fn metadata(&self) -> &AlgorithmMetadata {
        &Self::METADATA
    }

    fn generator(&self, input: &AlgorithmInput) -> Result<BoxedSteps, AlgorithmError> {
        self.metadata().validate(input)?;
        let end = input.require_end_node(self.metadata().name)?;

        if input.start_node == end {
            return Ok(Box::new(SameNodePath::new(end)));
        }

        Ok(Box::new(BellmanFord::new(
            Arc::clone(&input.graph),
            input.start_node,
            end,
        )))
    }
}
