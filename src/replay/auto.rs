use std::collections::VecDeque;

use tracing::trace;

use super::flags::TraceFlags;
use crate::algo::*;

/// Outcome of a single auto mode tick
#[derive(Debug, Clone, PartialEq)]
pub enum AutoTick {
    /// The step was applied to the flags
    Applied(AlgorithmStep),
    /// Exploration is over; the result steps follow at the result cadence
    ResultsPending,
    /// The run is over
    Finished(Result<(), AlgorithmError>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    Exploring,
    Highlighting,
    Finished,
}

/// Auto mode run consuming a step generator lazily.
///
/// While exploring, every tick pulls from the generator until the next visit, which is then
/// applied. Result and cycle steps are held back and highlighted one per tick once the
/// generator is exhausted and the run succeeded.
pub struct AutoRun {
    source: BoxedSteps,
    phase: Phase,
    pending: VecDeque<AlgorithmStep>,
    last: Option<AlgorithmStep>,
    applied: usize,
}

impl AutoRun {
    /// Creates a run over `source`; nothing is pulled before the first tick
    pub fn new(source: BoxedSteps) -> Self {
        Self {
            source,
            phase: Phase::Exploring,
            pending: VecDeque::new(),
            last: None,
            applied: 0,
        }
    }

    /// Returns *true* while result steps are being highlighted
    pub fn is_highlighting(&self) -> bool {
        self.phase == Phase::Highlighting
    }

    /// Returns *true* once the run is over
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// The step applied last
    pub fn last_step(&self) -> Option<&AlgorithmStep> {
        self.last.as_ref()
    }

    /// Number of steps applied so far
    pub fn applied(&self) -> usize {
        self.applied
    }

    fn apply(&mut self, step: AlgorithmStep, flags: &mut TraceFlags) -> AutoTick {
        trace!(step_type = ?step.step_type, edge = %step.edge, "auto mode applies step");
        flags.apply(&step);
        self.applied += 1;
        self.last = Some(step.clone());
        AutoTick::Applied(step)
    }

    /// Advances the run by one tick
    pub fn tick(&mut self, flags: &mut TraceFlags) -> AutoTick {
        match self.phase {
            Phase::Exploring => loop {
                match self.source.next() {
                    Some(step) if step.is_visit() => return self.apply(step, flags),
                    Some(step) => self.pending.push_back(step),
                    None => {
                        let outcome = self.source.outcome();
                        if outcome.is_ok() && !self.pending.is_empty() {
                            self.phase = Phase::Highlighting;
                            return AutoTick::ResultsPending;
                        }

                        self.phase = Phase::Finished;
                        self.pending.clear();
                        return AutoTick::Finished(outcome);
                    }
                }
            },
            Phase::Highlighting => match self.pending.pop_front() {
                Some(step) => self.apply(step, flags),
                None => {
                    self.phase = Phase::Finished;
                    AutoTick::Finished(Ok(()))
                }
            },
            Phase::Finished => AutoTick::Finished(self.source.outcome()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{prelude::*, testing::*};

    fn run(adapter: &dyn AlgorithmAdapter, input: &AlgorithmInput) -> (Vec<AutoTick>, TraceFlags) {
        let mut auto = AutoRun::new(adapter.generator(input).unwrap());
        let mut flags = TraceFlags::new();
        let mut ticks = Vec::new();

        while !auto.is_finished() {
            ticks.push(auto.tick(&mut flags));
        }
        (ticks, flags)
    }

    #[test]
    fn visits_then_results() {
        let graph = Arc::new(directed(&[(1, 2)]));
        let input = AlgorithmInput::new(graph, 1).with_end_node(2);
        let (ticks, flags) = run(&BfsPathAdapter, &input);

        assert_eq!(
            ticks.into_iter().map(strip_trace).collect::<Vec<_>>(),
            vec![
                AutoTick::Applied(AlgorithmStep::visit(EdgeRef::root(1))),
                AutoTick::Applied(AlgorithmStep::visit(EdgeRef::new(1, 2))),
                AutoTick::ResultsPending,
                AutoTick::Applied(AlgorithmStep::result(EdgeRef::root(1))),
                AutoTick::Applied(AlgorithmStep::result(EdgeRef::new(1, 2))),
                AutoTick::Finished(Ok(())),
            ]
        );
        assert!(flags.node(2).is_in_shortest_path);
        assert!(flags.edge(EdgeRef::new(1, 2)).is_used_in_shortest_path);
    }

    #[test]
    fn failed_run_skips_highlighting() {
        let graph = Arc::new(directed(&[(1, 2), (3, 1)]));
        let input = AlgorithmInput::new(graph, 1).with_end_node(3);
        let (ticks, flags) = run(&BfsPathAdapter, &input);

        assert_eq!(ticks.len(), 3);
        assert_eq!(
            ticks.last(),
            Some(&AutoTick::Finished(Err(AlgorithmError::NoPathFound)))
        );
        assert!(flags.node(2).is_visited);
        assert!(!flags.node(1).is_in_shortest_path);
    }

    fn strip_trace(tick: AutoTick) -> AutoTick {
        match tick {
            AutoTick::Applied(mut step) => {
                step.trace = None;
                AutoTick::Applied(step)
            }
            other => other,
        }
    }
}
