/*!
# Replay Engine

The [`ReplayEngine`] turns algorithm steps into graph annotations ([`TraceFlags`]) over time.
It offers two playback models that share the step data but differ in mechanics:

- **Auto mode** ([`ReplayEngine::run_auto`]) consumes the step generator lazily. Every tick
  applies the next visit; afterwards the result (or cycle) edges are highlighted one per tick
  at their own cadence, and finally the run reports completion.
- **Step-through mode** ([`ReplayEngine::start_step_through`]) first checks that the run
  succeeds at all, then drains the generator into a [`StepHistory`]. Navigation only moves the
  cursor, and after every move the flags are recomputed from scratch over the visible steps, so
  seeking backwards and forwards reproduces the annotations of a single forward walk exactly.
  Auto-play ([`ReplayEngine::play`]) steps forward on every tick until the history is complete.

# Time

The engine never sleeps and spawns nothing. It owns at most one [`Ticker`]; the host reports
elapsed time through [`ReplayEngine::advance`], which fires all due ticks in order and returns
what happened as [`ReplayEvent`]s. Starting a run, cancelling, pausing, navigating manually or
changing the speed replaces or drops the ticker, so a stale timer can never fire.

```
use std::{sync::Arc, time::Duration};
use graphtrace::{prelude::*, algo::*, replay::*};

let mut graph = GraphSnapshot::new();
graph.add_edge(1, 2, 1.0, EdgeType::Directed);
let input = AlgorithmInput::new(Arc::new(graph), 1).with_end_node(2);

let mut engine = ReplayEngine::new(ReplayConfig::new());
assert_eq!(engine.start_step_through(&BfsPathAdapter, &input), Ok(4));

engine.jump_to_step(3);
assert!(engine.flags().node(2).is_in_shortest_path);
assert!(engine.is_complete());

engine.step_backward();
engine.step_backward();
assert!(!engine.flags().node(2).is_in_shortest_path);
assert!(engine.flags().node(2).is_visited);
```
*/

mod auto;
mod config;
mod flags;
mod history;
mod timer;

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use crate::algo::*;

pub use auto::*;
pub use config::*;
pub use flags::*;
pub use history::*;
pub use timer::*;

/// Something observable that happened while time advanced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReplayEvent {
    /// Auto mode applied a step
    StepApplied(AlgorithmStep),
    /// Auto mode finished exploring and starts highlighting the result
    ResultsStarted,
    /// Auto mode is over
    RunFinished { error: Option<AlgorithmError> },
    /// Auto-play moved the step-through cursor to `index`
    Stepped { index: usize },
    /// Auto-play stopped since the history is complete
    PlaybackFinished,
}

enum Session {
    Idle,
    Auto(AutoRun),
    StepThrough(StepHistory),
}

/// Owner of the current run, its annotations and its timer
pub struct ReplayEngine {
    config: ReplayConfig,
    session: Session,
    flags: TraceFlags,
    timer: Option<Ticker>,
}

impl Default for ReplayEngine {
    fn default() -> Self {
        Self::new(ReplayConfig::default())
    }
}

impl ReplayEngine {
    /// Creates an idle engine
    pub fn new(config: ReplayConfig) -> Self {
        Self {
            config,
            session: Session::Idle,
            flags: TraceFlags::new(),
            timer: None,
        }
    }

    /// Current timing configuration
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Current annotations
    pub fn flags(&self) -> &TraceFlags {
        &self.flags
    }

    /// History of the step-through session, if one is active
    pub fn history(&self) -> Option<&StepHistory> {
        match &self.session {
            Session::StepThrough(history) => Some(history),
            _ => None,
        }
    }

    /// Returns *true* if no run is active
    pub fn is_idle(&self) -> bool {
        matches!(self.session, Session::Idle)
    }

    /// Returns *true* if a timer is pending
    pub fn is_ticking(&self) -> bool {
        self.timer.is_some()
    }

    /// Returns *true* while auto-play of a step-through session is active
    pub fn is_auto_playing(&self) -> bool {
        self.history().is_some_and(StepHistory::is_auto_playing)
    }

    /// Returns *true* if the step-through session shows its last step, or the auto run ended
    pub fn is_complete(&self) -> bool {
        match &self.session {
            Session::Idle => false,
            Session::Auto(run) => run.is_finished(),
            Session::StepThrough(history) => history.is_complete(),
        }
    }

    /// The step shown last
    pub fn current_step(&self) -> Option<&AlgorithmStep> {
        match &self.session {
            Session::Idle => None,
            Session::Auto(run) => run.last_step(),
            Session::StepThrough(history) => history.current(),
        }
    }

    /// Number of shown steps and total number of steps of the step-through session
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.history().map(StepHistory::progress)
    }

    /// Starts an auto mode run, replacing any active run.
    ///
    /// # Errors
    /// Returns configuration errors of the adapter; the engine is idle afterwards.
    pub fn run_auto(
        &mut self,
        adapter: &dyn AlgorithmAdapter,
        input: &AlgorithmInput,
    ) -> Result<(), AlgorithmError> {
        self.cancel();

        let source = adapter.generator(input)?;
        debug!(
            algorithm = adapter.id(),
            start = input.start_node,
            end = ?input.end_node,
            "starting auto run"
        );

        self.session = Session::Auto(AutoRun::new(source));
        self.timer = Some(Ticker::new(self.config.get_step_interval()));
        Ok(())
    }

    /// Starts a step-through session, replacing any active run, and returns the number of
    /// steps. The cursor starts before the first step.
    ///
    /// # Errors
    /// If the run fails (for any reason) the error is returned and the engine is idle; no
    /// stepping is possible for a doomed run.
    pub fn start_step_through(
        &mut self,
        adapter: &dyn AlgorithmAdapter,
        input: &AlgorithmInput,
    ) -> Result<usize, AlgorithmError> {
        self.cancel();

        if let Some(error) = adapter.execute(input).error {
            debug!(algorithm = adapter.id(), %error, "run fails, not entering step-through");
            return Err(error);
        }

        let history = StepHistory::from_source(adapter.generator(input)?);
        let len = history.len();
        debug!(algorithm = adapter.id(), steps = len, "starting step-through");

        self.session = Session::StepThrough(history);
        Ok(len)
    }

    /// Moves the cursor one step forward and pauses auto-play.
    /// Returns *false* if there is no session or the cursor is at the end.
    pub fn step_forward(&mut self) -> bool {
        self.navigate(StepHistory::step_forward)
    }

    /// Moves the cursor one step back and pauses auto-play.
    /// Returns *false* if there is no session or no step is shown.
    pub fn step_backward(&mut self) -> bool {
        self.navigate(StepHistory::step_backward)
    }

    /// Moves the cursor to `index` (clamped to the last step) and pauses auto-play.
    /// Returns *false* if there is no session.
    pub fn jump_to_step(&mut self, index: usize) -> bool {
        self.navigate(|history| {
            history.jump_to(index);
            true
        })
    }

    fn navigate<F>(&mut self, mv: F) -> bool
    where
        F: FnOnce(&mut StepHistory) -> bool,
    {
        let Session::StepThrough(history) = &mut self.session else {
            return false;
        };

        if history.is_auto_playing() {
            trace!("manual navigation pauses auto-play");
            history.set_auto_playing(false);
            self.timer = None;
        }

        let moved = mv(history);
        self.flags = TraceFlags::from_steps(history.visible_steps());
        moved
    }

    /// Starts auto-play of the step-through session.
    /// Returns *false* if there is no session or it is already complete.
    pub fn play(&mut self) -> bool {
        let Session::StepThrough(history) = &mut self.session else {
            return false;
        };
        if history.is_complete() {
            return false;
        }

        history.set_auto_playing(true);
        self.timer = Some(Ticker::new(self.config.get_step_interval()));
        true
    }

    /// Stops auto-play; no further tick happens
    pub fn pause(&mut self) {
        if let Session::StepThrough(history) = &mut self.session {
            history.set_auto_playing(false);
            self.timer = None;
        }
    }

    /// Changes the step interval. A running step timer restarts with the new interval.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.set_step_interval(speed.interval());
    }

    /// Changes the step interval. A running step timer restarts with the new interval.
    pub fn set_step_interval(&mut self, interval: Duration) {
        self.config.set_step_interval(interval);

        let uses_step_interval = match &self.session {
            Session::Idle => false,
            Session::Auto(run) => !run.is_highlighting(),
            Session::StepThrough(history) => history.is_auto_playing(),
        };
        if self.timer.is_some() && uses_step_interval {
            self.timer = Some(Ticker::new(self.config.get_step_interval()));
        }
    }

    /// Stops any timer and shows no step, keeping the current session
    pub fn reset(&mut self) {
        self.timer = None;
        self.flags.clear();

        match &mut self.session {
            Session::StepThrough(history) => history.rewind(),
            Session::Auto(_) => self.session = Session::Idle,
            Session::Idle => {}
        }
    }

    /// Drops the current session, its annotations and its timer, e.g. after the graph was
    /// edited
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            debug!("cancelling active run");
        }

        self.timer = None;
        self.session = Session::Idle;
        self.flags.clear();
    }

    /// Lets `elapsed` pass and fires all due ticks in order
    pub fn advance(&mut self, elapsed: Duration) -> Vec<ReplayEvent> {
        let mut events = Vec::new();

        if let Some(timer) = self.timer.as_mut() {
            timer.feed(elapsed);
        }
        while self.timer.as_mut().is_some_and(Ticker::take_due) {
            self.tick(&mut events);
        }

        events
    }

    fn tick(&mut self, events: &mut Vec<ReplayEvent>) {
        match &mut self.session {
            Session::Idle => self.timer = None,

            Session::Auto(run) => match run.tick(&mut self.flags) {
                AutoTick::Applied(step) => events.push(ReplayEvent::StepApplied(step)),
                AutoTick::ResultsPending => {
                    trace!("highlighting result");
                    self.timer = Some(Ticker::new(self.config.get_result_interval()));
                    events.push(ReplayEvent::ResultsStarted);
                }
                AutoTick::Finished(outcome) => {
                    debug!(steps = run.applied(), ok = outcome.is_ok(), "auto run finished");
                    self.timer = None;
                    events.push(ReplayEvent::RunFinished {
                        error: outcome.err(),
                    });
                }
            },

            Session::StepThrough(history) => {
                if !history.is_auto_playing() || !history.step_forward() {
                    history.set_auto_playing(false);
                    self.timer = None;
                    return;
                }

                self.flags = TraceFlags::from_steps(history.visible_steps());
                if let Some(index) = history.index() {
                    trace!(index, "auto-play step");
                    events.push(ReplayEvent::Stepped { index });
                }

                if history.is_complete() {
                    history.set_auto_playing(false);
                    self.timer = None;
                    events.push(ReplayEvent::PlaybackFinished);
                }
            }
        }
    }
}
