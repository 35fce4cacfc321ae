/*!
The step log of a step-through session and the cursor into it.

Navigation only ever moves the cursor; the log itself is append-only. A cursor of `None`
means that no step is shown yet.
*/

use crate::algo::*;

/// Append-only step log with a cursor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepHistory {
    steps: Vec<AlgorithmStep>,
    index: Option<usize>,
    source_exhausted: bool,
    is_auto_playing: bool,
}

impl StepHistory {
    /// Creates an empty history whose source still has steps to deliver
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains `source` completely into a new history
    pub fn from_source<S>(source: S) -> Self
    where
        S: Iterator<Item = AlgorithmStep>,
    {
        let mut history = Self::new();
        history.extend(source);
        history.mark_exhausted();
        history
    }

    /// Appends a step delivered by the source
    pub fn push(&mut self, step: AlgorithmStep) {
        self.steps.push(step);
    }

    /// Records that the source will deliver no further steps
    pub fn mark_exhausted(&mut self) {
        self.source_exhausted = true;
    }

    /// All steps delivered so far
    pub fn steps(&self) -> &[AlgorithmStep] {
        &self.steps
    }

    /// Steps up to and including the cursor
    pub fn visible_steps(&self) -> &[AlgorithmStep] {
        match self.index {
            None => &[],
            Some(i) => &self.steps[..=i],
        }
    }

    /// Number of steps delivered so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns *true* if no step has been delivered
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Position of the cursor; `None` before the first step
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Step under the cursor
    pub fn current(&self) -> Option<&AlgorithmStep> {
        self.index.and_then(|i| self.steps.get(i))
    }

    /// Returns *true* iff the source is exhausted and the cursor is on the last step
    pub fn is_complete(&self) -> bool {
        self.source_exhausted && self.index.map_or(0, |i| i + 1) == self.steps.len()
    }

    /// Returns *true* while auto-play is active
    pub fn is_auto_playing(&self) -> bool {
        self.is_auto_playing
    }

    /// Starts or stops auto-play
    pub fn set_auto_playing(&mut self, auto_playing: bool) {
        self.is_auto_playing = auto_playing;
    }

    /// Number of shown steps and total number of steps
    pub fn progress(&self) -> (usize, usize) {
        (self.index.map_or(0, |i| i + 1), self.steps.len())
    }

    /// Moves the cursor one step forward; returns *false* at the end of the log
    pub fn step_forward(&mut self) -> bool {
        let next = self.index.map_or(0, |i| i + 1);
        if next >= self.steps.len() {
            return false;
        }
        self.index = Some(next);
        true
    }

    /// Moves the cursor one step back; returns *false* if no step is shown
    pub fn step_backward(&mut self) -> bool {
        match self.index {
            None => false,
            Some(0) => {
                self.index = None;
                true
            }
            Some(i) => {
                self.index = Some(i - 1);
                true
            }
        }
    }

    /// Moves the cursor to `index`, clamped to the last step.
    /// On an empty log the cursor stays before the first step.
    pub fn jump_to(&mut self, index: usize) {
        self.index = self.steps.len().checked_sub(1).map(|last| index.min(last));
    }

    /// Moves the cursor before the first step and stops auto-play
    pub fn rewind(&mut self) {
        self.index = None;
        self.is_auto_playing = false;
    }
}

impl Extend<AlgorithmStep> for StepHistory {
    fn extend<T: IntoIterator<Item = AlgorithmStep>>(&mut self, iter: T) {
        self.steps.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn history(n: NodeId) -> StepHistory {
        StepHistory::from_source((1..=n).map(|u| AlgorithmStep::visit(EdgeRef::new(u - 1, u))))
    }

    #[test]
    fn forward_and_backward() {
        let mut h = history(3);
        assert_eq!(h.index(), None);
        assert!(h.current().is_none());
        assert!(!h.step_backward());

        assert!(h.step_forward());
        assert!(h.step_forward());
        assert_eq!(h.index(), Some(1));
        assert_eq!(h.current().map(|s| s.node()), Some(2));
        assert_eq!(h.visible_steps().len(), 2);

        assert!(h.step_backward());
        assert!(h.step_backward());
        assert_eq!(h.index(), None);
        assert!(h.visible_steps().is_empty());
    }

    #[test]
    fn completion() {
        let mut h = history(2);
        assert!(!h.is_complete());
        h.step_forward();
        assert!(!h.is_complete());
        h.step_forward();
        assert!(h.is_complete());
        assert!(!h.step_forward());
        assert_eq!(h.progress(), (2, 2));

        // an open source is never complete
        let mut h = StepHistory::new();
        h.push(AlgorithmStep::visit(EdgeRef::root(1)));
        h.step_forward();
        assert!(!h.is_complete());
        h.mark_exhausted();
        assert!(h.is_complete());

        // an exhausted source without steps is complete right away
        assert!(StepHistory::from_source(std::iter::empty()).is_complete());
    }

    #[test]
    fn jumps_are_clamped() {
        let mut h = history(4);
        h.jump_to(2);
        assert_eq!(h.index(), Some(2));
        h.jump_to(100);
        assert_eq!(h.index(), Some(3));
        h.jump_to(0);
        assert_eq!(h.index(), Some(0));

        let mut empty = StepHistory::from_source(std::iter::empty());
        empty.jump_to(5);
        assert_eq!(empty.index(), None);
    }

    #[test]
    fn navigation_never_changes_the_log() {
        let mut h = history(5);
        let log = h.steps().to_vec();

        h.jump_to(4);
        h.step_backward();
        h.step_forward();
        h.rewind();
        h.jump_to(1);

        assert_eq!(h.steps(), log.as_slice());
    }
}
