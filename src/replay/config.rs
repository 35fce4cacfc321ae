use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::timer::MIN_INTERVAL;

/// Speed presets offered by playback controls
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl PlaybackSpeed {
    /// Step interval of this preset
    pub const fn interval(self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(1000),
            Self::Normal => Duration::from_millis(500),
            Self::Fast => Duration::from_millis(200),
        }
    }
}

/// Timing of the replay engine
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    step_interval: Duration,
    result_interval: Duration,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            step_interval: PlaybackSpeed::Normal.interval(),
            result_interval: Duration::from_millis(300),
        }
    }
}

impl ReplayConfig {
    /// Creates the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Interval between steps in auto mode and during auto-play
    pub fn get_step_interval(&self) -> Duration {
        self.step_interval
    }

    /// Interval between highlighted result edges in auto mode
    pub fn get_result_interval(&self) -> Duration {
        self.result_interval
    }

    /// Sets the interval between steps (at least 1ms)
    pub fn set_step_interval(&mut self, interval: Duration) {
        self.step_interval = interval.max(MIN_INTERVAL);
    }

    /// Sets the interval between steps (at least 1ms)
    pub fn step_interval(mut self, interval: Duration) -> Self {
        self.set_step_interval(interval);
        self
    }

    /// Sets the interval between highlighted result edges (at least 1ms)
    pub fn set_result_interval(&mut self, interval: Duration) {
        self.result_interval = interval.max(MIN_INTERVAL);
    }

    /// Sets the interval between highlighted result edges (at least 1ms)
    pub fn result_interval(mut self, interval: Duration) -> Self {
        self.set_result_interval(interval);
        self
    }

    /// Sets the step interval from a preset
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.set_step_interval(speed.interval());
    }

    /// Sets the step interval from a preset
    pub fn speed(mut self, speed: PlaybackSpeed) -> Self {
        self.set_speed(speed);
        self
    }
}
