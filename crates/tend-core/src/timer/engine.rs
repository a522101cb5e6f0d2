//! Countdown state machine of a single step.
//!
//! The engine has no clock of its own. The caller drives it by calling
//! `tick()` once per second, see [`super::StepTimer`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           +-- remaining hits 0 --> Idle (complete) -- reset --> Idle
//! ```

use std::fmt;

use crate::error::{Result, TendError};

/// Run state of a [`TimerEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Event produced by [`TimerEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown reached zero during this tick
    Completed,
}

/// Pure countdown over a step's duration.
///
/// The engine knows nothing about wall-clock time: every call to
/// [`tick`](Self::tick) counts as one elapsed second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    total_secs: u32,
    remaining_secs: u32,
    state: TimerState,
    complete: bool,
}

impl TimerEngine {
    /// Creates an idle engine for a step of `duration_minutes`.
    ///
    /// # Errors
    ///
    /// Returns `TendError::InvalidInput` for a zero duration.
    pub fn new(duration_minutes: u32) -> Result<Self> {
        if duration_minutes == 0 {
            return Err(TendError::invalid_input("duration")
                .with_reason("Duration must be at least 1 minute"));
        }

        let total_secs = duration_minutes.saturating_mul(60);
        Ok(Self {
            total_secs,
            remaining_secs: total_secs,
            state: TimerState::Idle,
            complete: false,
        })
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Whether the countdown ran to zero since the last reset.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Fraction of the countdown still remaining, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        f64::from(self.remaining_secs) / f64::from(self.total_secs)
    }

    /// Remaining time formatted as `MM:SS`.
    pub fn countdown(&self) -> Countdown {
        Countdown(self.remaining_secs)
    }

    /// Idle or Paused to Running. No-op once complete until reset.
    pub fn start(&mut self) {
        if !self.complete {
            self.state = TimerState::Running;
        }
    }

    /// Running to Paused, remaining time kept.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) {
        match self.state {
            TimerState::Running => self.pause(),
            TimerState::Idle | TimerState::Paused => self.start(),
        }
    }

    /// Back to Idle with the full duration, clearing completion.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs;
        self.complete = false;
    }

    /// Counts down one second.
    ///
    /// Returns [`TimerEvent::Completed`] on the tick that reaches zero and
    /// `None` otherwise. Ticks outside the Running state change nothing.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        self.state = TimerState::Idle;
        self.complete = true;
        Some(TimerEvent::Completed)
    }
}

/// Seconds displayed as zero-padded `MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown(pub u32);

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}
