//! Display of a step alongside its running countdown.

use std::fmt;

use super::models::completion_icon;
use crate::{
    models::Step,
    timer::{TimerEngine, TimerState},
};

const BAR_WIDTH: usize = 20;

/// A step of an active routine view with its timer state.
pub struct StepCountdown<'a> {
    /// Position of the step, starting at 1
    pub position: usize,
    pub step: &'a Step,
    pub timer: &'a TimerEngine,
    /// Whether this is the step the user is working on
    pub current: bool,
}

impl fmt::Display for StepCountdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.current { "▶ " } else { "" };
        writeln!(
            f,
            "### {marker}{}. {} ({})",
            self.position,
            self.step.title,
            completion_icon(self.step.completed)
        )?;
        writeln!(f)?;

        let state = match self.timer.state() {
            TimerState::Running => "Running",
            TimerState::Paused => "Paused",
            TimerState::Idle if self.timer.is_complete() => "Finished",
            TimerState::Idle => "Ready",
        };
        let elapsed = ((1.0 - self.timer.progress()) * BAR_WIDTH as f64).round() as usize;
        let elapsed = elapsed.min(BAR_WIDTH);
        writeln!(
            f,
            "`{}` {}{} {state}",
            self.timer.countdown(),
            "█".repeat(elapsed),
            "░".repeat(BAR_WIDTH - elapsed)
        )?;

        if let Some((platform, url)) = self.step.playlist() {
            writeln!(f)?;
            writeln!(f, "Music: [Open in {platform}]({url})")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_countdown_display() {
        let step = Step::new("s1", "Stretch", 1);
        let mut timer = TimerEngine::new(1).unwrap();
        timer.start();
        for _ in 0..30 {
            timer.tick();
        }

        let output = StepCountdown {
            position: 1,
            step: &step,
            timer: &timer,
            current: true,
        }
        .to_string();

        assert!(output.starts_with("### ▶ 1. Stretch (○ Todo)"));
        assert!(output.contains("`00:30` ██████████░░░░░░░░░░ Running"));
    }

    #[test]
    fn test_finished_countdown() {
        let step = Step::new("s1", "Stretch", 1);
        let mut timer = TimerEngine::new(1).unwrap();
        timer.start();
        for _ in 0..60 {
            timer.tick();
        }

        let output = StepCountdown {
            position: 2,
            step: &step,
            timer: &timer,
            current: false,
        }
        .to_string();
        assert!(output.contains("`00:00` ████████████████████ Finished"));
    }
}
