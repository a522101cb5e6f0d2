//! Interactive walk-through of one routine.
//!
//! The session owns a [`TimerArena`] with one timer per step. Keyboard
//! commands arrive line by line on stdin, completed countdowns arrive on a
//! channel fed by the timer callbacks, and a one second interval redraws the
//! active countdown. Leaving the session stops every timer.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use tend_core::{
    timer::StepCompletionCallback, Notifier, Routine, RoutineApi, RoutineCatalog, Step,
    StepCountdown, TimerArena,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use crate::{cli::open_playlist, notify::TerminalBell, renderer::TerminalRenderer};

const HELP: &str = "Commands: [p] start/pause  [r] reset  [n] next  [b] back  \
[o] open music  [c] complete  [l] list  [q] quit\n";

/// A keyboard command of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Toggle,
    Reset,
    Next,
    Back,
    OpenMusic,
    Complete,
    List,
    Quit,
    Help,
}

impl Key {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "p" | "" => Some(Key::Toggle),
            "r" => Some(Key::Reset),
            "n" => Some(Key::Next),
            "b" => Some(Key::Back),
            "o" => Some(Key::OpenMusic),
            "c" => Some(Key::Complete),
            "l" => Some(Key::List),
            "q" => Some(Key::Quit),
            "h" | "?" => Some(Key::Help),
            _ => None,
        }
    }
}

/// Runs the routine `routine_id` until the user quits or stdin closes.
pub async fn run<A: RoutineApi, N: Notifier>(
    catalog: &mut RoutineCatalog<A, N>,
    renderer: &TerminalRenderer,
    routine_id: &str,
    persist_completion: bool,
) -> Result<()> {
    let routine = catalog.select(routine_id)?.clone();
    renderer.render(&routine.to_string())?;
    if routine.steps.is_empty() {
        catalog.clear_selection();
        return Ok(());
    }

    let (completed_tx, mut completed_rx) = mpsc::unbounded_channel::<String>();
    let on_complete: StepCompletionCallback = Arc::new(move |step_id: &str| {
        // The receiver only goes away when the session ends.
        let _ = completed_tx.send(step_id.to_string());
    });
    let mut timers = TimerArena::for_steps(&routine.steps, Arc::new(TerminalBell), on_complete)
        .context("Failed to create step timers")?;

    let mut session = Session {
        routine_id: routine.id.clone(),
        current: first_open_step(&routine),
        persist_completion,
    };
    let result = session
        .event_loop(catalog, &mut timers, &mut completed_rx, renderer)
        .await;

    timers.stop_all();
    catalog.clear_selection();
    log::info!("Left routine {}", session.routine_id);
    result
}

/// Largest valid index at or below `current`, `None` for an empty list.
fn clamp_index(current: usize, len: usize) -> Option<usize> {
    len.checked_sub(1).map(|last| current.min(last))
}

fn first_open_step(routine: &Routine) -> usize {
    routine
        .steps
        .iter()
        .position(|step| !step.completed)
        .unwrap_or(0)
}

struct Session {
    routine_id: String,
    current: usize,
    persist_completion: bool,
}

impl Session {
    async fn event_loop<A: RoutineApi, N: Notifier>(
        &mut self,
        catalog: &mut RoutineCatalog<A, N>,
        timers: &mut TimerArena,
        completed_rx: &mut mpsc::UnboundedReceiver<String>,
        renderer: &TerminalRenderer,
    ) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut redraw = time::interval(Duration::from_secs(1));
        redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

        renderer.render(HELP)?;

        loop {
            let routine = self.routine(catalog)?;
            if self.sync_current(routine).is_none() {
                renderer.render("No steps left in this routine.\n")?;
                return Ok(());
            }
            self.render_current(catalog, timers, renderer)?;

            tokio::select! {
                Some(step_id) = completed_rx.recv() => {
                    self.on_step_completed(catalog, &step_id).await?;
                }
                _ = redraw.tick() => {
                    if timers.ticking() == 0 {
                        continue;
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        return Ok(());
                    };
                    match Key::parse(&line) {
                        Some(Key::Quit) => return Ok(()),
                        Some(Key::List) => {
                            self.render_all(self.routine(catalog)?, timers, renderer)?;
                            continue;
                        }
                        Some(Key::Help) | None => {
                            renderer.render(HELP)?;
                            continue;
                        }
                        Some(key) => self.handle_key(key, catalog, timers, renderer).await?,
                    }
                }
            }
        }
    }

    fn routine<'a, A: RoutineApi, N: Notifier>(
        &self,
        catalog: &'a RoutineCatalog<A, N>,
    ) -> Result<&'a Routine> {
        catalog
            .get(&self.routine_id)
            .with_context(|| format!("Routine {} is no longer loaded", self.routine_id))
    }

    /// Points `current` at a step that exists in `routine`. Another session
    /// may have shortened the routine since the last reload.
    fn sync_current<'a>(&mut self, routine: &'a Routine) -> Option<&'a Step> {
        let index = clamp_index(self.current, routine.steps.len())?;
        self.current = index;
        routine.steps.get(index)
    }

    async fn handle_key<A: RoutineApi, N: Notifier>(
        &mut self,
        key: Key,
        catalog: &mut RoutineCatalog<A, N>,
        timers: &mut TimerArena,
        renderer: &TerminalRenderer,
    ) -> Result<()> {
        let routine = self.routine(catalog)?;
        let step_count = routine.steps.len();
        let Some(step) = self.sync_current(routine) else {
            return Ok(());
        };
        let step_id = step.id.clone();

        match key {
            Key::Toggle => {
                if let Some(timer) = timers.get_mut(&step_id) {
                    timer.toggle();
                }
            }
            Key::Reset => {
                if let Some(timer) = timers.get_mut(&step_id) {
                    timer.reset();
                }
            }
            Key::Next => {
                if let Some(next) = clamp_index(self.current + 1, step_count) {
                    self.current = next;
                }
            }
            Key::Back => self.current = self.current.saturating_sub(1),
            Key::OpenMusic => {
                let status = open_playlist(step)?;
                renderer.render(&status.to_string())?;
            }
            Key::Complete => {
                if let Some(timer) = timers.get_mut(&step_id) {
                    timer.stop();
                }
                self.on_step_completed(catalog, &step_id).await?;
            }
            Key::List | Key::Help | Key::Quit => {}
        }
        Ok(())
    }

    async fn on_step_completed<A: RoutineApi, N: Notifier>(
        &mut self,
        catalog: &mut RoutineCatalog<A, N>,
        step_id: &str,
    ) -> Result<()> {
        match catalog.complete_step(&self.routine_id, step_id) {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                log::warn!("Step {step_id} is no longer part of routine {}", self.routine_id);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        if self.persist_completion {
            if let Err(e) = catalog
                .persist_step_completion(&self.routine_id, step_id, true)
                .await
            {
                // The local flag stays set; the next refresh shows the stored one.
                log::warn!("Completion of step {step_id} was not saved: {e}");
            }
        }

        let routine = self.routine(catalog)?;
        if let Some(next) = routine
            .steps
            .iter()
            .enumerate()
            .skip(self.current)
            .find(|(_, step)| !step.completed)
            .map(|(index, _)| index)
        {
            self.current = next;
        }
        Ok(())
    }

    fn render_current<A: RoutineApi, N: Notifier>(
        &self,
        catalog: &RoutineCatalog<A, N>,
        timers: &TimerArena,
        renderer: &TerminalRenderer,
    ) -> Result<()> {
        let routine = self.routine(catalog)?;
        let Some(step) = routine.steps.get(self.current) else {
            return Ok(());
        };
        let Some(timer) = timers.get(&step.id) else {
            return Ok(());
        };

        let engine = timer.snapshot();
        let countdown = StepCountdown {
            position: self.current + 1,
            step,
            timer: &engine,
            current: true,
        };
        renderer.render(&countdown.to_string())
    }

    fn render_all(
        &self,
        routine: &Routine,
        timers: &TimerArena,
        renderer: &TerminalRenderer,
    ) -> Result<()> {
        let mut output = format!("# {}\n\n", routine.title);
        for (index, step) in routine.steps.iter().enumerate() {
            let Some(timer) = timers.get(&step.id) else {
                continue;
            };
            let engine = timer.snapshot();
            let countdown = StepCountdown {
                position: index + 1,
                step,
                timer: &engine,
                current: index == self.current,
            };
            output.push_str(&countdown.to_string());
        }
        renderer.render(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::parse("p"), Some(Key::Toggle));
        assert_eq!(Key::parse(""), Some(Key::Toggle));
        assert_eq!(Key::parse(" Q "), Some(Key::Quit));
        assert_eq!(Key::parse("?"), Some(Key::Help));
        assert_eq!(Key::parse("x"), None);
    }

    #[test]
    fn test_first_open_step() {
        let mut routine = evening();
        assert_eq!(first_open_step(&routine), 0);

        routine.steps[0].completed = true;
        assert_eq!(first_open_step(&routine), 1);

        routine.steps[1].completed = true;
        assert_eq!(first_open_step(&routine), 0);
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(0, 3), Some(0));
        assert_eq!(clamp_index(2, 3), Some(2));
        assert_eq!(clamp_index(5, 3), Some(2));
        assert_eq!(clamp_index(0, 0), None);
    }

    #[test]
    fn test_session_follows_shorter_routine() {
        let mut routine = evening();
        routine.steps.push(Step::new("s-3", "Dream", 5));
        let mut session = Session {
            routine_id: routine.id.clone(),
            current: 2,
            persist_completion: true,
        };
        assert_eq!(session.sync_current(&routine).map(|s| s.title.as_str()), Some("Dream"));

        // Another session removed the first step and the server copy was swapped in.
        routine.steps.remove(0);
        assert_eq!(session.sync_current(&routine).map(|s| s.title.as_str()), Some("Dream"));
        assert_eq!(session.current, 1);

        routine.steps.clear();
        assert!(session.sync_current(&routine).is_none());
    }

    fn evening() -> Routine {
        use tend_core::{NewRoutine, NewStep};

        let mut params = NewRoutine::new("Evening");
        params.steps = vec![NewStep::new("Read", 20), NewStep::new("Sleep", 1)];
        let now = jiff::Timestamp::now();
        params.into_routine(now, now)
    }
}
