//! Per-view collection of step timers.

use std::{
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};

use super::ticker::{Chime, StepTimer};
use crate::{error::Result, models::Step};

/// Callback receiving the ID of the step whose countdown completed.
pub type StepCompletionCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Timers of one routine view, indexed by step ID.
///
/// The arena owns every timer it creates; dropping it or calling
/// [`stop_all`](Self::stop_all) cancels all tick sources.
pub struct TimerArena {
    timers: HashMap<String, StepTimer>,
    chime: Arc<dyn Chime>,
    on_complete: StepCompletionCallback,
}

impl TimerArena {
    pub fn new(chime: Arc<dyn Chime>, on_complete: StepCompletionCallback) -> Self {
        Self {
            timers: HashMap::new(),
            chime,
            on_complete,
        }
    }

    /// Builds an arena holding one idle timer per step.
    pub fn for_steps(
        steps: &[Step],
        chime: Arc<dyn Chime>,
        on_complete: StepCompletionCallback,
    ) -> Result<Self> {
        let mut arena = Self::new(chime, on_complete);
        for step in steps {
            arena.insert(&step.id, step.duration)?;
        }
        Ok(arena)
    }

    /// Creates or replaces the timer of `step_id`.
    pub fn insert(&mut self, step_id: &str, duration_minutes: u32) -> Result<&mut StepTimer> {
        let step = step_id.to_string();
        let on_complete = Arc::clone(&self.on_complete);
        let timer = StepTimer::new(
            duration_minutes,
            Arc::clone(&self.chime),
            Arc::new(move || on_complete(&step)),
        )?;

        let timer = match self.timers.entry(step_id.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(timer);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(timer),
        };
        Ok(timer)
    }

    pub fn get(&self, step_id: &str) -> Option<&StepTimer> {
        self.timers.get(step_id)
    }

    pub fn get_mut(&mut self, step_id: &str) -> Option<&mut StepTimer> {
        self.timers.get_mut(step_id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Number of timers with a live tick source.
    pub fn ticking(&self) -> usize {
        self.timers.values().filter(|timer| timer.is_ticking()).count()
    }

    /// Cancels every tick source, keeping the timers and their remaining time.
    pub fn stop_all(&mut self) {
        for timer in self.timers.values_mut() {
            timer.stop();
        }
    }
}
