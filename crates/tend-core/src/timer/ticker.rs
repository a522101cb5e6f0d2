//! Tokio tick source driving a [`TimerEngine`].

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{
    task::JoinHandle,
    time::{self, Instant},
};

use super::engine::{TimerEngine, TimerEvent};
use crate::error::Result;

/// Interval between two ticks of a running timer.
pub const TICK: Duration = Duration::from_secs(1);

/// Sound played when a countdown reaches zero.
pub trait Chime: Send + Sync {
    fn play(&self);
}

/// Chime that makes no sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentChime;

impl Chime for SilentChime {
    fn play(&self) {}
}

/// Callback invoked once per completed countdown.
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

fn lock(engine: &Mutex<TimerEngine>) -> MutexGuard<'_, TimerEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A step countdown with at most one live tick source.
///
/// Must be started from within a tokio runtime. Dropping the timer cancels
/// its tick source.
pub struct StepTimer {
    engine: Arc<Mutex<TimerEngine>>,
    chime: Arc<dyn Chime>,
    on_complete: CompletionCallback,
    ticker: Option<JoinHandle<()>>,
}

impl StepTimer {
    /// Creates an idle timer for a step of `duration_minutes`.
    pub fn new(
        duration_minutes: u32,
        chime: Arc<dyn Chime>,
        on_complete: CompletionCallback,
    ) -> Result<Self> {
        Ok(Self {
            engine: Arc::new(Mutex::new(TimerEngine::new(duration_minutes)?)),
            chime,
            on_complete,
            ticker: None,
        })
    }

    /// Copy of the current engine state.
    pub fn snapshot(&self) -> TimerEngine {
        lock(&self.engine).clone()
    }

    /// Whether a tick source is currently attached.
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Starts or resumes the countdown, replacing any prior tick source.
    pub fn start(&mut self) {
        self.cancel_ticker();

        let running = {
            let mut engine = lock(&self.engine);
            engine.start();
            engine.is_running()
        };
        if running {
            self.ticker = Some(self.spawn_ticker());
        }
    }

    /// Pauses the countdown and drops the tick source.
    pub fn pause(&mut self) {
        self.cancel_ticker();
        lock(&self.engine).pause();
    }

    pub fn toggle(&mut self) {
        if lock(&self.engine).is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Returns to the full duration, idle and not complete.
    pub fn reset(&mut self) {
        self.cancel_ticker();
        lock(&self.engine).reset();
    }

    /// Cancels the tick source, leaving a running countdown paused.
    pub fn stop(&mut self) {
        self.pause();
    }

    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    fn spawn_ticker(&self) -> JoinHandle<()> {
        let engine = Arc::clone(&self.engine);
        let chime = Arc::clone(&self.chime);
        let on_complete = Arc::clone(&self.on_complete);

        tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK, TICK);
            loop {
                interval.tick().await;

                let (event, running) = {
                    let mut engine = lock(&engine);
                    let event = engine.tick();
                    (event, engine.is_running())
                };

                if let Some(TimerEvent::Completed) = event {
                    log::debug!("Step countdown completed");
                    chime.play();
                    on_complete();
                    break;
                }
                if !running {
                    break;
                }
            }
        })
    }
}

impl Drop for StepTimer {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

impl std::fmt::Debug for StepTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepTimer")
            .field("engine", &self.snapshot())
            .field("ticking", &self.is_ticking())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::timer::TimerState;

    #[derive(Default)]
    struct CountingChime(AtomicUsize);

    impl Chime for CountingChime {
        fn play(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting_timer(minutes: u32) -> (StepTimer, Arc<CountingChime>, Arc<AtomicUsize>) {
        let chime = Arc::new(CountingChime::default());
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completions);
        let timer = StepTimer::new(
            minutes,
            chime.clone(),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();
        (timer, chime, completions)
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_minute_timer_completes_once() {
        let (mut timer, chime, completions) = counting_timer(1);
        timer.start();

        time::sleep(Duration::from_millis(59_500)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 0);
        assert_eq!(timer.snapshot().countdown().to_string(), "00:01");

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert_eq!(chime.0.load(Ordering::SeqCst), 1);
        assert!(timer.snapshot().is_complete());
        assert!(!timer.is_ticking());

        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_holds_remaining_time() {
        let (mut timer, _chime, completions) = counting_timer(1);
        timer.start();
        time::sleep(Duration::from_millis(10_500)).await;
        timer.toggle();

        let paused = timer.snapshot();
        assert_eq!(paused.state(), TimerState::Paused);
        assert_eq!(paused.remaining_secs(), 50);

        time::sleep(Duration::from_secs(300)).await;
        assert_eq!(timer.snapshot().remaining_secs(), 50);
        assert_eq!(completions.load(Ordering::SeqCst), 0);

        timer.toggle();
        time::sleep(Duration::from_millis(50_500)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_keeps_single_tick_source() {
        let (mut timer, _chime, _completions) = counting_timer(1);
        timer.start();
        timer.start();
        timer.start();

        time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(timer.snapshot().remaining_secs(), 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_after_completion_allows_new_run() {
        let (mut timer, _chime, completions) = counting_timer(1);
        timer.start();
        time::sleep(Duration::from_secs(61)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 1);

        timer.start();
        assert!(!timer.is_ticking());

        timer.reset();
        assert_eq!(timer.snapshot().remaining_secs(), 60);
        timer.start();
        time::sleep(Duration::from_secs(61)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_tick_source() {
        let (mut timer, _chime, completions) = counting_timer(1);
        timer.start();
        time::sleep(Duration::from_secs(30)).await;
        drop(timer);

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 0);
    }
}
