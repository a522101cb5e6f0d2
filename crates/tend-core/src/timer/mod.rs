//! Step countdown timers.
//!
//! - [`TimerEngine`]: pure state machine counting down a step's duration
//! - [`StepTimer`]: an engine plus the tokio interval that ticks it
//! - [`TimerArena`]: the timers of one routine view, keyed by step ID

pub mod arena;
pub mod engine;
pub mod ticker;

pub use arena::{StepCompletionCallback, TimerArena};
pub use engine::{Countdown, TimerEngine, TimerEvent, TimerState};
pub use ticker::{Chime, CompletionCallback, SilentChime, StepTimer, TICK};
