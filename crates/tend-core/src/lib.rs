//! Core library of the tend self-care routine tracker.
//!
//! Routines are ordered lists of timed steps, optionally linked to a music
//! playlist. This crate holds everything both ends of the application share:
//!
//! - [`models`] and [`params`]: the routine document and its validation
//! - [`db`] and [`store`]: SQLite persistence and the async store API used by
//!   the HTTP server
//! - [`catalog`]: the client's versioned routine snapshot and HTTP client
//! - [`timer`]: per-step countdown timers
//! - [`display`]: markdown formatting for terminal output
//! - [`config`] and [`error`]: startup configuration and the error type
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tend_core::{params::{NewRoutine, NewStep}, RoutineStoreBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RoutineStoreBuilder::new()
//!     .with_database_path("tend.db")
//!     .build()
//!     .await?;
//!
//! let mut params = NewRoutine::new("Evening");
//! params.steps.push(NewStep::new("Read", 20));
//! let routine = store.create_routine(params).await?;
//! println!("{routine}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod store;
pub mod timer;

pub use catalog::{
    HttpRoutineApi, Notification, NotificationPermission, Notifier, RoutineApi, RoutineCatalog,
};
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, LocalDateTime, OperationStatus, RoutineSummaries, StepCountdown,
    UpdateResult,
};
pub use error::{ErrorBody, Result, TendError};
pub use models::{Category, MusicPlatform, Routine, RoutineSummary, Step};
pub use params::{Id, NewRoutine, NewStep, SetStepCompletion, StepCompletion, MAX_STEP_MINUTES};
pub use store::{RoutineStore, RoutineStoreBuilder};
pub use timer::{Chime, StepTimer, TimerArena, TimerEngine, TimerState};
