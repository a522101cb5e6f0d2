//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and operation results so
//! the same data can be formatted differently per context. Everything is
//! markdown, turned into styled terminal output by the CLI renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers        │    │   Markdown      │
//! │ (Routine, Step) │───▶│ & Result Types  │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use tend_core::{
//!     display::{CreateResult, OperationStatus},
//!     models::{Category, Routine, Step},
//! };
//! use jiff::Timestamp;
//!
//! let routine = Routine {
//!     id: "r-1".to_string(),
//!     title: "Morning".to_string(),
//!     description: None,
//!     category: Category::Morning,
//!     steps: vec![Step::new("s-1", "Stretch", 5)],
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//!
//! let output = CreateResult::new(routine).to_string();
//! assert!(output.contains("Created routine with ID: r-1"));
//!
//! let status = OperationStatus::success("Routine saved");
//! assert_eq!(status.to_string(), "Success: Routine saved\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;
pub mod timer;

pub use collections::RoutineSummaries;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
pub use timer::StepCountdown;
