//! Data models for routines and steps.
//!
//! This module contains the core domain models that represent routines and
//! their embedded steps. Display implementations for these models are located
//! in [`crate::display::models`] so the data structures stay free of
//! presentation logic.
//!
//! # Wire Format
//!
//! All models serialize to the JSON shape served by the routine API:
//!
//! ```text
//! { id, title, description, category,
//!   steps: [{ id, title, duration, completed, musicUrl?, musicPlatform? }],
//!   createdAt, updatedAt }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use tend_core::models::{Category, Routine, Step};
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
//! assert_eq!(routine.total_minutes(), 5);
//! ```

pub mod category;
pub mod music;
pub mod routine;
pub mod step;
pub mod summary;


pub use category::Category;
pub use music::MusicPlatform;
pub use routine::Routine;
pub use step::Step;
pub use summary::RoutineSummary;
