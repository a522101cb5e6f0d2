//! Routine model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Category, Step};

/// A named, ordered collection of steps as stored by the routine service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    /// Opaque unique identifier, immutable after creation
    pub id: String,

    /// Display title of the routine
    pub title: String,

    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,

    /// Classification of the routine
    #[serde(default)]
    pub category: Category,

    /// Steps in execution order
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Timestamp when the routine was stored (UTC)
    pub created_at: Timestamp,

    /// Timestamp of the last write (UTC)
    pub updated_at: Timestamp,
}

impl Routine {
    /// Look up a step by its identifier.
    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == step_id)
    }

    /// Mutable lookup of a step by its identifier.
    pub fn step_mut(&mut self, step_id: &str) -> Option<&mut Step> {
        self.steps.iter_mut().find(|step| step.id == step_id)
    }

    /// Sum of all step durations in minutes, saturating at `u32::MAX`.
    pub fn total_minutes(&self) -> u32 {
        self.steps
            .iter()
            .fold(0u32, |total, step| total.saturating_add(step.duration))
    }

    /// Number of steps that link to a playlist.
    pub fn playlist_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.music_url.is_some())
            .count()
    }

    /// Whether every step is completed (false for an empty routine).
    pub fn is_complete(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|step| step.completed)
    }
}
