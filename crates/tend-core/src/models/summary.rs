//! Routine summary types and functionality.

use serde::{Deserialize, Serialize};

use super::{Category, Routine};

/// Summary information about a routine for list views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutineSummary {
    /// Routine ID
    pub id: String,
    /// Title of the routine
    pub title: String,
    /// Free-text description
    pub description: Option<String>,
    /// Routine category
    pub category: Category,
    /// Titles of the steps in order
    pub step_titles: Vec<String>,
    /// Total number of steps
    pub total_steps: u32,
    /// Number of completed steps
    pub completed_steps: u32,
    /// Sum of step durations in minutes
    pub total_minutes: u32,
    /// Number of steps with a playlist
    pub playlist_count: u32,
}

impl From<&Routine> for RoutineSummary {
    fn from(routine: &Routine) -> Self {
        let completed_steps = routine.steps.iter().filter(|step| step.completed).count() as u32;

        Self {
            id: routine.id.clone(),
            title: routine.title.clone(),
            description: routine.description.clone(),
            category: routine.category.clone(),
            step_titles: routine.steps.iter().map(|step| step.title.clone()).collect(),
            total_steps: routine.steps.len() as u32,
            completed_steps,
            total_minutes: routine.total_minutes(),
            playlist_count: routine.playlist_count() as u32,
        }
    }
}
