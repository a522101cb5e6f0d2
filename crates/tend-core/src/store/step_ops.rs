//! Step operations for the RoutineStore.

use super::RoutineStore;
use crate::{error::Result, models::Routine, params::SetStepCompletion};

impl RoutineStore {
    /// Persists the completion flag of one step.
    ///
    /// Returns the whole updated routine.
    ///
    /// # Errors
    ///
    /// * `TendError::RoutineNotFound` - no routine has `routine_id`
    /// * `TendError::StepNotFound` - the routine has no step `step_id`
    pub async fn set_step_completion(&self, params: &SetStepCompletion) -> Result<Routine> {
        let SetStepCompletion {
            routine_id,
            step_id,
            completed,
        } = params.clone();
        log::debug!("Setting step {step_id} of routine {routine_id} to completed={completed}");

        self.with_database(move |db| db.set_step_completion(&routine_id, &step_id, completed))
            .await
    }
}
