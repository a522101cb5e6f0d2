//! Routine operations for the RoutineStore.

use super::RoutineStore;
use crate::{
    error::{Result, TendError},
    models::{Routine, RoutineSummary},
    params::{Id, NewRoutine},
};

impl RoutineStore {
    /// Lists every stored routine in insertion order.
    pub async fn list_routines(&self) -> Result<Vec<Routine>> {
        self.with_database(|db| db.list_routines()).await
    }

    /// Lists summaries of every stored routine.
    pub async fn list_routine_summaries(&self) -> Result<Vec<RoutineSummary>> {
        let routines = self.list_routines().await?;
        Ok(routines.iter().map(RoutineSummary::from).collect())
    }

    /// Retrieves a routine by its ID.
    pub async fn get_routine(&self, params: &Id) -> Result<Option<Routine>> {
        let id = params.id.clone();
        self.with_database(move |db| db.get_routine(&id)).await
    }

    /// Validates and stores a new routine.
    ///
    /// # Errors
    ///
    /// * `TendError::InvalidInput` - the payload breaks a field rule, or one
    ///   of its IDs is taken or retired
    pub async fn create_routine(&self, params: NewRoutine) -> Result<Routine> {
        params.validate()?;
        log::debug!("Creating routine '{}' with {} steps", params.title, params.steps.len());

        let routine = self.with_database(move |db| db.insert_routine(params)).await?;
        log::info!("Created routine {}", routine.id);
        Ok(routine)
    }

    /// Replaces the whole document of routine `id`.
    ///
    /// # Errors
    ///
    /// * `TendError::InvalidInput` - the payload breaks a field rule
    /// * `TendError::RoutineNotFound` - no routine has this ID
    pub async fn replace_routine(&self, params: &Id, routine: NewRoutine) -> Result<Routine> {
        routine.validate()?;
        let id = params.id.clone();

        let routine = self
            .with_database(move |db| db.replace_routine(&id, routine))
            .await?;
        log::info!("Replaced routine {}", routine.id);
        Ok(routine)
    }

    /// Deletes a routine and returns what was removed.
    ///
    /// # Errors
    ///
    /// * `TendError::RoutineNotFound` - no routine has this ID
    pub async fn delete_routine(&self, params: &Id) -> Result<Routine> {
        let id = params.id.clone();

        let deleted = self
            .with_database({
                let id = id.clone();
                move |db| db.delete_routine(&id)
            })
            .await?
            .ok_or(TendError::RoutineNotFound { id })?;
        log::info!("Deleted routine {}", deleted.id);
        Ok(deleted)
    }
}
