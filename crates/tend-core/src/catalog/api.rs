//! Network seam between the catalog and the routine store.

use std::future::Future;

use crate::{error::Result, models::Routine, params::NewRoutine};

/// Remote operations of the routine API.
///
/// Implementations perform exactly one request per call and never retry.
pub trait RoutineApi: Send + Sync {
    /// `GET /routines`
    fn list_routines(&self) -> impl Future<Output = Result<Vec<Routine>>> + Send;

    /// `POST /routines`
    fn create_routine(&self, routine: &NewRoutine)
        -> impl Future<Output = Result<Routine>> + Send;

    /// `PUT /routines/{id}`
    fn replace_routine(
        &self,
        id: &str,
        routine: &NewRoutine,
    ) -> impl Future<Output = Result<Routine>> + Send;

    /// `DELETE /routines/{id}`
    fn delete_routine(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// `PATCH /routines/{routine_id}/steps/{step_id}`
    fn set_step_completion(
        &self,
        routine_id: &str,
        step_id: &str,
        completed: bool,
    ) -> impl Future<Output = Result<Routine>> + Send;
}
