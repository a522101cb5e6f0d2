//! Client-side routine catalog.
//!
//! The catalog keeps the front-end's view of the routine list as a versioned
//! snapshot. Every network operation replaces or patches the snapshot only
//! after the server confirmed it, so a failed request leaves the catalog
//! exactly as it was. [`RoutineCatalog::complete_step`] is the one local-only
//! mutation: it marks the step done and raises a notification without
//! talking to the server.

use crate::{
    error::{Result, TendError},
    models::{Category, Routine, RoutineSummary},
    params::{generate_id, NewRoutine, NewStep},
};

pub mod api;
pub mod http;
pub mod notify;


pub use api::RoutineApi;
pub use http::HttpRoutineApi;
pub use notify::{Notification, NotificationPermission, Notifier};

/// Versioned snapshot of all routines plus the current selection.
pub struct RoutineCatalog<A, N> {
    api: A,
    notifier: N,
    routines: Vec<Routine>,
    version: u64,
    selected: Option<String>,
}

impl<A: RoutineApi, N: Notifier> RoutineCatalog<A, N> {
    /// Creates an empty catalog. Call [`refresh`](Self::refresh) to load it.
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            routines: Vec::new(),
            version: 0,
            selected: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    /// Counter bumped on every change of the snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, id: &str) -> Option<&Routine> {
        self.routines.iter().find(|routine| routine.id == id)
    }

    pub fn summaries(&self) -> Vec<RoutineSummary> {
        self.routines.iter().map(RoutineSummary::from).collect()
    }

    /// Selects a routine for the detail view.
    pub fn select(&mut self, id: &str) -> Result<&Routine> {
        let index = self.position(id)?;
        self.selected = Some(id.to_string());
        Ok(&self.routines[index])
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Routine> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Replaces the snapshot with the server's routine list.
    pub async fn refresh(&mut self) -> Result<()> {
        let routines = self.api.list_routines().await.map_err(|e| {
            log::error!("Error fetching routines: {e}");
            e
        })?;

        log::debug!("Fetched {} routines", routines.len());
        self.routines = routines;
        if self.selected().is_none() {
            self.selected = None;
        }
        self.bump();
        Ok(())
    }

    /// Creates a custom routine with a fresh ID and appends the stored copy.
    pub async fn add(
        &mut self,
        title: &str,
        description: Option<String>,
        steps: Vec<NewStep>,
    ) -> Result<&Routine> {
        let steps = steps
            .into_iter()
            .map(|step| NewStep {
                id: step.id.or_else(|| Some(generate_id())),
                ..step
            })
            .collect();
        let params = NewRoutine {
            id: Some(generate_id()),
            title: title.to_string(),
            description,
            category: Category::Custom,
            steps,
        };

        let saved = self.api.create_routine(&params).await.map_err(|e| {
            log::error!("Error saving routine: {e}");
            e
        })?;

        self.routines.push(saved);
        self.bump();
        let index = self.routines.len() - 1;
        Ok(&self.routines[index])
    }

    /// Replaces a routine on the server and in the snapshot.
    pub async fn edit(&mut self, routine: &Routine) -> Result<&Routine> {
        let params = NewRoutine::from(routine);
        let saved = self
            .api
            .replace_routine(&routine.id, &params)
            .await
            .map_err(|e| {
                log::error!("Error updating routine {}: {e}", routine.id);
                e
            })?;

        Ok(self.replace_entry(saved))
    }

    /// Deletes a routine, clearing the selection if it pointed at it.
    pub async fn remove(&mut self, id: &str) -> Result<()> {
        self.api.delete_routine(id).await.map_err(|e| {
            log::error!("Error deleting routine {id}: {e}");
            e
        })?;

        self.routines.retain(|routine| routine.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.bump();
        Ok(())
    }

    /// Marks a step completed locally and notifies the user.
    ///
    /// No request is sent; see [`persist_step_completion`](Self::persist_step_completion).
    pub fn complete_step(&mut self, routine_id: &str, step_id: &str) -> Result<()> {
        let index = self.position(routine_id)?;
        let step = self.routines[index]
            .step_mut(step_id)
            .ok_or_else(|| TendError::StepNotFound {
                routine_id: routine_id.to_string(),
                step_id: step_id.to_string(),
            })?;

        step.completed = true;
        let notification = Notification::step_complete(&step.title);
        self.bump();

        match self.notifier.request_permission() {
            NotificationPermission::Granted => self.notifier.notify(&notification),
            NotificationPermission::Denied => {
                log::debug!("Notification permission denied, skipping '{}'", notification.body);
            }
        }
        Ok(())
    }

    /// Stores a step's completion flag on the server and adopts the result.
    pub async fn persist_step_completion(
        &mut self,
        routine_id: &str,
        step_id: &str,
        completed: bool,
    ) -> Result<&Routine> {
        let saved = self
            .api
            .set_step_completion(routine_id, step_id, completed)
            .await
            .map_err(|e| {
                log::warn!("Error saving completion of step {step_id}: {e}");
                e
            })?;

        Ok(self.replace_entry(saved))
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.routines
            .iter()
            .position(|routine| routine.id == id)
            .ok_or_else(|| TendError::RoutineNotFound { id: id.to_string() })
    }

    fn replace_entry(&mut self, saved: Routine) -> &Routine {
        self.bump();
        match self.routines.iter().position(|routine| routine.id == saved.id) {
            Some(index) => {
                self.routines[index] = saved;
                &self.routines[index]
            }
            None => {
                self.routines.push(saved);
                let index = self.routines.len() - 1;
                &self.routines[index]
            }
        }
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}
