//! Async API of the routine store.
//!
//! [`RoutineStore`] is the server-side authority over routine documents. Each
//! operation opens its own SQLite connection on a blocking thread, so the
//! store is cheap to clone into request handlers and never holds a connection
//! across an await point.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   HTTP handler  │───▶│  RoutineStore   │───▶│    Database     │
//! │  (tend-server)  │    │ (spawn_blocking)│    │   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use tend_core::{params::{NewRoutine, NewStep}, RoutineStoreBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RoutineStoreBuilder::new()
//!     .with_database_url("sqlite://tend.db")?
//!     .build()
//!     .await?;
//!
//! let mut params = NewRoutine::new("Morning");
//! params.steps.push(NewStep::new("Stretch", 5));
//! let routine = store.create_routine(params).await?;
//! assert_eq!(routine.steps.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TendError},
};

pub mod builder;
pub mod routine_ops;
pub mod step_ops;


pub use builder::RoutineStoreBuilder;

/// Handle to the routine database.
#[derive(Debug, Clone)]
pub struct RoutineStore {
    pub(crate) db_path: PathBuf,
}

impl RoutineStore {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| TendError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
