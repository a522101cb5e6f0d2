//! Builder for creating and configuring RoutineStore instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::RoutineStore;
use crate::{
    config::DatabaseUrl,
    db::Database,
    error::{Result, TendError},
};

/// Builder for creating and configuring RoutineStore instances.
#[derive(Debug, Clone, Default)]
pub struct RoutineStoreBuilder {
    database_path: Option<PathBuf>,
}

impl RoutineStoreBuilder {
    /// Creates a new builder without a database configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the database file path.
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the database from a storage connection string.
    ///
    /// # Errors
    ///
    /// Returns `TendError::Configuration` if the connection string is not a
    /// usable SQLite location.
    pub fn with_database_url(self, url: &str) -> Result<Self> {
        let url: DatabaseUrl = url.parse()?;
        Ok(self.with_database_path(url.path()))
    }

    /// Builds the configured store, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `TendError::Configuration` if no database was configured
    /// Returns `TendError::FileSystem` if the database directory can't be created
    /// Returns `TendError::Database` if database initialization fails
    pub async fn build(self) -> Result<RoutineStore> {
        let db_path = self.database_path.ok_or_else(|| TendError::Configuration {
            message: "No storage connection string configured".to_string(),
        })?;

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TendError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TendError>(())
        })
        .await
        .map_err(|e| TendError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::info!("Routine store ready at {}", db_path.display());
        Ok(RoutineStore::new(db_path))
    }
}
